//! Offline fan-out / fan-in previews. No wallets, no ledger.

use super::buy::purchase_quantity;
use crate::allocation::{allocate, collect, UnitPrice};
use crate::errors::Result;
use crate::models::simulation::DistributionRow;
use crate::utils::format_sol;
use console::Style;
use prettytable::{row, Table};

fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Rows for a purchase of `sol_lamports` at `price` spread over `child_count` children.
pub fn fan_out_rows(sol_lamports: u64, price: &UnitPrice, child_count: usize) -> Result<Vec<DistributionRow>> {
    let total = purchase_quantity(sol_lamports, price)?;
    let children: Vec<String> = (0..child_count).map(|i| format!("Child {}", i)).collect();
    let allocations = allocate(total, &children)?;

    Ok(allocations
        .into_iter()
        .map(|a| DistributionRow {
            token_percent: percent_of(a.quantity, total),
            lamports: 0,
            token_amount: a.quantity,
            wallet: a.wallet,
        })
        .collect())
}

/// Rows for selling `requested` units out of children holding `balances`.
pub fn fan_in_rows(requested: u64, balances: &[u64], price: &UnitPrice) -> Result<Vec<DistributionRow>> {
    let sources: Vec<(String, u64)> = balances
        .iter()
        .enumerate()
        .map(|(i, amount)| (format!("Child {}", i), *amount))
        .collect();
    let collections = collect(requested, &sources, price)?;

    Ok(collections
        .into_iter()
        .map(|c| DistributionRow {
            token_percent: percent_of(c.quantity, requested),
            lamports: c.lamports,
            token_amount: c.quantity,
            wallet: c.wallet,
        })
        .collect())
}

fn print_rows(rows: &[DistributionRow], sol_header: &str) {
    let mut table = Table::new();
    table.add_row(row!["Wallet", "Units", "Share", sol_header]);
    for r in rows {
        table.add_row(row![
            r.wallet,
            r.token_amount,
            format!("{:.2}%", r.token_percent),
            format_sol(r.lamports)
        ]);
    }
    let total_units: u64 = rows.iter().map(|r| r.token_amount).sum();
    let total_lamports: u64 = rows.iter().map(|r| r.lamports).sum();
    table.add_row(row!["TOTAL", total_units, "", format_sol(total_lamports)]);
    table.printstd();
}

/// Prints how a purchase would be split across the children.
pub fn plan_buy(sol_lamports: u64, price: &UnitPrice, child_count: usize) -> Result<()> {
    let info_style = Style::new().cyan();
    let rows = fan_out_rows(sol_lamports, price, child_count)?;

    println!("\n{}", info_style.apply_to("📋 Purchase Fan-out").bold());
    println!("SOL offered: {}", format_sol(sol_lamports));
    println!("Price: {} (~{:.9} SOL/unit)", price, price.as_sol_per_unit());
    print_rows(&rows, "SOL");
    Ok(())
}

/// Prints how a sale would be collected from the children and what each earns.
pub fn plan_sell(requested: u64, balances: &[u64], price: &UnitPrice) -> Result<()> {
    let info_style = Style::new().cyan();
    let warning_style = Style::new().yellow();
    let rows = fan_in_rows(requested, balances, price)?;

    println!("\n{}", info_style.apply_to("📋 Sell Fan-in").bold());
    println!("Requested: {} units", requested);
    println!("Price: {} (~{:.9} SOL/unit)", price, price.as_sol_per_unit());
    print_rows(&rows, "SOL Earned");

    let unfilled = requested - rows.iter().map(|r| r.token_amount).sum::<u64>();
    if unfilled > 0 {
        println!("{} {} units could not be collected", warning_style.apply_to("⚠️ Shortfall:"), unfilled);
    }
    Ok(())
}
