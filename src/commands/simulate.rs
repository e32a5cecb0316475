use super::buy::simulate_purchase;
use super::mint::issue_asset;
use super::sell::simulate_sell;
use crate::allocation::UnitPrice;
use crate::config::Config;
use crate::errors::Result;
use crate::ledger::Ledger;
use crate::models::simulation::{PurchaseOutcome, SaleOutcome, SimulationReport};
use crate::models::wallet::WalletRole;
use crate::utils::{explorer_link, format_sol, format_token_amount};
use crate::wallet::WalletProvisioner;
use console::Style;
use log::info;
use prettytable::{row, Table};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

/// Inputs for one end-to-end run.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    /// SOL the parent spends on the purchase.
    pub buy_lamports: u64,
    /// Smallest units the buyer asks to take back from the children.
    pub sell_quantity: u64,
    pub price: UnitPrice,
}

/// Mint, buy-and-distribute, then sell back, one step after the other.
///
/// Parent, children and seller are provisioned first; the buyer only right
/// before the sell.
pub async fn run_simulation<L: Ledger>(config: &Config, ledger: &L, params: &SimulationParams) -> Result<SimulationReport> {
    let info_style = Style::new().cyan();
    let success_style = Style::new().green().bold();
    let cluster = config.cluster();
    let provisioner = WalletProvisioner::new(ledger, config);

    println!("\n{}", info_style.apply_to("👛 Provisioning wallets...").bold());
    let parent = provisioner.provision(WalletRole::Parent).await?;
    let mut children: Vec<Keypair> = Vec::with_capacity(config.child_wallet_count);
    for index in 0..config.child_wallet_count {
        children.push(provisioner.provision(WalletRole::Child(index)).await?);
    }
    let seller = provisioner.provision(WalletRole::Seller).await?;
    println!("Parent wallet: {}", parent.pubkey());
    for (index, child) in children.iter().enumerate() {
        println!("Child wallet {}: {}", index, child.pubkey());
    }
    println!("Seller wallet: {}", seller.pubkey());

    println!("\n{}", info_style.apply_to("🪙 Issuing asset...").bold());
    let issuance = issue_asset(ledger, &seller, config.default_decimals, config.initial_supply).await?;
    let asset = issuance.asset;
    println!(
        "{} Created mint: {}",
        success_style.apply_to("✅"),
        explorer_link("address", &asset.mint.to_string(), cluster)
    );
    println!(
        "Minted {} tokens to the seller: {}",
        format_token_amount(issuance.supply, asset.decimals),
        explorer_link("tx", &issuance.signature.to_string(), cluster)
    );

    println!("\n{}", info_style.apply_to("🛒 Simulating purchase...").bold());
    let child_pubkeys: Vec<Pubkey> = children.iter().map(|c| c.pubkey()).collect();
    let purchase = simulate_purchase(
        ledger,
        &parent,
        &seller,
        &child_pubkeys,
        asset,
        params.buy_lamports,
        &params.price,
    )
    .await?;
    println!(
        "{} Buy transaction: {}",
        success_style.apply_to("✅"),
        explorer_link("tx", &purchase.signature.to_string(), cluster)
    );
    print_purchase(&purchase);

    let buyer = provisioner.provision(WalletRole::Buyer).await?;
    println!("Buyer wallet: {}", buyer.pubkey());

    println!("\n{}", info_style.apply_to("💸 Simulating sell...").bold());
    let sale = simulate_sell(ledger, &buyer, &children, asset, params.sell_quantity, &params.price).await?;
    match &sale.signature {
        Some(signature) => println!(
            "{} Sell transaction: {}",
            success_style.apply_to("✅"),
            explorer_link("tx", &signature.to_string(), cluster)
        ),
        None => println!("Nothing to sell, no transaction sent."),
    }
    print_sale(&sale);

    info!("Simulation finished for mint {}", asset.mint);
    Ok(SimulationReport {
        asset,
        issuance,
        purchase,
        sale,
    })
}

fn print_purchase(purchase: &PurchaseOutcome) {
    let plan = &purchase.plan;
    let buyer = plan.batch.fee_payer;
    println!(
        "Bought {} units for {} at {}",
        plan.batch.tokens_received_by(&buyer),
        format_sol(plan.batch.lamports_sent_by(&buyer)),
        plan.price
    );
    let mut table = Table::new();
    table.add_row(row!["Child", "Units"]);
    for allocation in &plan.allocations {
        table.add_row(row![allocation.wallet, allocation.quantity]);
    }
    table.printstd();
}

fn print_sale(sale: &SaleOutcome) {
    let plan = &sale.plan;
    let buyer = plan.batch.fee_payer;
    println!(
        "Sold {} of {} requested units for {}",
        plan.batch.tokens_received_by(&buyer),
        plan.requested,
        format_sol(plan.batch.lamports_sent_by(&buyer))
    );
    let mut table = Table::new();
    table.add_row(row!["Child", "Units", "SOL Earned"]);
    for collection in &plan.collections {
        table.add_row(row![collection.wallet, collection.quantity, format_sol(collection.lamports)]);
    }
    table.printstd();
}
