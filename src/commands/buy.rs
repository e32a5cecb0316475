use crate::allocation::{allocate, UnitPrice};
use crate::errors::{Result, SimError};
use crate::ledger::Ledger;
use crate::models::simulation::{PurchaseOutcome, PurchasePlan};
use crate::models::token::Asset;
use crate::models::transfer::TransferBatch;
use crate::utils::{build_batch_instructions, format_sol};
use log::{debug, info};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

/// Units that `sol_lamports` buys at `price`, rounded down. Zero units is an error.
pub fn purchase_quantity(sol_lamports: u64, price: &UnitPrice) -> Result<u64> {
    let total_tokens = price.units_for(sol_lamports)?;
    if total_tokens == 0 {
        return Err(SimError::InsufficientInput(format!(
            "{} at {} is not enough to purchase any tokens",
            format_sol(sol_lamports),
            price
        )));
    }
    Ok(total_tokens)
}

/// Works out the purchase batch without touching the ledger.
///
/// `buyer` pays `sol_lamports` to `seller` for floor(sol / price) units, then
/// fans those units out over `children`. Fails with `InsufficientInput` before
/// anything is built when the SOL does not cover a single unit.
pub fn plan_purchase(
    sol_lamports: u64,
    price: &UnitPrice,
    buyer: Pubkey,
    seller: Pubkey,
    children: &[Pubkey],
    asset: Asset,
) -> Result<PurchasePlan> {
    let total_tokens = purchase_quantity(sol_lamports, price)?;
    let allocations = allocate(total_tokens, children)?;

    let mut batch = TransferBatch::new("purchase", asset, buyer);
    batch.require_signer(seller);
    batch.open_holding_account(buyer);
    batch.push_sol(buyer, seller, sol_lamports);
    batch.push_token(seller, buyer, total_tokens);

    for allocation in allocations.iter().filter(|a| a.quantity > 0) {
        batch.open_holding_account(allocation.wallet);
        batch.push_token(buyer, allocation.wallet, allocation.quantity);
    }

    debug!(
        "Purchase plan: {} units for {}, {} child transfers",
        total_tokens,
        format_sol(sol_lamports),
        allocations.iter().filter(|a| a.quantity > 0).count()
    );

    Ok(PurchasePlan {
        sol_lamports,
        price: *price,
        total_tokens,
        allocations,
        batch,
    })
}

/// Buys from `seller` with `buyer`'s SOL and distributes the tokens across
/// `children`, all in one atomic batch signed by buyer and seller.
pub async fn simulate_purchase<L: Ledger>(
    ledger: &L,
    buyer: &Keypair,
    seller: &Keypair,
    children: &[Pubkey],
    asset: Asset,
    sol_lamports: u64,
    price: &UnitPrice,
) -> Result<PurchaseOutcome> {
    let plan = plan_purchase(sol_lamports, price, buyer.pubkey(), seller.pubkey(), children, asset)?;
    let instructions = build_batch_instructions(&plan.batch)?;

    info!(
        "Buying {} units for {} and fanning out to {} children",
        plan.total_tokens,
        format_sol(sol_lamports),
        children.len()
    );
    let signature = ledger
        .submit_batch(&plan.batch.label, &instructions, &plan.batch.fee_payer, &[buyer, seller])
        .await?;
    info!("Purchase confirmed: {}", signature);

    Ok(PurchaseOutcome { plan, signature })
}
