use crate::allocation::{collect, shortfall, UnitPrice};
use crate::errors::{Result, SimError};
use crate::ledger::Ledger;
use crate::models::simulation::{SaleOutcome, SalePlan};
use crate::models::token::Asset;
use crate::models::transfer::TransferBatch;
use crate::models::wallet::TokenBalance;
use crate::utils::{build_batch_instructions, format_sol};
use log::{debug, info, warn};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

/// Reads every child's holding balance once, in order.
pub async fn snapshot_balances<L: Ledger>(ledger: &L, children: &[Pubkey], asset: &Asset) -> Result<Vec<TokenBalance>> {
    let mut balances = Vec::with_capacity(children.len());
    for owner in children {
        let amount = ledger.token_balance(owner, &asset.mint).await?;
        debug!("Balance snapshot {}: {} units", owner, amount);
        balances.push(TokenBalance { owner: *owner, amount });
    }
    Ok(balances)
}

/// Works out the sell batch from a balance snapshot without touching the ledger.
///
/// For each child that gives something: SOL buyer → child, then tokens child → buyer.
/// The batch is signed by the buyer and the contributing children only.
pub fn plan_sale(
    requested: u64,
    price: &UnitPrice,
    buyer: Pubkey,
    balances: &[TokenBalance],
    asset: Asset,
) -> Result<SalePlan> {
    let sources: Vec<(Pubkey, u64)> = balances.iter().map(|b| (b.owner, b.amount)).collect();
    let collections = collect(requested, &sources, price)?;
    let unfilled = shortfall(requested, &collections);

    let mut batch = TransferBatch::new("sell", asset, buyer);
    let contributing: Vec<_> = collections.iter().filter(|c| c.quantity > 0).collect();
    if !contributing.is_empty() {
        batch.open_holding_account(buyer);
    }
    for collection in contributing {
        batch.require_signer(collection.wallet);
        batch.push_sol(buyer, collection.wallet, collection.lamports);
        batch.push_token(collection.wallet, buyer, collection.quantity);
    }

    if unfilled > 0 {
        warn!(
            "Children hold {} fewer units than the {} requested; selling what is available",
            unfilled, requested
        );
    }

    Ok(SalePlan {
        requested,
        price: *price,
        collections,
        shortfall: unfilled,
        batch,
    })
}

/// Sells up to `requested` units from `children` to `buyer`, paying each child
/// for what it gives, in one atomic batch.
///
/// Balances are read once up front; the ledger is the final check on them.
pub async fn simulate_sell<L: Ledger>(
    ledger: &L,
    buyer: &Keypair,
    children: &[Keypair],
    asset: Asset,
    requested: u64,
    price: &UnitPrice,
) -> Result<SaleOutcome> {
    let child_pubkeys: Vec<Pubkey> = children.iter().map(|c| c.pubkey()).collect();
    let balances = snapshot_balances(ledger, &child_pubkeys, &asset).await?;
    let plan = plan_sale(requested, price, buyer.pubkey(), &balances, asset)?;

    if plan.batch.is_empty() {
        warn!("No child holds any units; nothing to sell");
        return Ok(SaleOutcome { plan, signature: None });
    }

    let mut signers: Vec<&Keypair> = Vec::with_capacity(plan.batch.signers.len());
    for pubkey in &plan.batch.signers {
        let keypair = std::iter::once(buyer)
            .chain(children.iter())
            .find(|k| k.pubkey() == *pubkey)
            .ok_or_else(|| SimError::Wallet(format!("No keypair available for signer {}", pubkey)))?;
        signers.push(keypair);
    }

    let instructions = build_batch_instructions(&plan.batch)?;
    info!(
        "Selling {} units from {} children for {}",
        plan.collected(),
        signers.len() - 1,
        format_sol(plan.total_lamports())
    );
    let signature = ledger
        .submit_batch(&plan.batch.label, &instructions, &plan.batch.fee_payer, &signers)
        .await?;
    info!("Sell confirmed: {}", signature);

    Ok(SaleOutcome {
        plan,
        signature: Some(signature),
    })
}
