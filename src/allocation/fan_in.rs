//! Sell fan-in: pull a requested quantity back out of an ordered list of
//! wallets and price each wallet's contribution.

use super::quantity::UnitPrice;
use crate::errors::Result;
use serde::Serialize;

/// What one source wallet contributes to a fan-in, and what it is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection<W> {
    pub wallet: W,
    pub quantity: u64,
    pub lamports: u64,
}

/// Greedily collects up to `requested` units from `sources`, first come first served.
///
/// Each source gives `min(available, remaining)`; a source with nothing to give
/// gets a zero entry and the walk continues. Payment is `floor(quantity × price)`
/// lamports. Once `remaining` reaches zero all later sources get zero entries.
/// Balances are taken as given; the ledger re-checks them at submission.
pub fn collect<W: Clone>(requested: u64, sources: &[(W, u64)], price: &UnitPrice) -> Result<Vec<Collection<W>>> {
    let mut remaining = requested;
    let mut collections = Vec::with_capacity(sources.len());

    for (wallet, available) in sources {
        let quantity = (*available).min(remaining);
        let lamports = if quantity == 0 { 0 } else { price.lamports_for(quantity)? };
        remaining -= quantity;
        collections.push(Collection {
            wallet: wallet.clone(),
            quantity,
            lamports,
        });
    }

    Ok(collections)
}

/// Units of `requested` that the sources could not cover.
pub fn shortfall<W>(requested: u64, collections: &[Collection<W>]) -> u64 {
    requested.saturating_sub(collections.iter().map(|c| c.quantity).sum())
}
