use super::token::{Asset, Issuance};
use super::transfer::TransferBatch;
use crate::allocation::{Allocation, Collection, UnitPrice};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

/// Everything the purchase orchestrator decided before touching the ledger.
#[derive(Debug, Clone)]
pub struct PurchasePlan {
    pub sol_lamports: u64,
    pub price: UnitPrice,
    /// floor(sol / price), always at least one unit.
    pub total_tokens: u64,
    pub allocations: Vec<Allocation<Pubkey>>,
    pub batch: TransferBatch,
}

#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    pub plan: PurchasePlan,
    pub signature: Signature,
}

/// Everything the sell orchestrator decided before touching the ledger.
#[derive(Debug, Clone)]
pub struct SalePlan {
    pub requested: u64,
    pub price: UnitPrice,
    pub collections: Vec<Collection<Pubkey>>,
    /// Requested units the children could not cover.
    pub shortfall: u64,
    pub batch: TransferBatch,
}

impl SalePlan {
    pub fn collected(&self) -> u64 {
        self.requested - self.shortfall
    }

    pub fn total_lamports(&self) -> u64 {
        self.collections.iter().map(|c| c.lamports).sum()
    }
}

#[derive(Debug, Clone)]
pub struct SaleOutcome {
    pub plan: SalePlan,
    /// `None` when no child had anything to give and nothing was submitted.
    pub signature: Option<Signature>,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub asset: Asset,
    pub issuance: Issuance,
    pub purchase: PurchaseOutcome,
    pub sale: SaleOutcome,
}

/// One display row of a fan-out or fan-in table.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    pub wallet: String,
    pub token_amount: u64,
    pub token_percent: f64,
    pub lamports: u64,
}
