use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::fmt;

/// The part a wallet plays in a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WalletRole {
    Parent,
    Seller,
    Buyer,
    Child(usize),
}

impl WalletRole {
    /// Environment variable that may hold this role's secret key.
    pub fn env_var(&self) -> String {
        match self {
            WalletRole::Parent => "PARENT_WALLET".to_string(),
            WalletRole::Seller => "SELLER_WALLET".to_string(),
            WalletRole::Buyer => "BUYER_WALLET".to_string(),
            WalletRole::Child(index) => format!("CHILD_WALLET_{}", index),
        }
    }
}

impl fmt::Display for WalletRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletRole::Parent => write!(f, "Parent"),
            WalletRole::Seller => write!(f, "Seller"),
            WalletRole::Buyer => write!(f, "Buyer"),
            WalletRole::Child(index) => write!(f, "Child {}", index),
        }
    }
}

/// A wallet's token balance as read from the ledger at one point in time.
///
/// Sell sizing works off these snapshots; the ledger still rejects an
/// overdraft when the batch lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenBalance {
    pub owner: Pubkey,
    pub amount: u64,
}

impl fmt::Display for TokenBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} units", self.owner, self.amount)
    }
}
