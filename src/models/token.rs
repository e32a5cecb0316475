use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use spl_associated_token_account::get_associated_token_address;

/// The fungible token created for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub mint: Pubkey,
    pub decimals: u8,
}

impl Asset {
    pub fn new(mint: Pubkey, decimals: u8) -> Self {
        Self { mint, decimals }
    }

    /// The owner's associated token account for this mint.
    pub fn holding_account(&self, owner: &Pubkey) -> Pubkey {
        get_associated_token_address(owner, &self.mint)
    }
}

#[derive(Debug, Clone)]
pub struct Issuance {
    pub asset: Asset,
    /// Smallest units credited to the seller's holding account.
    pub supply: u64,
    pub signature: Signature,
}
