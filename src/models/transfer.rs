use super::token::Asset;
use solana_sdk::pubkey::Pubkey;

/// A single value movement inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Sol {
        from: Pubkey,
        to: Pubkey,
        lamports: u64,
    },
    /// Token movement between the owners' holding accounts for the batch asset.
    Token {
        from_owner: Pubkey,
        to_owner: Pubkey,
        amount: u64,
    },
}

/// A group of transfers that the ledger applies all together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferBatch {
    pub label: String,
    pub asset: Asset,
    pub fee_payer: Pubkey,
    /// Wallets whose signature the batch needs, fee payer first, no duplicates.
    pub signers: Vec<Pubkey>,
    /// Owners whose holding account is opened (idempotently) before any transfer runs.
    pub holding_accounts: Vec<Pubkey>,
    pub transfers: Vec<Transfer>,
}

impl TransferBatch {
    pub fn new(label: impl Into<String>, asset: Asset, fee_payer: Pubkey) -> Self {
        Self {
            label: label.into(),
            asset,
            fee_payer,
            signers: vec![fee_payer],
            holding_accounts: Vec::new(),
            transfers: Vec::new(),
        }
    }

    pub fn require_signer(&mut self, signer: Pubkey) {
        if !self.signers.contains(&signer) {
            self.signers.push(signer);
        }
    }

    pub fn open_holding_account(&mut self, owner: Pubkey) {
        if !self.holding_accounts.contains(&owner) {
            self.holding_accounts.push(owner);
        }
    }

    pub fn push_sol(&mut self, from: Pubkey, to: Pubkey, lamports: u64) {
        self.transfers.push(Transfer::Sol { from, to, lamports });
    }

    pub fn push_token(&mut self, from_owner: Pubkey, to_owner: Pubkey, amount: u64) {
        self.transfers.push(Transfer::Token {
            from_owner,
            to_owner,
            amount,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Net lamports leaving `owner` across the batch (fees excluded).
    pub fn lamports_sent_by(&self, owner: &Pubkey) -> u64 {
        self.transfers
            .iter()
            .filter_map(|t| match t {
                Transfer::Sol { from, lamports, .. } if from == owner => Some(*lamports),
                _ => None,
            })
            .sum()
    }

    /// Token units arriving at `owner` across the batch.
    pub fn tokens_received_by(&self, owner: &Pubkey) -> u64 {
        self.transfers
            .iter()
            .filter_map(|t| match t {
                Transfer::Token { to_owner, amount, .. } if to_owner == owner => Some(*amount),
                _ => None,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signers_and_accounts_are_deduplicated() {
        let asset = Asset::new(Pubkey::new_unique(), 9);
        let payer = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let mut batch = TransferBatch::new("test", asset, payer);
        batch.require_signer(payer);
        batch.require_signer(other);
        batch.require_signer(other);
        batch.open_holding_account(other);
        batch.open_holding_account(other);
        assert_eq!(batch.signers, vec![payer, other]);
        assert_eq!(batch.holding_accounts, vec![other]);
    }

    #[test]
    fn totals_follow_direction() {
        let asset = Asset::new(Pubkey::new_unique(), 9);
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut batch = TransferBatch::new("test", asset, a);
        assert!(batch.is_empty());
        batch.push_sol(a, b, 10);
        batch.push_sol(b, a, 3);
        batch.push_token(b, a, 7);
        batch.push_token(a, b, 2);
        assert_eq!(batch.lamports_sent_by(&a), 10);
        assert_eq!(batch.tokens_received_by(&a), 7);
        assert_eq!(batch.tokens_received_by(&b), 2);
    }
}
