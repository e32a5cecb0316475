//! In-memory ledger shared by the orchestration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use pumpfun_fanout_sim::errors::{Result, SimError};
use pumpfun_fanout_sim::ledger::Ledger;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};

/// Rent the recorder reports for any account size.
pub const TEST_RENT_LAMPORTS: u64 = 1_461_600;

/// One `submit_batch` call as the ledger saw it.
#[derive(Debug, Clone)]
pub struct SubmittedBatch {
    pub label: String,
    pub instructions: Vec<Instruction>,
    pub fee_payer: Pubkey,
    pub signers: Vec<Pubkey>,
}

/// Records every batch and airdrop; balances are whatever the test seeds.
/// Nothing is applied, so balances never change on their own.
#[derive(Default)]
pub struct RecordingLedger {
    pub batches: Mutex<Vec<SubmittedBatch>>,
    pub airdrops: Mutex<Vec<(Pubkey, u64)>>,
    pub sol_balances: Mutex<HashMap<Pubkey, u64>>,
    /// Keyed by (owner, mint).
    pub token_balances: Mutex<HashMap<(Pubkey, Pubkey), u64>>,
    pub reject_batches: bool,
    pub fail_token_reads: bool,
}

impl RecordingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger that refuses every batch.
    pub fn rejecting() -> Self {
        Self {
            reject_batches: true,
            ..Self::default()
        }
    }

    /// A ledger whose token balance reads time out.
    pub fn failing_token_reads() -> Self {
        Self {
            fail_token_reads: true,
            ..Self::default()
        }
    }

    pub fn set_sol_balance(&self, owner: Pubkey, lamports: u64) {
        self.sol_balances.lock().unwrap().insert(owner, lamports);
    }

    pub fn set_token_balance(&self, owner: Pubkey, mint: Pubkey, amount: u64) {
        self.token_balances.lock().unwrap().insert((owner, mint), amount);
    }

    pub fn submitted(&self) -> Vec<SubmittedBatch> {
        self.batches.lock().unwrap().clone()
    }

    pub fn airdropped(&self) -> Vec<(Pubkey, u64)> {
        self.airdrops.lock().unwrap().clone()
    }
}

impl Ledger for RecordingLedger {
    async fn sol_balance(&self, owner: &Pubkey) -> Result<u64> {
        Ok(self.sol_balances.lock().unwrap().get(owner).copied().unwrap_or(0))
    }

    async fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64> {
        if self.fail_token_reads {
            return Err(SimError::Timeout(format!("token balance read for {} timed out", owner)));
        }
        Ok(self
            .token_balances
            .lock()
            .unwrap()
            .get(&(*owner, *mint))
            .copied()
            .unwrap_or(0))
    }

    async fn minimum_balance_for_rent_exemption(&self, _data_len: usize) -> Result<u64> {
        Ok(TEST_RENT_LAMPORTS)
    }

    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> Result<Signature> {
        self.airdrops.lock().unwrap().push((*to, lamports));
        *self.sol_balances.lock().unwrap().entry(*to).or_insert(0) += lamports;
        Ok(Signature::new_unique())
    }

    async fn submit_batch(
        &self,
        label: &str,
        instructions: &[Instruction],
        fee_payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Signature> {
        if self.reject_batches {
            return Err(SimError::Transaction(format!("[{}] rejected by test ledger", label)));
        }
        self.batches.lock().unwrap().push(SubmittedBatch {
            label: label.to_string(),
            instructions: instructions.to_vec(),
            fee_payer: *fee_payer,
            signers: signers.iter().map(|k| k.pubkey()).collect(),
        });
        Ok(Signature::new_unique())
    }
}

pub fn keypairs(count: usize) -> Vec<Keypair> {
    (0..count).map(|_| Keypair::new()).collect()
}

pub fn pubkeys(keypairs: &[Keypair]) -> Vec<Pubkey> {
    keypairs.iter().map(|k| k.pubkey()).collect()
}
