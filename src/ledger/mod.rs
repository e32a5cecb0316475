//! The ledger boundary: the only place the simulation suspends.
//!
//! Orchestrators are generic over [`Ledger`] so they can run against a live
//! cluster ([`rpc::RpcLedger`]) or an in-memory recorder in tests.

pub mod rpc;

pub use rpc::RpcLedger;

use crate::errors::Result;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
};

#[allow(async_fn_in_trait)]
pub trait Ledger {
    async fn sol_balance(&self, owner: &Pubkey) -> Result<u64>;

    /// Balance of `owner`'s holding account for `mint`; a missing account reads as zero.
    async fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64>;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;

    /// Requests an airdrop and waits for it to confirm.
    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> Result<Signature>;

    /// Signs `instructions` as one transaction and waits for confirmation.
    ///
    /// Either every instruction applies or none does. Failures are returned
    /// as-is; callers do not retry.
    async fn submit_batch(
        &self,
        label: &str,
        instructions: &[Instruction],
        fee_payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Signature>;
}
