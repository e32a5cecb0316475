use super::Ledger;
use crate::config::Config;
use crate::errors::Result;
use crate::utils::{get_sol_balance, get_token_balance, wait_for_confirmation};
use log::{debug, info};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};
use std::time::Duration;

/// [`Ledger`] backed by a Solana JSON-RPC node.
pub struct RpcLedger {
    rpc_client: RpcClient,
    confirm_timeout: Duration,
}

impl RpcLedger {
    pub fn new(config: &Config) -> Result<Self> {
        let commitment_config = config.get_commitment_config()?;
        info!("Connecting to {} ({:?})", config.solana_rpc_url, commitment_config.commitment);
        Ok(Self {
            rpc_client: RpcClient::new_with_commitment(config.solana_rpc_url.clone(), commitment_config),
            confirm_timeout: Duration::from_secs(config.confirm_timeout_secs),
        })
    }
}

impl Ledger for RpcLedger {
    async fn sol_balance(&self, owner: &Pubkey) -> Result<u64> {
        get_sol_balance(&self.rpc_client, owner).await
    }

    async fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64> {
        get_token_balance(&self.rpc_client, owner, mint).await
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(self.rpc_client.get_minimum_balance_for_rent_exemption(data_len).await?)
    }

    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> Result<Signature> {
        info!("Requesting airdrop of {} lamports to {}", lamports, to);
        let signature = self.rpc_client.request_airdrop(to, lamports).await?;
        wait_for_confirmation(&self.rpc_client, &signature, self.confirm_timeout, "airdrop").await?;
        Ok(signature)
    }

    async fn submit_batch(
        &self,
        label: &str,
        instructions: &[Instruction],
        fee_payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Signature> {
        debug!("[{}] Fetching latest blockhash...", label);
        let recent_blockhash = self.rpc_client.get_latest_blockhash().await?;

        let mut transaction = Transaction::new_with_payer(instructions, Some(fee_payer));
        transaction.try_sign(signers, recent_blockhash)?;
        debug!("[{}] Signed with {} signers, sending...", label, transaction.signatures.len());

        let signature = self.rpc_client.send_transaction(&transaction).await?;
        info!("[{}] Transaction sent: {}. Confirming...", label, signature);

        wait_for_confirmation(&self.rpc_client, &signature, self.confirm_timeout, label).await?;
        Ok(signature)
    }
}
