use crate::config::Config;
use crate::errors::{Result, SimError};
use crate::ledger::Ledger;
use crate::models::wallet::WalletRole;
use crate::utils::format_sol;
use log::{info, warn};
use solana_sdk::signature::{Keypair, SeedDerivable, Signer};
use std::env;

/// Loads a keypair from a secret key string.
///
/// Accepts base58 (32-byte seed or 64-byte keypair) and the JSON byte-array
/// form written by the Solana CLI, e.g. `[12,34,...]`.
pub fn load_keypair_from_string(secret: &str, wallet_name: &str) -> Result<Keypair> {
    let secret = secret.trim();
    if secret.is_empty() {
        return Err(SimError::Wallet(format!("Private key for {} is empty.", wallet_name)));
    }

    let bytes: Vec<u8> = if secret.starts_with('[') {
        serde_json::from_str(secret)
            .map_err(|e| SimError::Wallet(format!("Failed to parse JSON key bytes for {}: {}", wallet_name, e)))?
    } else {
        bs58::decode(secret)
            .into_vec()
            .map_err(|e| SimError::Wallet(format!("Failed to decode base58 private key for {}: {}", wallet_name, e)))?
    };

    match bytes.len() {
        32 => {
            let mut seed = [0u8; 32];
            seed.copy_from_slice(&bytes);
            Keypair::from_seed(&seed)
                .map_err(|e| SimError::Wallet(format!("Failed to create keypair from 32-byte seed for {}: {}", wallet_name, e)))
        }
        64 => Keypair::from_bytes(&bytes)
            .map_err(|e| SimError::Wallet(format!("Failed to create keypair from 64-byte array for {}: {}", wallet_name, e))),
        other => Err(SimError::Wallet(format!(
            "Private key for {} has unexpected length: {}. Expected 32 or 64 bytes.",
            wallet_name, other
        ))),
    }
}

/// Hands out one identity per role, topping it up per the role's funding policy.
pub struct WalletProvisioner<'a, L: Ledger> {
    ledger: &'a L,
    config: &'a Config,
}

impl<'a, L: Ledger> WalletProvisioner<'a, L> {
    pub fn new(ledger: &'a L, config: &'a Config) -> Self {
        Self { ledger, config }
    }

    /// Uses the role's environment variable if set, otherwise a fresh keypair.
    pub async fn provision(&self, role: WalletRole) -> Result<Keypair> {
        let secret = env::var(role.env_var()).ok();
        self.provision_from(role, secret.as_deref()).await
    }

    /// Generated keys live only for this run and are never written out.
    pub async fn provision_from(&self, role: WalletRole, secret: Option<&str>) -> Result<Keypair> {
        let keypair = match secret {
            Some(secret) if !secret.trim().is_empty() => {
                info!("[{}] Loading keypair from {}", role, role.env_var());
                load_keypair_from_string(secret, &role.to_string())?
            }
            _ => {
                info!("[{}] No {} set, generating an ephemeral keypair", role, role.env_var());
                Keypair::new()
            }
        };

        self.fund(role, &keypair).await?;
        info!("[{}] Wallet address: {}", role, keypair.pubkey());
        Ok(keypair)
    }

    async fn fund(&self, role: WalletRole, keypair: &Keypair) -> Result<()> {
        let policy = self.config.funding_policy(role);
        if policy.minimum_lamports == 0 {
            return Ok(());
        }

        let pubkey = keypair.pubkey();
        let balance = self.ledger.sol_balance(&pubkey).await?;
        if balance >= policy.minimum_lamports {
            return Ok(());
        }

        if policy.airdrop_lamports == 0 {
            warn!(
                "[{}] Balance {} is below minimum {} and airdrops are disabled",
                role,
                format_sol(balance),
                format_sol(policy.minimum_lamports)
            );
            return Ok(());
        }

        info!(
            "[{}] Balance {} below minimum {}, airdropping {}",
            role,
            format_sol(balance),
            format_sol(policy.minimum_lamports),
            format_sol(policy.airdrop_lamports)
        );
        self.ledger.request_airdrop(&pubkey, policy.airdrop_lamports).await?;
        Ok(())
    }
}
