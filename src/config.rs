use crate::allocation::quantity::parse_sol_amount;
use crate::errors::{Result, SimError};
use crate::models::wallet::WalletRole;
use dotenv::dotenv;
use log::{debug, info};
use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use std::env;
use std::str::FromStr;

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_COIN_API_URL: &str = "https://frontend-api.pump.fun";

/// Run configuration. Built once at startup and passed down explicitly.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub solana_rpc_url: String,
    pub commitment: String,
    pub coin_api_url: String,

    // Asset issued at the start of a run
    pub default_decimals: u8,
    /// Whole tokens minted to the seller.
    pub initial_supply: u64,

    pub child_wallet_count: usize,

    // Wallet funding
    pub airdrop_lamports: u64,
    pub minimum_balance_lamports: u64,

    pub confirm_timeout_secs: u64,
}

/// How a provisioned wallet gets topped up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingPolicy {
    pub airdrop_lamports: u64,
    pub minimum_lamports: u64,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        info!("Loading configuration from environment variables.");
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Builds a config from any key lookup, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let parse = |key: &str, default: String| -> String { lookup(key).unwrap_or(default) };

        let sol_setting = |key: &str, default: u64| -> Result<u64> {
            match lookup(key) {
                Some(raw) => parse_sol_amount(&raw).map_err(|e| SimError::Config(format!("{}: {}", key, e))),
                None => Ok(default),
            }
        };

        let config = Config {
            solana_rpc_url: parse("RPC_URL", defaults.solana_rpc_url),
            commitment: parse("COMMITMENT", defaults.commitment),
            coin_api_url: parse("COIN_API_URL", defaults.coin_api_url),
            default_decimals: parse_setting(&lookup, "TOKEN_DECIMALS", defaults.default_decimals)?,
            initial_supply: parse_setting(&lookup, "INITIAL_SUPPLY", defaults.initial_supply)?,
            child_wallet_count: parse_setting(&lookup, "CHILD_WALLET_COUNT", defaults.child_wallet_count)?,
            airdrop_lamports: sol_setting("AIRDROP_SOL", defaults.airdrop_lamports)?,
            minimum_balance_lamports: sol_setting("MINIMUM_BALANCE_SOL", defaults.minimum_balance_lamports)?,
            confirm_timeout_secs: parse_setting(&lookup, "CONFIRM_TIMEOUT_SECS", defaults.confirm_timeout_secs)?,
        };

        config.get_commitment_config()?;
        Ok(config)
    }

    pub fn get_commitment_config(&self) -> Result<CommitmentConfig> {
        match self.commitment.as_str() {
            "processed" => Ok(CommitmentConfig::processed()),
            "confirmed" => Ok(CommitmentConfig::confirmed()),
            "finalized" => Ok(CommitmentConfig::finalized()),
            _ => Err(SimError::Config(format!("Invalid commitment level: {}", self.commitment))),
        }
    }

    /// Children start empty and are never airdropped; every other role is
    /// topped up when it falls below the configured minimum.
    pub fn funding_policy(&self, role: WalletRole) -> FundingPolicy {
        match role {
            WalletRole::Child(_) => FundingPolicy {
                airdrop_lamports: 0,
                minimum_lamports: 0,
            },
            _ => FundingPolicy {
                airdrop_lamports: self.airdrop_lamports,
                minimum_lamports: self.minimum_balance_lamports,
            },
        }
    }

    /// Cluster name for explorer links, guessed from the RPC URL.
    pub fn cluster(&self) -> &'static str {
        let url = self.solana_rpc_url.as_str();
        if url.contains("localhost") || url.contains("127.0.0.1") {
            "localnet"
        } else if url.contains("devnet") {
            "devnet"
        } else if url.contains("testnet") {
            "testnet"
        } else {
            "mainnet-beta"
        }
    }
}

fn parse_setting<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SimError::Config(format!("Invalid value for {} ({:?}): {}", key, raw, e))),
        None => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            solana_rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: "confirmed".to_string(),
            coin_api_url: DEFAULT_COIN_API_URL.to_string(),
            default_decimals: 9,
            initial_supply: 10,
            child_wallet_count: 2,
            airdrop_lamports: 2 * LAMPORTS_PER_SOL,
            minimum_balance_lamports: LAMPORTS_PER_SOL / 100,
            confirm_timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.solana_rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.default_decimals, 9);
        assert_eq!(config.child_wallet_count, 2);
        assert_eq!(config.airdrop_lamports, 2_000_000_000);
        assert_eq!(config.minimum_balance_lamports, 10_000_000);
        assert_eq!(config.cluster(), "devnet");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("RPC_URL", "http://127.0.0.1:8899"),
            ("COMMITMENT", "finalized"),
            ("CHILD_WALLET_COUNT", "5"),
            ("AIRDROP_SOL", "0.5"),
        ]))
        .unwrap();
        assert_eq!(config.child_wallet_count, 5);
        assert_eq!(config.airdrop_lamports, 500_000_000);
        assert_eq!(config.cluster(), "localnet");
        assert_eq!(config.get_commitment_config().unwrap(), CommitmentConfig::finalized());
    }

    #[test]
    fn bad_values_are_config_errors() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("COMMITMENT", "eventually")])),
            Err(SimError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("CHILD_WALLET_COUNT", "-2")])),
            Err(SimError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("AIRDROP_SOL", "lots")])),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn children_are_never_airdropped() {
        let config = Config::default();
        assert_eq!(config.funding_policy(WalletRole::Child(0)).airdrop_lamports, 0);
        assert_eq!(config.funding_policy(WalletRole::Buyer).minimum_lamports, 10_000_000);
    }
}
