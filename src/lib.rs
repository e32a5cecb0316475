//! Token-launch simulator: mint an asset, buy it with SOL and fan the tokens
//! out over child wallets, then sell back from the children.

pub mod allocation;
pub mod api;
pub mod commands;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod utils;
pub mod wallet;

pub use errors::{Result, SimError};
