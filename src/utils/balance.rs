use crate::errors::{Result, SimError};
use log::debug;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use spl_token::state::Account as TokenAccount;

/// Get SOL balance for a wallet
pub async fn get_sol_balance(rpc_client: &RpcClient, wallet_address: &Pubkey) -> Result<u64> {
    debug!("Getting SOL balance for address: {}", wallet_address);

    let balance = rpc_client.get_balance(wallet_address).await?;

    debug!("SOL balance: {} lamports ({})", balance, format_sol(balance));
    Ok(balance)
}

/// Get token balance for a wallet and mint
pub async fn get_token_balance(rpc_client: &RpcClient, wallet_address: &Pubkey, token_mint: &Pubkey) -> Result<u64> {
    debug!("Getting token balance for wallet: {} and mint: {}", wallet_address, token_mint);

    let token_account = get_associated_token_address(wallet_address, token_mint);

    let response = rpc_client
        .get_account_with_commitment(&token_account, rpc_client.commitment())
        .await?;

    match response.value {
        Some(account) => {
            let token_account_data = TokenAccount::unpack(&account.data)
                .map_err(|e| SimError::Token(format!("Failed to deserialize token account data: {}", e)))?;

            debug!("Token balance: {} units", token_account_data.amount);
            Ok(token_account_data.amount)
        }
        None => {
            debug!("Token account does not exist for this wallet. Balance is 0.");
            Ok(0)
        }
    }
}

/// Format a token amount with its decimals
pub fn format_token_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let divisor = 10u64.pow(decimals as u32);
    let whole_part = amount / divisor;
    let fractional_part = amount % divisor;

    if fractional_part == 0 {
        return whole_part.to_string();
    }

    let fractional_str = format!("{:0width$}", fractional_part, width = decimals as usize);
    let trimmed = fractional_str.trim_end_matches('0');
    format!("{}.{}", whole_part, trimmed)
}

/// Lamports rendered as SOL, e.g. `0.0025 SOL`.
pub fn format_sol(lamports: u64) -> String {
    format!("{} SOL", format_token_amount(lamports, 9))
}
