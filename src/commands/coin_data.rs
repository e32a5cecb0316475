use crate::api::PumpClient;
use crate::config::Config;
use crate::errors::{Result, SimError};
use console::style;

/// Prints the coin data pump.fun serves for `mint` and the spot price it implies.
pub async fn show_coin_data(config: &Config, mint: &str) -> Result<()> {
    let client = PumpClient::new(&config.coin_api_url)?;
    let coin = client
        .get_coin_data(mint)
        .await?
        .ok_or_else(|| SimError::Api(format!("Failed to retrieve coin data for {}", mint)))?;

    println!("{} {} ({})", style("Coin:").cyan(), coin.name, coin.symbol);
    println!("{} {}", style("Mint:").cyan(), coin.mint);
    println!("{} {}", style("Bonding curve complete:").cyan(), coin.complete);
    if let Some(cap) = coin.usd_market_cap {
        println!("{} ${:.2}", style("USD market cap:").cyan(), cap);
    }
    match coin.unit_price() {
        Ok(price) => println!(
            "{} {} (~{:.12} SOL/unit)",
            style("Spot price:").cyan(),
            price,
            price.as_sol_per_unit()
        ),
        Err(e) => println!("{} unavailable ({})", style("Spot price:").yellow(), e),
    }
    if !coin.extra.is_empty() {
        println!("{}", serde_json::to_string_pretty(&coin.extra)?);
    }
    Ok(())
}
