use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use pumpfun_fanout_sim::allocation::{parse_quantity, parse_sol_amount, parse_token_amount, UnitPrice};
use pumpfun_fanout_sim::commands::{coin_data, plan, run_simulation, SimulationParams};
use pumpfun_fanout_sim::config::Config;
use pumpfun_fanout_sim::ledger::RpcLedger;
use pumpfun_fanout_sim::utils::format_sol;

#[derive(Parser, Debug)]
#[command(
    name = "pumpfun-fanout-sim",
    version,
    about = "Simulate a pump-style token launch with fan-out buys and fan-in sells on Solana",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the RPC endpoint from RPC_URL.
    #[arg(long, global = true)]
    rpc_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mint a token, buy and distribute it to the children, then sell back
    Simulate {
        /// SOL the parent spends on the purchase
        #[arg(long, default_value = "0.005")]
        sol: String,
        /// Price in SOL per smallest token unit
        #[arg(long, default_value = "0.0001")]
        price: String,
        /// Smallest units the buyer collects from the children
        #[arg(long, default_value = "50")]
        sell_amount: String,
        /// Number of child wallets
        #[arg(long)]
        children: Option<usize>,
        /// Whole tokens minted to the seller
        #[arg(long)]
        supply: Option<u64>,
        /// Token decimals
        #[arg(short, long)]
        decimals: Option<u8>,
    },
    /// Preview how a purchase would be split across the children
    PlanBuy {
        /// SOL offered
        #[arg(long)]
        sol: String,
        /// Price in SOL per smallest token unit
        #[arg(long)]
        price: String,
        /// Number of child wallets
        #[arg(long, default_value_t = 2)]
        children: usize,
    },
    /// Preview how a sale would be collected from the children
    PlanSell {
        /// Amount requested, in smallest units unless --decimals is given
        #[arg(long)]
        amount: String,
        /// Read --amount as whole tokens with this many decimals
        #[arg(long)]
        decimals: Option<u8>,
        /// Price in SOL per smallest token unit
        #[arg(long)]
        price: String,
        /// Child balances in smallest units, in order
        #[arg(long, value_delimiter = ',', required = true)]
        balances: Vec<u64>,
    },
    /// Fetch pump.fun coin data for a mint
    CoinData {
        /// Token mint address
        #[arg(short, long)]
        mint: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.rpc_url {
        config.solana_rpc_url = url;
    }

    match cli.command {
        Commands::Simulate {
            sol,
            price,
            sell_amount,
            children,
            supply,
            decimals,
        } => {
            if let Some(count) = children {
                config.child_wallet_count = count;
            }
            if let Some(supply) = supply {
                config.initial_supply = supply;
            }
            if let Some(decimals) = decimals {
                config.default_decimals = decimals;
            }
            let params = SimulationParams {
                buy_lamports: parse_sol_amount(&sol).context("Invalid --sol")?,
                sell_quantity: parse_quantity(&sell_amount).context("Invalid --sell-amount")?,
                price: UnitPrice::from_sol_str(&price).context("Invalid --price")?,
            };
            info!(
                "Simulating on {} with {} children, buying for {}",
                config.solana_rpc_url,
                config.child_wallet_count,
                format_sol(params.buy_lamports)
            );
            let ledger = RpcLedger::new(&config).context("Failed to set up the RPC client")?;
            let report = run_simulation(&config, &ledger, &params)
                .await
                .context("Simulation failed")?;
            info!(
                "Done: {} units distributed, {} units sold back",
                report.purchase.plan.total_tokens,
                report.sale.plan.collected()
            );
        }
        Commands::PlanBuy { sol, price, children } => {
            let lamports = parse_sol_amount(&sol).context("Invalid --sol")?;
            let price = UnitPrice::from_sol_str(&price).context("Invalid --price")?;
            plan::plan_buy(lamports, &price, children)?;
        }
        Commands::PlanSell {
            amount,
            decimals,
            price,
            balances,
        } => {
            let requested = match decimals {
                Some(decimals) => parse_token_amount(&amount, decimals),
                None => parse_quantity(&amount),
            }
            .context("Invalid --amount")?;
            let price = UnitPrice::from_sol_str(&price).context("Invalid --price")?;
            plan::plan_sell(requested, &balances, &price)?;
        }
        Commands::CoinData { mint } => {
            coin_data::show_coin_data(&config, &mint)
                .await
                .with_context(|| format!("Failed to fetch coin data for {}", mint))?;
        }
    }

    Ok(())
}
