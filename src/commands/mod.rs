pub mod buy;
pub mod coin_data;
pub mod mint;
pub mod plan;
pub mod sell;
pub mod simulate;

pub use buy::{plan_purchase, purchase_quantity, simulate_purchase};
pub use mint::issue_asset;
pub use sell::{plan_sale, simulate_sell, snapshot_balances};
pub use simulate::{run_simulation, SimulationParams};
