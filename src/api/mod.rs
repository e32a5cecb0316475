pub mod pump;

pub use pump::{CoinData, PumpClient};
