pub mod simulation;
pub mod token;
pub mod transfer;
pub mod wallet;

pub use simulation::{PurchaseOutcome, PurchasePlan, SaleOutcome, SalePlan, SimulationReport};
pub use token::{Asset, Issuance};
pub use transfer::{Transfer, TransferBatch};
pub use wallet::{TokenBalance, WalletRole};
