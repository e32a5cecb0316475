//! Pure fan-out / fan-in bookkeeping. Nothing in here touches the network.

pub mod fan_in;
pub mod fan_out;
pub mod quantity;

pub use fan_in::{collect, shortfall, Collection};
pub use fan_out::{allocate, Allocation};
pub use quantity::{parse_quantity, parse_sol_amount, parse_token_amount, UnitPrice};
