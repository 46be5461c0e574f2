pub mod common;
pub mod decimal;
pub mod price;
pub mod rate;

pub use common::{TryAdd, TryDiv, TryMul, TrySub};
pub use decimal::Decimal;
pub use price::{PegDirection, Price};
pub use rate::Rate;
