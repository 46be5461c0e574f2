#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]

//! An elastic-supply Dollar regulator for the casper blockchain.

extern crate alloc;

pub mod debt;
pub mod error;
pub mod math;
pub mod oracle;
pub mod policy;
pub mod processor;
pub mod rewards;
pub mod state;
pub mod token;

pub use error::RegulatorError;
pub use oracle::{PriceReading, SettableOracle};
pub use processor::Regulator;
pub use state::{LedgerState, RegulatorConfig};
pub use token::Dollar;
