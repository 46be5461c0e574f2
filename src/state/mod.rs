// Ledger, epoch clock and configuration of the regulator

pub mod config;
pub mod coupons;
pub mod epoch;
pub mod ledger;

pub use config::RegulatorConfig;
pub use epoch::EpochClock;
pub use ledger::LedgerState;
