use odra::casper_types::U256;
use odra::prelude::*;

use crate::error::RegulatorError;
use crate::math::Price;

/// Price reading captured once per epoch
#[odra::odra_type]
pub struct PriceReading {
    pub numerator: U256,
    pub denominator: U256,
    /// False when the oracle considers its own reading stale or unreliable
    pub valid: bool,
}

impl PriceReading {
    /// Reading reported before any price has been published
    pub fn invalid() -> Self {
        Self {
            numerator: U256::zero(),
            denominator: U256::one(),
            valid: false,
        }
    }

    /// Usable price, or `InvalidOracleReading` when flagged invalid or the
    /// denominator is zero
    pub fn price(&self) -> Result<Price, RegulatorError> {
        if !self.valid {
            return Err(RegulatorError::InvalidOracleReading);
        }
        Price::new(self.numerator, self.denominator)
    }
}

/// Interface of any deployed Dollar price oracle
#[odra::external_contract]
pub trait PriceOracle {
    fn capture(&mut self) -> PriceReading;
}

/// Oracle whose reading is set explicitly, for tests and staging deployments
#[odra::module(events = [PriceSet])]
pub struct SettableOracle {
    reading: Var<PriceReading>,
}

#[odra::module]
impl SettableOracle {
    /// Publish the reading returned by subsequent captures
    pub fn set(&mut self, numerator: U256, denominator: U256, valid: bool) {
        self.reading.set(PriceReading {
            numerator,
            denominator,
            valid,
        });
        self.env().emit_event(PriceSet {
            numerator,
            denominator,
            valid,
            publisher: self.env().caller(),
        });
    }

    /// Current reading, invalid until the first `set`
    pub fn capture(&mut self) -> PriceReading {
        self.reading.get().unwrap_or_else(PriceReading::invalid)
    }
}

#[odra::event]
pub struct PriceSet {
    pub numerator: U256,
    pub denominator: U256,
    pub valid: bool,
    pub publisher: Address,
}
