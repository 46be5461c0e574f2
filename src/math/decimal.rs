//! Large decimal values, precise to 18 digits. Used to report prices in
//! events at a fixed scale.

use {
    crate::{
        error::RegulatorError,
        math::{common::*, TryDiv, TryMul},
    },
    alloc::string::ToString,
    core::fmt,
    odra::casper_types::U256,
};

/// Large decimal values, precise to 18 digits
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Eq, Ord)]
pub struct Decimal(pub U256);

impl Decimal {
    /// One
    pub fn one() -> Self {
        Self(Self::wad())
    }

    fn wad() -> U256 {
        U256::from(WAD)
    }

    /// Exact `numerator / denominator`, floored at the 18th digit
    pub fn from_ratio(numerator: U256, denominator: U256) -> Result<Self, RegulatorError> {
        if denominator.is_zero() {
            return Err(RegulatorError::InvalidOracleReading);
        }
        Ok(Self(numerator.try_mul(Self::wad())?.try_div(denominator)?))
    }

    /// Return raw scaled value
    #[allow(clippy::wrong_self_convention)]
    pub fn to_scaled_val(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scaled_val = self.0.to_string();
        if scaled_val.len() <= SCALE {
            let padding = "0".repeat(SCALE - scaled_val.len());
            scaled_val.insert_str(0, &padding);
            scaled_val.insert_str(0, "0.");
        } else {
            scaled_val.insert(scaled_val.len() - SCALE, '.');
        }
        f.write_str(&scaled_val)
    }
}
