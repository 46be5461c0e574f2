//! Rate type for supply ratios and caps using U256

use {
    crate::{
        error::RegulatorError,
        math::{common::*, TryDiv, TryMul},
    },
    alloc::{format, string::ToString},
    core::fmt,
    odra::casper_types::U256,
};

/// Fraction of an amount as a scaled value
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Eq, Ord)]
pub struct Rate(pub U256);

impl Rate {
    /// One (100%)
    pub fn one() -> Self {
        Self(Self::wad())
    }

    /// Zero (0%)
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    fn wad() -> U256 {
        U256::from(WAD)
    }

    /// Create rate from percent value (0-100)
    pub fn from_percent(percent: u8) -> Self {
        Self(U256::from(percent as u64 * PERCENT_SCALER))
    }

    /// Create rate from basis points (0-10000)
    pub fn from_bips(bips: u32) -> Self {
        Self(U256::from(bips as u64 * BIPS_SCALER))
    }

    /// Return raw scaled value
    pub fn to_scaled_val(&self) -> U256 {
        self.0
    }

    /// Portion of `amount` covered by this rate, rounded down
    pub fn try_apply(&self, amount: U256) -> Result<U256, RegulatorError> {
        amount.try_mul(self.0)?.try_div(Self::wad())
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scaled_val = self.0.to_string();
        if scaled_val.len() <= SCALE {
            let padding = "0".repeat(SCALE - scaled_val.len());
            scaled_val = format!("0.{}{}", padding, scaled_val);
        } else {
            scaled_val.insert(scaled_val.len() - SCALE, '.');
        }
        f.write_str(&scaled_val)
    }
}
