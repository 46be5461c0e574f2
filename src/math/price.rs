//! Exact rational price relative to the 1.0 peg.

use {
    crate::{
        error::RegulatorError,
        math::{common::WAD, Decimal, Rate, TryDiv, TryMul, TrySub},
    },
    core::cmp::Ordering,
    odra::casper_types::U256,
};

/// Where a price sits relative to the peg
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PegDirection {
    /// Numerator greater than denominator
    Above,
    /// Exactly 1.0
    AtPeg,
    Below,
}

/// `numerator / denominator` exactly as reported, never normalized through
/// floating point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Price {
    numerator: U256,
    denominator: U256,
}

impl Price {
    /// Build a price; a zero denominator is not a price
    pub fn new(numerator: U256, denominator: U256) -> Result<Self, RegulatorError> {
        if denominator.is_zero() {
            return Err(RegulatorError::InvalidOracleReading);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Raw numerator of the reading
    pub fn numerator(&self) -> U256 {
        self.numerator
    }

    /// Raw denominator of the reading, never zero
    pub fn denominator(&self) -> U256 {
        self.denominator
    }

    /// Exact comparison against the peg
    pub fn direction(&self) -> PegDirection {
        match self.numerator.cmp(&self.denominator) {
            Ordering::Greater => PegDirection::Above,
            Ordering::Equal => PegDirection::AtPeg,
            Ordering::Less => PegDirection::Below,
        }
    }

    /// `|numerator - denominator|`
    fn spread(&self) -> Result<U256, RegulatorError> {
        match self.direction() {
            PegDirection::Above => self.numerator.try_sub(self.denominator),
            PegDirection::Below => self.denominator.try_sub(self.numerator),
            PegDirection::AtPeg => Ok(U256::zero()),
        }
    }

    /// `amount * |price - 1|`, rounded down
    pub fn deviation_of(&self, amount: U256) -> Result<U256, RegulatorError> {
        amount.try_mul(self.spread()?)?.try_div(self.denominator)
    }

    /// `min(amount * |price - 1|, amount * limit)`, rounded down. The spread is
    /// compared with the limit before scaling, so a price of any size past
    /// the limit yields the cap.
    pub fn capped_deviation_of(&self, amount: U256, limit: Rate) -> Result<U256, RegulatorError> {
        let cap = limit.try_apply(amount)?;
        // spread / denominator >= limit / WAD
        let at_cap = match self.spread()?.try_mul(U256::from(WAD)) {
            Ok(scaled) => scaled >= self.denominator.saturating_mul(limit.to_scaled_val()),
            Err(_) => true,
        };
        if at_cap {
            return Ok(cap);
        }
        Ok(self.deviation_of(amount)?.min(cap))
    }

    /// Price at 18-decimal fixed point, as reported in supply events. Falls
    /// back to a coarser division when `numerator * 10^18` does not fit, and
    /// saturates when even that overflows.
    pub fn to_decimal(&self) -> Decimal {
        match Decimal::from_ratio(self.numerator, self.denominator) {
            Ok(decimal) => decimal,
            Err(_) => {
                let coarse = self.denominator / U256::from(WAD);
                if coarse.is_zero() {
                    Decimal(U256::max_value())
                } else {
                    Decimal(self.numerator / coarse)
                }
            }
        }
    }
}
