//! Shared scalers and checked-arithmetic traits for `Decimal`, `Rate` and raw
//! `U256` token amounts.

use {crate::error::RegulatorError, odra::casper_types::U256};

/// Scale of precision
pub const SCALE: usize = 18;
/// Identity
pub const WAD: u64 = 1_000_000_000_000_000_000;
/// Scale for percentages
pub const PERCENT_SCALER: u64 = 10_000_000_000_000_000;
/// Scale for basis points
pub const BIPS_SCALER: u64 = 100_000_000_000_000;
/// Basis points in one whole
pub const BIPS_DENOMINATOR: u32 = 10_000;

/// Try to subtract, return an error on underflow
pub trait TrySub: Sized {
    /// Subtract
    fn try_sub(self, rhs: Self) -> Result<Self, RegulatorError>;
}

/// Try to add, return an error on overflow
pub trait TryAdd: Sized {
    /// Add
    fn try_add(self, rhs: Self) -> Result<Self, RegulatorError>;
}

/// Try to divide, return an error on overflow or divide by zero
pub trait TryDiv<RHS>: Sized {
    /// Divide
    fn try_div(self, rhs: RHS) -> Result<Self, RegulatorError>;
}

/// Try to multiply, return an error on overflow
pub trait TryMul<RHS>: Sized {
    /// Multiply
    fn try_mul(self, rhs: RHS) -> Result<Self, RegulatorError>;
}

impl TryAdd for U256 {
    fn try_add(self, rhs: Self) -> Result<Self, RegulatorError> {
        self.checked_add(rhs).ok_or(RegulatorError::MathOverflow)
    }
}

impl TrySub for U256 {
    fn try_sub(self, rhs: Self) -> Result<Self, RegulatorError> {
        self.checked_sub(rhs).ok_or(RegulatorError::MathUnderflow)
    }
}

impl TryMul<U256> for U256 {
    fn try_mul(self, rhs: U256) -> Result<Self, RegulatorError> {
        self.checked_mul(rhs).ok_or(RegulatorError::MathOverflow)
    }
}

impl TryDiv<U256> for U256 {
    fn try_div(self, rhs: U256) -> Result<Self, RegulatorError> {
        self.checked_div(rhs).ok_or(RegulatorError::MathOverflow)
    }
}
