use core::fmt;

/// Errors raised by the regulator, its ledger and the Dollar token.
#[odra::odra_error]
pub enum RegulatorError {
    // 0
    InvalidConfig = 0,
    InvalidAmount = 1,
    MathOverflow = 2,
    MathUnderflow = 3,
    InvalidOracleReading = 4,

    // 5
    OracleNotSet = 5,
    InconsistentLedger = 6,
    CouponsExceedDebt = 7,
    InsufficientCoupons = 8,
    InsufficientRedeemable = 9,

    // 10
    InsufficientBalance = 10,
    EpochOverflow = 11,
}

impl RegulatorError {
    /// Human readable description
    pub fn message(&self) -> &str {
        match self {
            RegulatorError::InvalidConfig => "Regulator config value is invalid",
            RegulatorError::InvalidAmount => "Input amount is invalid",
            RegulatorError::MathOverflow => "Math operation overflow",
            RegulatorError::MathUnderflow => "Math operation underflow",
            RegulatorError::InvalidOracleReading => "Oracle reading is invalid or has a zero denominator",
            RegulatorError::OracleNotSet => "Price oracle address is not set",
            RegulatorError::InconsistentLedger => "Ledger totals violate the coupon accounting invariant",
            RegulatorError::CouponsExceedDebt => "Coupon purchase exceeds outstanding debt",
            RegulatorError::InsufficientCoupons => "Coupon balance too small for redemption",
            RegulatorError::InsufficientRedeemable => "Not enough redeemable supply for redemption",
            RegulatorError::InsufficientBalance => "Dollar balance too small",
            RegulatorError::EpochOverflow => "Epoch counter overflow",
        }
    }
}

impl fmt::Display for RegulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
