use {
    crate::{
        error::RegulatorError,
        math::{TryAdd, TrySub},
        state::EpochClock,
    },
    odra::casper_types::U256,
};

/// Regulator-wide accounting totals. Stored as a single value so a step
/// commits every field at once.
#[odra::odra_type]
pub struct LedgerState {
    /// Dollars in free circulation, outside the bonded and redeemable pools
    pub total_supply: U256,
    /// Dollars held by the reserve on behalf of bonders
    pub total_bonded: U256,
    pub total_staged: U256,
    /// Contraction-era obligation not yet serviced by an expansion
    pub total_debt: U256,
    /// Cumulative coupon principal ever issued
    pub total_coupons_issued: U256,
    /// Cumulative coupon principal paid out to holders
    pub total_coupons_redeemed: U256,
    /// Coupon principal currently convertible to Dollars
    pub total_redeemable: U256,
    pub epoch: EpochClock,
}

impl LedgerState {
    /// All-zero ledger at epoch zero
    pub fn new() -> Self {
        Self {
            total_supply: U256::zero(),
            total_bonded: U256::zero(),
            total_staged: U256::zero(),
            total_debt: U256::zero(),
            total_coupons_issued: U256::zero(),
            total_coupons_redeemed: U256::zero(),
            total_redeemable: U256::zero(),
            epoch: EpochClock::new(),
        }
    }

    /// Bonded + staged + circulating, the base for expansion caps
    pub fn net_supply(&self) -> Result<U256, RegulatorError> {
        self.total_bonded
            .try_add(self.total_staged)?
            .try_add(self.total_supply)
    }

    /// Net supply less debt, clamped at zero, the base for contraction caps
    pub fn net_supply_ex_debt(&self) -> Result<U256, RegulatorError> {
        Ok(self.net_supply()?.saturating_sub(self.total_debt))
    }

    /// Coupon principal issued but neither redeemed nor yet made redeemable
    pub fn outstanding_coupons(&self) -> Result<U256, RegulatorError> {
        self.total_coupons_issued
            .try_sub(self.total_coupons_redeemed)
            .and_then(|unpaid| unpaid.try_sub(self.total_redeemable))
            .map_err(|_| RegulatorError::InconsistentLedger)
    }

    /// Debt to service or coupons waiting for refresh
    pub fn has_obligations(&self) -> Result<bool, RegulatorError> {
        Ok(!self.total_debt.is_zero() || !self.outstanding_coupons()?.is_zero())
    }

    /// Redeemable principal never exceeds issued-minus-redeemed coupons
    pub fn check_invariants(&self) -> Result<(), RegulatorError> {
        self.outstanding_coupons().map(|_| ())
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new()
    }
}
