//! Coupon batch accounting. Batches are keyed by `(account, issuance_epoch)`
//! in contract storage; the functions here work on one batch balance and the
//! ledger totals and leave persistence to the caller.

use {
    crate::{
        error::RegulatorError,
        math::{TryAdd, TrySub},
        state::LedgerState,
    },
    odra::casper_types::U256,
};

/// Ledger and batch balance after a coupon operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CouponUpdate {
    pub ledger: LedgerState,
    pub batch_balance: U256,
}

/// Exchange `amount` burned Dollars for coupons against outstanding debt.
/// The buyer's Dollar balance is checked by the token burn, not here.
pub fn purchase(
    ledger: &LedgerState,
    batch_balance: U256,
    amount: U256,
) -> Result<CouponUpdate, RegulatorError> {
    if amount.is_zero() {
        return Err(RegulatorError::InvalidAmount);
    }
    if amount > ledger.total_debt {
        return Err(RegulatorError::CouponsExceedDebt);
    }

    let mut next = ledger.clone();
    next.total_debt = next.total_debt.try_sub(amount)?;
    // incentive pool payouts circulate without being counted in total_supply
    next.total_supply = next.total_supply.saturating_sub(amount);
    next.total_coupons_issued = next.total_coupons_issued.try_add(amount)?;
    next.check_invariants()?;

    Ok(CouponUpdate {
        ledger: next,
        batch_balance: batch_balance.try_add(amount)?,
    })
}

/// Convert `amount` of a batch into Dollars out of the redeemable pool
pub fn redeem(
    ledger: &LedgerState,
    batch_balance: U256,
    amount: U256,
) -> Result<CouponUpdate, RegulatorError> {
    if amount.is_zero() {
        return Err(RegulatorError::InvalidAmount);
    }
    if amount > batch_balance {
        return Err(RegulatorError::InsufficientCoupons);
    }
    if amount > ledger.total_redeemable {
        return Err(RegulatorError::InsufficientRedeemable);
    }

    let mut next = ledger.clone();
    next.total_redeemable = next.total_redeemable.try_sub(amount)?;
    next.total_coupons_redeemed = next.total_coupons_redeemed.try_add(amount)?;
    next.total_supply = next.total_supply.try_add(amount)?;
    next.check_invariants()?;

    Ok(CouponUpdate {
        ledger: next,
        batch_balance: batch_balance.try_sub(amount)?,
    })
}
