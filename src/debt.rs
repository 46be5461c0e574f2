//! Turns outstanding coupons into redeemable credit when new supply is minted.

use {
    crate::{
        error::RegulatorError,
        math::{TryAdd, TrySub},
        state::{LedgerState, RegulatorConfig},
    },
    odra::casper_types::U256,
};

/// Result of servicing debt out of a fresh mint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebtRedemption {
    /// Principal newly made redeemable
    pub redeemed: U256,
    /// Part of the mint left for the reward split
    pub remaining: U256,
    /// Outstanding coupons absorbed the full refresh share
    pub saturated: bool,
}

/// Refresh up to `coupon_refresh_ratio` of `minted` into redeemable coupons,
/// bounded by coupons not yet made redeemable. Debt shrinks by the redeemed
/// amount, never below zero.
pub fn redeem_debt(
    ledger: &mut LedgerState,
    minted: U256,
    config: &RegulatorConfig,
) -> Result<DebtRedemption, RegulatorError> {
    let refresh = config.coupon_refresh_ratio().try_apply(minted)?;
    let outstanding = ledger.outstanding_coupons()?;
    let redeemed = refresh.min(outstanding);

    ledger.total_redeemable = ledger.total_redeemable.try_add(redeemed)?;
    ledger.total_debt = ledger.total_debt.saturating_sub(redeemed);

    log::debug!(
        "coupon refresh: minted={} refresh={} outstanding={} redeemed={}",
        minted,
        refresh,
        outstanding,
        redeemed
    );

    Ok(DebtRedemption {
        redeemed,
        remaining: minted.try_sub(redeemed)?,
        saturated: redeemed == refresh,
    })
}
