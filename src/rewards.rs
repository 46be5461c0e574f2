//! Splits newly minted Dollars between coupon redemption, the liquidity
//! incentive pool and the bonded reserve.

use {
    crate::{
        debt::{self, DebtRedemption},
        error::RegulatorError,
        math::{TryAdd, TrySub},
        state::{LedgerState, RegulatorConfig},
    },
    odra::casper_types::U256,
};

/// Where a mint went. The three parts always add up to the minted amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Routing {
    /// Made available to coupon holders
    pub to_redeemable: U256,
    /// Paid to the liquidity incentive pool
    pub to_incentive_pool: U256,
    /// Added to the bonded reserve
    pub to_bonded: U256,
}

impl Routing {
    /// Whole minted amount
    pub fn total(&self) -> Result<U256, RegulatorError> {
        self.to_redeemable
            .try_add(self.to_incentive_pool)?
            .try_add(self.to_bonded)
    }

    /// Dollars held by the regulator itself, backing bonded and redeemable
    pub fn to_reserve(&self) -> Result<U256, RegulatorError> {
        self.to_redeemable.try_add(self.to_bonded)
    }
}

/// Ledger after routing together with the split that produced it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutedMint {
    pub ledger: LedgerState,
    pub routing: Routing,
}

/// Route `minted` new Dollars. With debt or coupons to service the coupon
/// phase runs first; whatever it leaves is split between pool and bonded.
pub fn route(
    ledger: &LedgerState,
    minted: U256,
    config: &RegulatorConfig,
) -> Result<RoutedMint, RegulatorError> {
    if minted.is_zero() {
        return Ok(RoutedMint {
            ledger: ledger.clone(),
            routing: Routing::default(),
        });
    }

    let mut next = ledger.clone();
    next.total_supply = next.total_supply.try_add(minted)?;

    let routing = if ledger.has_obligations()? {
        let redemption = debt::redeem_debt(&mut next, minted, config)?;
        split_with_coupons(minted, &redemption, config)?
    } else {
        split(minted, config)?
    };

    next.total_bonded = next.total_bonded.try_add(routing.to_bonded)?;
    next.total_supply = next.total_supply.try_sub(routing.total()?)?;

    log::debug!(
        "routed mint {}: redeemable={} pool={} bonded={}",
        minted,
        routing.to_redeemable,
        routing.to_incentive_pool,
        routing.to_bonded
    );

    Ok(RoutedMint {
        ledger: next,
        routing,
    })
}

/// No-debt policy: a fixed pool share, the rest to bonded
fn split(amount: U256, config: &RegulatorConfig) -> Result<Routing, RegulatorError> {
    let to_incentive_pool = config.pool_reward_ratio().try_apply(amount)?;
    Ok(Routing {
        to_redeemable: U256::zero(),
        to_incentive_pool,
        to_bonded: amount.try_sub(to_incentive_pool)?,
    })
}

fn split_with_coupons(
    minted: U256,
    redemption: &DebtRedemption,
    config: &RegulatorConfig,
) -> Result<Routing, RegulatorError> {
    let lp_ratio = config.coupon_lp_incentive_ratio();

    if redemption.saturated {
        // the coupon phase consumes the whole mint
        let to_incentive_pool = lp_ratio.try_apply(minted)?;
        return Ok(Routing {
            to_redeemable: redemption.redeemed,
            to_incentive_pool,
            to_bonded: minted
                .try_sub(redemption.redeemed)?
                .try_sub(to_incentive_pool)?,
        });
    }

    let rest = split(redemption.remaining, config)?;
    // incentive on the refreshed coupons comes out of the bonded share
    let coupon_incentive = lp_ratio.try_apply(redemption.redeemed)?.min(rest.to_bonded);
    Ok(Routing {
        to_redeemable: redemption.redeemed,
        to_incentive_pool: rest.to_incentive_pool.try_add(coupon_incentive)?,
        to_bonded: rest.to_bonded.try_sub(coupon_incentive)?,
    })
}
