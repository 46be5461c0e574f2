use {
    crate::{
        error::RegulatorError,
        math::{common::BIPS_DENOMINATOR, Rate},
        oracle::PriceReading,
    },
    odra::casper_types::U256,
};

/// Cap on a single epoch's supply change, in basis points of net supply
pub const SUPPLY_CHANGE_LIMIT_BIPS: u32 = 300;
/// Cap used for expansions while purchased coupons still await refresh
pub const COUPON_SUPPLY_CHANGE_LIMIT_BIPS: u32 = 600;
/// Share of a mint made redeemable while coupons are outstanding
pub const COUPON_REFRESH_PERCENT: u8 = 80;
/// Incentive pool share paid alongside coupon refreshes
pub const COUPON_LP_INCENTIVE_PERCENT: u8 = 20;
/// Incentive pool share of a mint with no coupons to refresh
pub const POOL_REWARD_PERCENT: u8 = 40;

/// Regulation parameters fixed at deployment
#[odra::odra_type]
#[cfg_attr(
    not(target_arch = "wasm32"),
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct RegulatorConfig {
    pub supply_change_limit_bips: u32,
    pub coupon_supply_change_limit_bips: u32,
    pub coupon_refresh_percent: u8,
    pub coupon_lp_incentive_percent: u8,
    pub pool_reward_percent: u8,
    /// Number of leading epochs that ignore the oracle, 0 disables
    pub bootstrapping_period: u64,
    /// Price used while bootstrapping, as a percentage of the peg
    pub bootstrapping_price_percent: u32,
}

impl Default for RegulatorConfig {
    fn default() -> Self {
        Self {
            supply_change_limit_bips: SUPPLY_CHANGE_LIMIT_BIPS,
            coupon_supply_change_limit_bips: COUPON_SUPPLY_CHANGE_LIMIT_BIPS,
            coupon_refresh_percent: COUPON_REFRESH_PERCENT,
            coupon_lp_incentive_percent: COUPON_LP_INCENTIVE_PERCENT,
            pool_reward_percent: POOL_REWARD_PERCENT,
            bootstrapping_period: 0,
            bootstrapping_price_percent: 110,
        }
    }
}

impl RegulatorConfig {
    /// Reject limits above 100% and a bootstrapping window without a price
    pub fn validate(&self) -> Result<(), RegulatorError> {
        if self.supply_change_limit_bips > BIPS_DENOMINATOR {
            return Err(RegulatorError::InvalidConfig);
        }
        if self.coupon_supply_change_limit_bips > BIPS_DENOMINATOR {
            return Err(RegulatorError::InvalidConfig);
        }
        if self.pool_reward_percent > 100 {
            return Err(RegulatorError::InvalidConfig);
        }
        // the coupon phase may never hand out more than it minted
        if self.coupon_refresh_percent as u16 + self.coupon_lp_incentive_percent as u16 > 100 {
            return Err(RegulatorError::InvalidConfig);
        }
        if self.bootstrapping_period > 0 && self.bootstrapping_price_percent == 0 {
            return Err(RegulatorError::InvalidConfig);
        }
        Ok(())
    }

    /// Cap on a single step's supply change
    pub fn supply_change_limit(&self) -> Rate {
        Rate::from_bips(self.supply_change_limit_bips)
    }

    /// Expansion cap while coupons are outstanding
    pub fn coupon_supply_change_limit(&self) -> Rate {
        Rate::from_bips(self.coupon_supply_change_limit_bips)
    }

    pub fn coupon_refresh_ratio(&self) -> Rate {
        Rate::from_percent(self.coupon_refresh_percent)
    }

    pub fn coupon_lp_incentive_ratio(&self) -> Rate {
        Rate::from_percent(self.coupon_lp_incentive_percent)
    }

    pub fn pool_reward_ratio(&self) -> Rate {
        Rate::from_percent(self.pool_reward_percent)
    }

    /// Synthetic oracle reading used during the bootstrapping window
    pub fn bootstrapping_reading(&self) -> PriceReading {
        PriceReading {
            numerator: U256::from(self.bootstrapping_price_percent),
            denominator: U256::from(100u64),
            valid: true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RegulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.supply_change_limit(), Rate::from_percent(3));
        assert_eq!(config.coupon_supply_change_limit(), Rate::from_percent(6));
        assert_eq!(config.pool_reward_ratio(), Rate::from_percent(40));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let bad_cap = RegulatorConfig {
            supply_change_limit_bips: 10_001,
            ..RegulatorConfig::default()
        };
        assert!(matches!(bad_cap.validate(), Err(RegulatorError::InvalidConfig)));

        let bad_pool = RegulatorConfig {
            pool_reward_percent: 101,
            ..RegulatorConfig::default()
        };
        assert!(matches!(bad_pool.validate(), Err(RegulatorError::InvalidConfig)));

        let overcommitted = RegulatorConfig {
            coupon_refresh_percent: 90,
            coupon_lp_incentive_percent: 20,
            ..RegulatorConfig::default()
        };
        assert!(matches!(overcommitted.validate(), Err(RegulatorError::InvalidConfig)));

        let free_bootstrap = RegulatorConfig {
            bootstrapping_period: 5,
            bootstrapping_price_percent: 0,
            ..RegulatorConfig::default()
        };
        assert!(matches!(free_bootstrap.validate(), Err(RegulatorError::InvalidConfig)));
    }

    #[test]
    fn bootstrapping_reading_is_valid_premium() {
        let reading = RegulatorConfig::default().bootstrapping_reading();
        assert!(reading.valid);
        assert_eq!(reading.numerator, U256::from(110u64));
        assert_eq!(reading.denominator, U256::from(100u64));
    }
}
