//! The epoch step as a pure function of ledger, oracle reading and config.
//! The contract in `processor` persists the returned ledger, mints the routed
//! amounts and emits the event.

use {
    crate::{
        error::RegulatorError,
        math::{Decimal, PegDirection, Price, TryAdd, TrySub},
        oracle::PriceReading,
        rewards::{self, RoutedMint, Routing},
        state::{LedgerState, RegulatorConfig},
    },
    odra::casper_types::U256,
};

/// The one terminal event of a step
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SupplyEvent {
    Increase {
        epoch: u64,
        price: Decimal,
        new_redeemable: U256,
        /// Debt still outstanding after the expansion
        less_debt: U256,
        new_bonded: U256,
    },
    Decrease {
        epoch: u64,
        price: Decimal,
        new_debt: U256,
    },
    Neutral {
        epoch: u64,
    },
}

/// Everything a committed step changes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Ledger to persist, with the epoch marked regulated
    pub ledger: LedgerState,
    pub event: SupplyEvent,
    /// Dollars to mint; all zero unless the step expanded
    pub routing: Routing,
}

/// Regulate the ledger's current epoch. The caller has already checked that
/// the epoch was not regulated before.
pub fn regulate(
    ledger: &LedgerState,
    reading: &PriceReading,
    config: &RegulatorConfig,
) -> Result<StepOutcome, RegulatorError> {
    let mut next = ledger.clone();
    next.epoch.mark_regulated();

    let reading = if ledger.epoch.is_bootstrapping(config.bootstrapping_period) {
        config.bootstrapping_reading()
    } else {
        reading.clone()
    };

    let price = match reading.price() {
        Ok(price) => price,
        Err(RegulatorError::InvalidOracleReading) => {
            log::warn!(
                "epoch {}: unusable oracle reading {}/{} (valid={}), holding supply",
                next.epoch.current,
                reading.numerator,
                reading.denominator,
                reading.valid
            );
            return Ok(neutral(next));
        }
        Err(err) => return Err(err),
    };

    let outcome = match price.direction() {
        PegDirection::AtPeg => neutral(next),
        PegDirection::Above => expand(next, &price, config)?,
        PegDirection::Below => contract(next, &price, config)?,
    };

    if let Err(err) = outcome.ledger.check_invariants() {
        log::error!(
            "epoch {}: rejecting step, ledger would be inconsistent: {:?}",
            outcome.ledger.epoch.current,
            outcome.ledger
        );
        return Err(err);
    }
    Ok(outcome)
}

fn neutral(ledger: LedgerState) -> StepOutcome {
    log::debug!("epoch {}: neutral", ledger.epoch.current);
    StepOutcome {
        event: SupplyEvent::Neutral {
            epoch: ledger.epoch.current,
        },
        ledger,
        routing: Routing::default(),
    }
}

fn expand(
    ledger: LedgerState,
    price: &Price,
    config: &RegulatorConfig,
) -> Result<StepOutcome, RegulatorError> {
    let limit = if ledger.outstanding_coupons()?.is_zero() {
        config.supply_change_limit()
    } else {
        config.coupon_supply_change_limit()
    };
    let minted = price.capped_deviation_of(ledger.net_supply()?, limit)?;
    if minted.is_zero() {
        return Ok(neutral(ledger));
    }

    let RoutedMint { ledger, routing } = rewards::route(&ledger, minted, config)?;
    let epoch = ledger.epoch.current;
    log::info!(
        "epoch {}: supply increase of {} at price {}",
        epoch,
        minted,
        price.to_decimal()
    );

    Ok(StepOutcome {
        event: SupplyEvent::Increase {
            epoch,
            price: price.to_decimal(),
            new_redeemable: routing.to_redeemable,
            less_debt: ledger.total_debt,
            new_bonded: minted.try_sub(routing.to_redeemable)?,
        },
        ledger,
        routing,
    })
}

fn contract(
    mut ledger: LedgerState,
    price: &Price,
    config: &RegulatorConfig,
) -> Result<StepOutcome, RegulatorError> {
    let new_debt =
        price.capped_deviation_of(ledger.net_supply_ex_debt()?, config.supply_change_limit())?;
    ledger.total_debt = ledger.total_debt.try_add(new_debt)?;
    let epoch = ledger.epoch.current;
    log::info!(
        "epoch {}: supply decrease, {} added to debt at price {}",
        epoch,
        new_debt,
        price.to_decimal()
    );

    Ok(StepOutcome {
        event: SupplyEvent::Decrease {
            epoch,
            price: price.to_decimal(),
            new_debt,
        },
        ledger,
        routing: Routing::default(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn u(value: u64) -> U256 {
        U256::from(value)
    }

    fn reading(numerator: u64, denominator: u64, valid: bool) -> PriceReading {
        PriceReading {
            numerator: u(numerator),
            denominator: u(denominator),
            valid,
        }
    }

    fn bonded_ledger(bonded: u64, debt: u64) -> LedgerState {
        let mut ledger = LedgerState {
            total_bonded: u(bonded),
            total_debt: u(debt),
            ..LedgerState::new()
        };
        ledger.epoch.current = 7;
        ledger
    }

    fn step(ledger: &LedgerState, reading: &PriceReading) -> StepOutcome {
        step_with(ledger, reading, &RegulatorConfig::default())
    }

    fn step_with(ledger: &LedgerState, reading: &PriceReading, config: &RegulatorConfig) -> StepOutcome {
        match regulate(ledger, reading, config) {
            Ok(outcome) => outcome,
            Err(err) => panic!("{}", err),
        }
    }

    fn event_price(numerator: u64) -> Decimal {
        match Decimal::from_ratio(u(numerator), u(100)) {
            Ok(price) => price,
            Err(err) => panic!("{}", err),
        }
    }

    #[test]
    fn capped_expansion_without_debt() {
        let outcome = step(&bonded_ledger(1_000_000, 0), &reading(115, 100, true));
        assert_eq!(outcome.routing.total().ok(), Some(u(30_000)));
        assert_eq!(outcome.routing.to_incentive_pool, u(12_000));
        assert_eq!(outcome.ledger.total_bonded, u(1_018_000));
        assert_eq!(outcome.ledger.total_supply, u(0));
        assert_eq!(outcome.ledger.total_debt, u(0));
        assert_eq!(
            outcome.event,
            SupplyEvent::Increase {
                epoch: 7,
                price: event_price(115),
                new_redeemable: u(0),
                less_debt: u(0),
                new_bonded: u(30_000),
            }
        );
    }

    #[test]
    fn uncapped_expansion_without_debt() {
        let outcome = step(&bonded_ledger(1_000_000, 0), &reading(101, 100, true));
        assert_eq!(outcome.routing.total().ok(), Some(u(10_000)));
        assert_eq!(outcome.routing.to_incentive_pool, u(4_000));
        assert_eq!(outcome.ledger.total_bonded, u(1_006_000));
    }

    #[test]
    fn contraction_under_cap() {
        let ledger = bonded_ledger(1_000_000, 0);
        let outcome = step(&ledger, &reading(99, 100, true));
        assert_eq!(outcome.ledger.total_debt, u(10_000));
        assert_eq!(outcome.ledger.total_bonded, ledger.total_bonded);
        assert_eq!(outcome.routing, Routing::default());
        assert_eq!(
            outcome.event,
            SupplyEvent::Decrease {
                epoch: 7,
                price: event_price(99),
                new_debt: u(10_000),
            }
        );
    }

    #[test]
    fn contraction_base_excludes_debt() {
        let outcome = step(&bonded_ledger(1_000_000, 100_000), &reading(95, 100, true));
        assert_eq!(outcome.ledger.total_debt, u(127_000));

        let outcome = step(&bonded_ledger(1_000_000, 100_000), &reading(99, 100, true));
        assert_eq!(outcome.ledger.total_debt, u(109_000));

        let outcome = step(&bonded_ledger(1_000_000, 0), &reading(85, 100, true));
        assert_eq!(outcome.ledger.total_debt, u(30_000));
    }

    #[test]
    fn contraction_with_debt_above_supply_adds_nothing() {
        let outcome = step(&bonded_ledger(1_000, 5_000), &reading(50, 100, true));
        assert_eq!(outcome.ledger.total_debt, u(5_000));
        assert!(matches!(outcome.event, SupplyEvent::Decrease { new_debt, .. } if new_debt.is_zero()));
    }

    #[test]
    fn invalid_reading_only_moves_marker() {
        let mut ledger = bonded_ledger(1_000_000, 2_000);
        ledger.total_coupons_issued = u(100_000);
        for bad in [reading(105, 100, false), reading(105, 0, true), reading(0, 0, false)] {
            let outcome = step(&ledger, &bad);
            assert_eq!(outcome.event, SupplyEvent::Neutral { epoch: 7 });
            assert_eq!(outcome.routing, Routing::default());
            let mut expected = ledger.clone();
            expected.epoch.last_regulated = Some(7);
            assert_eq!(outcome.ledger, expected);
        }
    }

    #[test]
    fn exact_peg_is_neutral() {
        let ledger = bonded_ledger(1_000_000, 0);
        for at_peg in [reading(100, 100, true), reading(1, 1, true), reading(37, 37, true)] {
            let outcome = step(&ledger, &at_peg);
            assert_eq!(outcome.event, SupplyEvent::Neutral { epoch: 7 });
            assert_eq!(outcome.ledger.total_bonded, ledger.total_bonded);
        }
    }

    #[test]
    fn zero_expansion_falls_through_to_neutral() {
        // 1 unit of supply at 1.01 rounds down to nothing
        let outcome = step(&bonded_ledger(1, 0), &reading(101, 100, true));
        assert_eq!(outcome.event, SupplyEvent::Neutral { epoch: 7 });

        let outcome = step(&LedgerState::new(), &reading(200, 100, true));
        assert_eq!(outcome.event, SupplyEvent::Neutral { epoch: 0 });
    }

    #[test]
    fn coupons_refresh_at_ratio() {
        let mut ledger = bonded_ledger(1_000_000, 2_000);
        ledger.total_coupons_issued = u(100_000);
        let outcome = step(&ledger, &reading(101, 100, true));
        assert_eq!(outcome.routing.to_redeemable, u(8_000));
        assert_eq!(outcome.routing.to_incentive_pool, u(2_000));
        assert_eq!(outcome.ledger.total_bonded, u(1_000_000));
        assert_eq!(outcome.ledger.total_redeemable, u(8_000));
        assert_eq!(outcome.ledger.total_debt, u(0));
        assert_eq!(
            outcome.event,
            SupplyEvent::Increase {
                epoch: 7,
                price: event_price(101),
                new_redeemable: u(8_000),
                less_debt: u(0),
                new_bonded: u(2_000),
            }
        );
    }

    #[test]
    fn coupons_refresh_then_bonded() {
        let mut ledger = bonded_ledger(1_000_000, 2_000);
        ledger.total_coupons_issued = u(2_000);
        let outcome = step(&ledger, &reading(101, 100, true));
        assert_eq!(outcome.routing.to_redeemable, u(2_000));
        assert_eq!(outcome.routing.to_incentive_pool, u(3_600));
        assert_eq!(outcome.ledger.total_bonded, u(1_004_400));
        assert_eq!(outcome.ledger.total_redeemable, u(2_000));
        assert!(matches!(
            outcome.event,
            SupplyEvent::Increase { new_redeemable, new_bonded, .. }
                if new_redeemable == u(2_000) && new_bonded == u(8_000)
        ));
    }

    #[test]
    fn outstanding_coupons_raise_expansion_cap() {
        let mut ledger = bonded_ledger(1_000_000, 2_000);
        ledger.total_coupons_issued = u(100_000);
        let outcome = step(&ledger, &reading(105, 100, true));
        assert_eq!(outcome.routing.total().ok(), Some(u(50_000)));
        assert_eq!(outcome.routing.to_redeemable, u(40_000));
        assert_eq!(outcome.routing.to_incentive_pool, u(10_000));
        assert_eq!(outcome.ledger.total_bonded, u(1_000_000));

        let outcome = step(&ledger, &reading(150, 100, true));
        assert_eq!(outcome.routing.total().ok(), Some(u(60_000)));
    }

    #[test]
    fn debt_without_coupons_keeps_standard_cap() {
        let outcome = step(&bonded_ledger(1_000_000, 2_000), &reading(105, 100, true));
        assert_eq!(outcome.routing.total().ok(), Some(u(30_000)));
        assert_eq!(outcome.ledger.total_debt, u(2_000));
        assert!(matches!(
            outcome.event,
            SupplyEvent::Increase { less_debt, .. } if less_debt == u(2_000)
        ));
    }

    #[test]
    fn delta_never_exceeds_cap() {
        let ledger = bonded_ledger(1_000_000, 0);
        for numerator in [101u64, 103, 104, 200, 1_000, 1_000_000] {
            let outcome = step(&ledger, &reading(numerator, 100, true));
            let minted = outcome.routing.total().ok();
            assert!(minted <= Some(u(30_000)));
        }
        for numerator in [0u64, 1, 50, 96, 97, 99] {
            let outcome = step(&ledger, &reading(numerator, 100, true));
            assert!(outcome.ledger.total_debt <= u(30_000));
        }
    }

    #[test]
    fn extreme_prices_settle_at_cap() {
        let ledger = bonded_ledger(1_000_000, 0);
        let soaring = PriceReading {
            numerator: U256::max_value(),
            denominator: u(1),
            valid: true,
        };
        let outcome = step(&ledger, &soaring);
        assert_eq!(outcome.routing.total().ok(), Some(u(30_000)));
        assert!(matches!(
            outcome.event,
            SupplyEvent::Increase { price, .. } if price == Decimal(U256::max_value())
        ));

        let collapsed = PriceReading {
            numerator: u(1),
            denominator: U256::max_value(),
            valid: true,
        };
        let outcome = step(&ledger, &collapsed);
        assert_eq!(outcome.ledger.total_debt, u(30_000));
    }

    #[test]
    fn custom_cap_is_honoured() {
        let config = RegulatorConfig {
            supply_change_limit_bips: 50,
            ..RegulatorConfig::default()
        };
        let outcome = step_with(&bonded_ledger(1_000_000, 0), &reading(115, 100, true), &config);
        assert_eq!(outcome.routing.total().ok(), Some(u(5_000)));
    }

    #[test]
    fn bootstrapping_ignores_oracle() {
        let config = RegulatorConfig {
            bootstrapping_period: 5,
            ..RegulatorConfig::default()
        };
        let mut ledger = bonded_ledger(1_000_000, 0);
        ledger.epoch.current = 3;
        let outcome = step_with(&ledger, &reading(50, 100, false), &config);
        assert_eq!(outcome.routing.total().ok(), Some(u(30_000)));
        assert!(matches!(outcome.event, SupplyEvent::Increase { epoch: 3, .. }));

        ledger.epoch.current = 6;
        let outcome = step_with(&ledger, &reading(50, 100, false), &config);
        assert_eq!(outcome.event, SupplyEvent::Neutral { epoch: 6 });
    }

    #[test]
    fn overflow_aborts_step() {
        let ledger = LedgerState {
            total_bonded: U256::max_value(),
            total_supply: u(1),
            ..LedgerState::new()
        };
        assert!(matches!(
            regulate(&ledger, &reading(101, 100, true), &RegulatorConfig::default()),
            Err(RegulatorError::MathOverflow)
        ));
    }

    #[test]
    fn inconsistent_ledger_is_rejected() {
        let ledger = LedgerState {
            total_bonded: u(1_000_000),
            total_coupons_issued: u(10),
            total_redeemable: u(20),
            ..LedgerState::new()
        };
        assert!(matches!(
            regulate(&ledger, &reading(100, 100, true), &RegulatorConfig::default()),
            Err(RegulatorError::InconsistentLedger)
        ));
        assert!(matches!(
            regulate(&ledger, &reading(105, 100, true), &RegulatorConfig::default()),
            Err(RegulatorError::InconsistentLedger)
        ));
    }

    #[test]
    fn every_step_marks_epoch() {
        let ledger = bonded_ledger(1_000_000, 0);
        for price in [reading(115, 100, true), reading(95, 100, true), reading(1, 1, true), reading(1, 1, false)] {
            let outcome = step(&ledger, &price);
            assert!(outcome.ledger.epoch.is_regulated());
            assert!(outcome.ledger.check_invariants().is_ok());
        }
    }
}
