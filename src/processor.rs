//! The Dollar regulator contract: epoch steps, coupon entry points and the
//! embedded Dollar token.

use odra::casper_types::U256;
use odra::prelude::*;
use odra::ContractRef;

use crate::error::RegulatorError;
use crate::oracle::PriceOracleContractRef;
use crate::policy::{self, SupplyEvent};
use crate::state::{coupons, LedgerState, RegulatorConfig};
use crate::token::Dollar;

#[odra::module(
    events = [SupplyIncrease, SupplyDecrease, SupplyNeutral, CouponPurchase, CouponRedemption],
    errors = RegulatorError
)]
pub struct Regulator {
    ledger: Var<LedgerState>,
    config: Var<RegulatorConfig>,
    oracle: Var<Address>,
    /// Receives the liquidity incentive share of every expansion
    pool: Var<Address>,
    /// Coupon batches keyed by holder and issuance epoch
    coupons: Mapping<(Address, u64), U256>,
    dollar: SubModule<Dollar>,
}

#[odra::module]
impl Regulator {
    /// Validate `config`, mint the genesis bonded reserve to the contract and
    /// the genesis circulating supply to the deployer
    pub fn init(
        &mut self,
        oracle: Address,
        pool: Address,
        config: RegulatorConfig,
        genesis_bonded: U256,
        genesis_supply: U256,
    ) {
        let r = config.validate();
        self.ok_or_revert(r);

        let ledger = LedgerState {
            total_bonded: genesis_bonded,
            total_supply: genesis_supply,
            ..LedgerState::new()
        };
        let reserve = self.env().self_address();
        let deployer = self.env().caller();
        let r = self.dollar.mint(reserve, genesis_bonded);
        self.ok_or_revert(r);
        let r = self.dollar.mint(deployer, genesis_supply);
        self.ok_or_revert(r);

        self.oracle.set(oracle);
        self.pool.set(pool);
        self.config.set(config);
        self.ledger.set(ledger);
    }

    // ===========================================================================
    // EPOCH
    // ===========================================================================

    /// Move to the next epoch and regulate it
    pub fn advance(&mut self) {
        let mut ledger = self.ledger_state();
        let r = ledger.epoch.advance();
        let epoch = self.ok_or_revert(r);
        log::debug!("advanced to epoch {}", epoch);
        self.ledger.set(ledger);
        self.step();
    }

    /// Regulate the current epoch. A second call within the same epoch does
    /// nothing, not even an oracle read.
    pub fn step(&mut self) {
        let ledger = self.ledger_state();
        if ledger.epoch.is_regulated() {
            log::debug!("epoch {} already regulated", ledger.epoch.current);
            return;
        }

        let oracle = match self.oracle.get() {
            Some(oracle) => oracle,
            None => self.env().revert(RegulatorError::OracleNotSet),
        };
        let reading = PriceOracleContractRef::new(self.env().clone(), oracle).capture();

        let r = policy::regulate(&ledger, &reading, &self.config_state());
        let outcome = self.ok_or_revert(r);

        let r = outcome.routing.to_reserve();
        let to_reserve = self.ok_or_revert(r);
        let reserve = self.env().self_address();
        let r = self.dollar.mint(reserve, to_reserve);
        self.ok_or_revert(r);
        let pool = self.pool();
        let r = self.dollar.mint(pool, outcome.routing.to_incentive_pool);
        self.ok_or_revert(r);

        self.ledger.set(outcome.ledger);
        self.emit_supply_event(outcome.event);
    }

    // ===========================================================================
    // COUPONS
    // ===========================================================================

    /// Burn `amount` Dollars of the caller for coupons of the current epoch
    pub fn purchase_coupons(&mut self, amount: U256) {
        let caller = self.env().caller();
        let ledger = self.ledger_state();
        let epoch = ledger.epoch.current;
        let key = (caller, epoch);

        let r = coupons::purchase(&ledger, self.coupons.get_or_default(&key), amount);
        let update = self.ok_or_revert(r);
        let r = self.dollar.burn(caller, amount);
        self.ok_or_revert(r);

        self.coupons.set(&key, update.batch_balance);
        self.ledger.set(update.ledger);
        log::info!("epoch {}: {} coupons purchased", epoch, amount);
        self.env().emit_event(CouponPurchase {
            account: caller,
            epoch,
            amount,
        });
    }

    /// Convert `amount` coupons issued in `coupon_epoch` back into Dollars
    pub fn redeem_coupons(&mut self, coupon_epoch: u64, amount: U256) {
        let caller = self.env().caller();
        let key = (caller, coupon_epoch);

        let r = coupons::redeem(&self.ledger_state(), self.coupons.get_or_default(&key), amount);
        let update = self.ok_or_revert(r);
        let reserve = self.env().self_address();
        let r = self.dollar.transfer(reserve, caller, amount);
        self.ok_or_revert(r);

        self.coupons.set(&key, update.batch_balance);
        self.ledger.set(update.ledger);
        log::info!("{} coupons of epoch {} redeemed", amount, coupon_epoch);
        self.env().emit_event(CouponRedemption {
            account: caller,
            epoch: coupon_epoch,
            amount,
        });
    }

    // ===========================================================================
    // TOKEN
    // ===========================================================================

    /// Move `amount` Dollars from the caller to `recipient`
    pub fn transfer(&mut self, recipient: Address, amount: U256) {
        let caller = self.env().caller();
        let r = self.dollar.transfer(caller, recipient, amount);
        self.ok_or_revert(r);
    }

    /// Dollar balance of `account`
    pub fn balance_of(&self, account: Address) -> U256 {
        self.dollar.balance_of(account)
    }

    /// Dollars in existence, reserve and pool holdings included
    pub fn dollar_total_supply(&self) -> U256 {
        self.dollar.total_supply()
    }

    // ===========================================================================
    // GETTERS
    // ===========================================================================

    /// Epoch the next step regulates
    pub fn epoch(&self) -> u64 {
        self.ledger_state().epoch.current
    }

    pub fn last_regulated_epoch(&self) -> Option<u64> {
        self.ledger_state().epoch.last_regulated
    }

    /// Circulating supply as tracked by the ledger, excluding reserve and pool
    pub fn total_supply(&self) -> U256 {
        self.ledger_state().total_supply
    }

    pub fn total_bonded(&self) -> U256 {
        self.ledger_state().total_bonded
    }

    pub fn total_staged(&self) -> U256 {
        self.ledger_state().total_staged
    }

    pub fn total_debt(&self) -> U256 {
        self.ledger_state().total_debt
    }

    /// Coupon principal ever issued
    pub fn total_coupons(&self) -> U256 {
        self.ledger_state().total_coupons_issued
    }

    pub fn total_coupons_redeemed(&self) -> U256 {
        self.ledger_state().total_coupons_redeemed
    }

    pub fn total_redeemable(&self) -> U256 {
        self.ledger_state().total_redeemable
    }

    /// Coupons `account` holds from the batch issued in `epoch`
    pub fn balance_of_coupons(&self, account: Address, epoch: u64) -> U256 {
        self.coupons.get_or_default(&(account, epoch))
    }

    pub fn config(&self) -> RegulatorConfig {
        self.config_state()
    }

    pub fn oracle(&self) -> Option<Address> {
        self.oracle.get()
    }

    /// Liquidity incentive pool address
    pub fn pool(&self) -> Address {
        match self.pool.get() {
            Some(pool) => pool,
            None => self.env().revert(RegulatorError::InvalidConfig),
        }
    }
}

impl Regulator {
    fn ok_or_revert<T>(&self, result: Result<T, RegulatorError>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => self.env().revert(err),
        }
    }

    fn ledger_state(&self) -> LedgerState {
        self.ledger.get_or_default()
    }

    fn config_state(&self) -> RegulatorConfig {
        self.config.get_or_default()
    }

    fn emit_supply_event(&self, event: SupplyEvent) {
        match event {
            SupplyEvent::Increase {
                epoch,
                price,
                new_redeemable,
                less_debt,
                new_bonded,
            } => self.env().emit_event(SupplyIncrease {
                epoch,
                price: price.to_scaled_val(),
                new_redeemable,
                less_debt,
                new_bonded,
            }),
            SupplyEvent::Decrease {
                epoch,
                price,
                new_debt,
            } => self.env().emit_event(SupplyDecrease {
                epoch,
                price: price.to_scaled_val(),
                new_debt,
            }),
            SupplyEvent::Neutral { epoch } => self.env().emit_event(SupplyNeutral { epoch }),
        }
    }
}

/// Expansion. `price` is an 18-decimal fixed point value.
#[odra::event]
pub struct SupplyIncrease {
    pub epoch: u64,
    pub price: U256,
    pub new_redeemable: U256,
    pub less_debt: U256,
    pub new_bonded: U256,
}

#[odra::event]
pub struct SupplyDecrease {
    pub epoch: u64,
    pub price: U256,
    pub new_debt: U256,
}

#[odra::event]
pub struct SupplyNeutral {
    pub epoch: u64,
}

#[odra::event]
pub struct CouponPurchase {
    pub account: Address,
    pub epoch: u64,
    pub amount: U256,
}

#[odra::event]
pub struct CouponRedemption {
    pub account: Address,
    pub epoch: u64,
    pub amount: U256,
}
