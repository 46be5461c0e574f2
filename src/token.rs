use odra::casper_types::U256;
use odra::prelude::*;

use crate::error::RegulatorError;
use crate::math::{TryAdd, TrySub};

/// The elastic-supply Dollar. Embedded in the regulator, which is the only
/// party able to mint or burn.
#[odra::module]
pub struct Dollar {
    balances: Mapping<Address, U256>,
    total_supply: Var<U256>,
}

#[odra::module]
impl Dollar {
    /// Balance of `account`, zero when it never held Dollars
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }
}

impl Dollar {
    /// Create `amount` Dollars for `to`
    pub fn mint(&mut self, to: Address, amount: U256) -> Result<(), RegulatorError> {
        if amount.is_zero() {
            return Ok(());
        }
        let supply = self.total_supply().try_add(amount)?;
        let balance = self.balance_of(to).try_add(amount)?;
        self.total_supply.set(supply);
        self.balances.set(&to, balance);
        Ok(())
    }

    /// Destroy `amount` Dollars held by `from`
    pub fn burn(&mut self, from: Address, amount: U256) -> Result<(), RegulatorError> {
        let balance = self
            .balance_of(from)
            .try_sub(amount)
            .map_err(|_| RegulatorError::InsufficientBalance)?;
        let supply = self.total_supply().try_sub(amount)?;
        self.balances.set(&from, balance);
        self.total_supply.set(supply);
        Ok(())
    }

    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), RegulatorError> {
        let from_balance = self
            .balance_of(from)
            .try_sub(amount)
            .map_err(|_| RegulatorError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(to).try_add(amount)?;
        self.balances.set(&from, from_balance);
        self.balances.set(&to, to_balance);
        Ok(())
    }
}
