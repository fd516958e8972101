use std::{collections::HashMap, sync::Arc};

use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use crate::{
    engine::{SlotEngine, SpinOutcome},
    error::LedgerError,
    rng::RandomSource,
};

/// Where balances live between spins.
pub trait BalanceStore {
    fn read(&self, user: &str) -> Result<u64, LedgerError>;
    fn write(&self, user: &str, balance: u64) -> Result<(), LedgerError>;
    /// Credits bought outside the engine.
    fn top_up(&self, user: &str, amount: u64) -> Result<u64, LedgerError>;
}

/// In-memory balances with one lock per account, so a spin's debit and
/// credit are applied atomically with respect to other spins for that user.
#[derive(Debug, Default)]
pub struct CreditLedger {
    accounts: RwLock<HashMap<String, Arc<Mutex<u64>>>>,
}

impl CreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the account, or resets it if it already exists.
    pub fn open_account(&self, user: &str, initial: u64) {
        let mut accounts = self.accounts.write();
        match accounts.get(user) {
            Some(account) => *account.lock() = initial,
            None => {
                accounts.insert(user.to_string(), Arc::new(Mutex::new(initial)));
            }
        }
    }

    fn account(&self, user: &str) -> Result<Arc<Mutex<u64>>, LedgerError> {
        self.accounts.read().get(user).cloned().ok_or_else(|| {
            warn!(user, "unknown account");
            LedgerError::UnknownUser(user.to_string())
        })
    }

    /// Spins against the stored balance; a refused spin leaves it untouched.
    pub fn spin(
        &self,
        user: &str,
        engine: &SlotEngine,
        rng: &mut impl RandomSource,
    ) -> Result<SpinOutcome, LedgerError> {
        let account = self.account(user)?;
        let mut balance = account.lock();
        let outcome = engine.spin(*balance, rng)?;
        *balance = outcome.balance;
        Ok(outcome)
    }
}

impl BalanceStore for CreditLedger {
    fn read(&self, user: &str) -> Result<u64, LedgerError> {
        Ok(*self.account(user)?.lock())
    }

    fn write(&self, user: &str, balance: u64) -> Result<(), LedgerError> {
        *self.account(user)?.lock() = balance;
        Ok(())
    }

    fn top_up(&self, user: &str, amount: u64) -> Result<u64, LedgerError> {
        let account = self.account(user)?;
        let mut balance = account.lock();
        *balance = balance.saturating_add(amount);
        info!(user, amount, balance = *balance, "credits added");
        Ok(*balance)
    }
}
