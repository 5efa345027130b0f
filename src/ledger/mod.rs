use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountId},
    transaction::{Transaction, TransactionId},
};

pub mod audit;
pub mod in_memory;

/// Every way a ledger operation can be rejected.
///
/// A rejected operation leaves the ledger untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account {0} does not exist")]
    AccountNotFound(AccountId),
    #[error("Transaction {0} does not exist")]
    TransactionNotFound(TransactionId),
    #[error("Account {0} is inactive")]
    Inactive(AccountId),
    /// Negative where a non-negative amount is required, or an amount that
    /// would push a balance out of the representable range.
    #[error("{0} is not a valid value")]
    InvalidAmount(Decimal),
    #[error("{0} is not a positive amount")]
    NonPositiveAmount(Decimal),
    #[error("Account {0} does not have enough funds")]
    InsufficientFunds(AccountId),
}

/// Result of an update that may turn out to change nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update<T> {
    Applied(T),
    NoChange(T),
}

impl<T> Update<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Accounts and transaction log captured at the same instant.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
}

/// Owner of all accounts and of the transaction log.
///
/// Validation runs in one fixed order for every operation: source account
/// existence, source active, target existence, target active, amount, funds.
pub trait Ledger {
    fn open_account(&self, name: &str, start_balance: Decimal) -> Result<Account, LedgerError>;

    fn account(&self, id: AccountId) -> Result<Account, LedgerError>;

    fn accounts(&self) -> Vec<Account>;

    /// Returns [`Update::NoChange`] when the account already has that name.
    fn rename_account(&self, id: AccountId, name: &str) -> Result<Update<Account>, LedgerError>;

    /// Fails with [`LedgerError::Inactive`] when the account was already deactivated.
    fn deactivate(&self, id: AccountId) -> Result<Account, LedgerError>;

    fn transfer(
        &self,
        source: AccountId,
        target: AccountId,
        amount: Decimal,
        message: &str,
    ) -> Result<Transaction, LedgerError>;

    fn deposit(&self, target: AccountId, amount: Decimal) -> Result<Transaction, LedgerError>;

    fn withdraw(&self, source: AccountId, amount: Decimal) -> Result<Transaction, LedgerError>;

    fn transaction(&self, id: TransactionId) -> Result<Transaction, LedgerError>;

    fn transactions(&self) -> Vec<Transaction>;

    /// Every transaction referencing the account, in id order.
    fn account_transactions(&self, id: AccountId) -> Result<Vec<Transaction>, LedgerError>;

    fn snapshot(&self) -> LedgerSnapshot;
}
