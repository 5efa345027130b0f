use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    account::{Account, AccountId, Movement},
    transaction::{
        Posting, Transaction, TransactionId, deposit_message, opening_message, withdrawal_message,
    },
};

use super::{Ledger, LedgerError, LedgerSnapshot, Update};

#[derive(Debug, Default)]
struct LedgerState {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    next_account_id: AccountId,
    next_transaction_id: TransactionId,
}

impl LedgerState {
    fn account(&self, id: AccountId) -> Result<&Account, LedgerError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.accounts.get(idx))
            .ok_or(LedgerError::AccountNotFound(id))
    }

    fn account_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.accounts.get_mut(idx))
            .ok_or(LedgerError::AccountNotFound(id))
    }

    fn active_account(&self, id: AccountId) -> Result<&Account, LedgerError> {
        let account = self.account(id)?;
        if account.is_active() {
            Ok(account)
        } else {
            Err(LedgerError::Inactive(id))
        }
    }

    fn transaction(&self, id: TransactionId) -> Result<&Transaction, LedgerError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.transactions.get(idx))
            .ok_or(LedgerError::TransactionNotFound(id))
    }

    fn insert_account(&mut self, name: &str, balance: Decimal) -> AccountId {
        let id = self.next_account_id;
        debug_assert_eq!(usize::try_from(id).ok(), Some(self.accounts.len()));
        self.next_account_id += 1;
        self.accounts.push(Account::open(id, name, balance));
        id
    }

    fn append(
        &mut self,
        source: Option<Posting>,
        target: Option<Posting>,
        amount: Decimal,
        message: String,
    ) -> Transaction {
        let id = self.next_transaction_id;
        debug_assert_eq!(usize::try_from(id).ok(), Some(self.transactions.len()));
        self.next_transaction_id += 1;
        let tx = Transaction::new(id, source, target, amount, message);
        debug!(tx_id = id, %amount, "Transaction appended");
        self.transactions.push(tx.clone());
        tx
    }

    fn apply(&mut self, posting: &Posting) -> Result<(), LedgerError> {
        self.account_mut(posting.account)?.apply(posting);
        Ok(())
    }
}

/// Postings are computed before anything is applied, so an overflowing
/// balance rejects the whole operation.
fn plan(
    account: AccountId,
    start: Decimal,
    movement: Movement,
    amount: Decimal,
) -> Result<Posting, LedgerError> {
    movement
        .posting(account, start)
        .ok_or(LedgerError::InvalidAmount(amount))
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(LedgerError::NonPositiveAmount(amount))
    }
}

fn ensure_funds(account: &Account, amount: Decimal) -> Result<(), LedgerError> {
    if account.balance() >= amount {
        Ok(())
    } else {
        Err(LedgerError::InsufficientFunds(account.id()))
    }
}

/// Ledger kept entirely in process memory.
///
/// All mutations serialize on a single write lock held for the whole
/// validate, plan, mutate, append sequence; readers never see a balance without
/// the transaction that produced it.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ledger for InMemoryLedger {
    fn open_account(&self, name: &str, start_balance: Decimal) -> Result<Account, LedgerError> {
        info!(name, %start_balance, "Creating account");
        if start_balance < Decimal::ZERO {
            let err = LedgerError::InvalidAmount(start_balance);
            warn!(%err, "Account creation rejected");
            return Err(err);
        }

        let mut state = self.state.write();
        let id = state.insert_account(name, start_balance);
        state.append(
            None,
            Some(Posting {
                account: id,
                start: Decimal::ZERO,
                end: start_balance,
            }),
            start_balance,
            opening_message(id),
        );
        state.account(id).cloned()
    }

    fn account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.state
            .read()
            .account(id)
            .cloned()
            .inspect_err(|err| warn!(%err, "Account lookup failed"))
    }

    fn accounts(&self) -> Vec<Account> {
        self.state.read().accounts.clone()
    }

    fn rename_account(&self, id: AccountId, name: &str) -> Result<Update<Account>, LedgerError> {
        info!(account = id, name, "Renaming account");
        let mut state = self.state.write();
        let account = state
            .active_account(id)
            .inspect_err(|err| warn!(%err, "Rename rejected"))?;
        if account.name() == name {
            warn!(account = id, "Account has the same name, not changed");
            return Ok(Update::NoChange(account.clone()));
        }
        let account = state.account_mut(id)?;
        account.rename(name);
        Ok(Update::Applied(account.clone()))
    }

    fn deactivate(&self, id: AccountId) -> Result<Account, LedgerError> {
        info!(account = id, "Deactivating account");
        let mut state = self.state.write();
        state
            .active_account(id)
            .inspect_err(|err| warn!(%err, "Deactivation rejected"))?;
        let account = state.account_mut(id)?;
        account.deactivate();
        Ok(account.clone())
    }

    fn transfer(
        &self,
        source: AccountId,
        target: AccountId,
        amount: Decimal,
        message: &str,
    ) -> Result<Transaction, LedgerError> {
        info!(source, target, %amount, memo = message, "Transferring");
        let mut state = self.state.write();

        let (source_posting, target_posting) = state
            .active_account(source)
            .and_then(|source_account| {
                let target_account = state.active_account(target)?;
                ensure_positive(amount)?;
                ensure_funds(source_account, amount)?;
                let debit = plan(
                    source,
                    source_account.balance(),
                    Movement::Debit(amount),
                    amount,
                )?;
                // a self-transfer credits the already debited balance
                let target_start = if source == target {
                    debit.end
                } else {
                    target_account.balance()
                };
                let credit = plan(target, target_start, Movement::Credit(amount), amount)?;
                Ok((debit, credit))
            })
            .inspect_err(|err| warn!(%err, "Transfer rejected"))?;

        state.apply(&source_posting)?;
        state.apply(&target_posting)?;
        Ok(state.append(
            Some(source_posting),
            Some(target_posting),
            amount,
            message.to_string(),
        ))
    }

    fn deposit(&self, target: AccountId, amount: Decimal) -> Result<Transaction, LedgerError> {
        info!(target, %amount, "Depositing");
        let mut state = self.state.write();

        let posting = state
            .active_account(target)
            .and_then(|account| {
                ensure_positive(amount)?;
                plan(target, account.balance(), Movement::Credit(amount), amount)
            })
            .inspect_err(|err| warn!(%err, "Deposit rejected"))?;

        state.apply(&posting)?;
        Ok(state.append(None, Some(posting), amount, deposit_message(target, amount)))
    }

    fn withdraw(&self, source: AccountId, amount: Decimal) -> Result<Transaction, LedgerError> {
        info!(source, %amount, "Withdrawing");
        let mut state = self.state.write();

        let posting = state
            .active_account(source)
            .and_then(|account| {
                ensure_positive(amount)?;
                ensure_funds(account, amount)?;
                plan(source, account.balance(), Movement::Debit(amount), amount)
            })
            .inspect_err(|err| warn!(%err, "Withdrawal rejected"))?;

        state.apply(&posting)?;
        Ok(state.append(
            Some(posting),
            None,
            amount,
            withdrawal_message(source, amount),
        ))
    }

    fn transaction(&self, id: TransactionId) -> Result<Transaction, LedgerError> {
        self.state
            .read()
            .transaction(id)
            .cloned()
            .inspect_err(|err| warn!(%err, "Transaction lookup failed"))
    }

    fn transactions(&self) -> Vec<Transaction> {
        self.state.read().transactions.clone()
    }

    fn account_transactions(&self, id: AccountId) -> Result<Vec<Transaction>, LedgerError> {
        let state = self.state.read();
        state.account(id)?;
        Ok(state
            .transactions
            .iter()
            .filter(|tx| tx.references(id))
            .cloned()
            .collect())
    }

    fn snapshot(&self) -> LedgerSnapshot {
        let state = self.state.read();
        LedgerSnapshot {
            accounts: state.accounts.clone(),
            transactions: state.transactions.clone(),
        }
    }
}
