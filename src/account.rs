use rust_decimal::Decimal;
use serde::Serialize;

use crate::transaction::Posting;

pub type AccountId = u64;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// Balance change applied to a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Credit(Decimal),
    Debit(Decimal),
}

impl Movement {
    /// Before/after snapshot of the movement applied on top of `start`.
    ///
    /// `None` when the resulting balance does not fit in a [`Decimal`].
    pub(crate) fn posting(self, account: AccountId, start: Decimal) -> Option<Posting> {
        let end = match self {
            Movement::Credit(amount) => start.checked_add(amount)?,
            Movement::Debit(amount) => start.checked_sub(amount)?,
        };
        Some(Posting {
            account,
            start,
            end,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    name: String,
    balance: Decimal,
    status: AccountStatus,
}

impl Account {
    pub(crate) fn open(id: AccountId, name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            status: AccountStatus::Active,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Moves the balance to the end of a posting computed beforehand.
    ///
    /// No validation happens here: the ledger checks status, funds and
    /// overflow before any posting is applied.
    pub(crate) fn apply(&mut self, posting: &Posting) {
        debug_assert_eq!(posting.account, self.id);
        debug_assert_eq!(posting.start, self.balance);
        self.balance = posting.end;
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn deactivate(&mut self) {
        self.status = AccountStatus::Inactive;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn open_account_is_active() {
        let acc = Account::open(3, "savings", dec!(12.5));
        assert_eq!(acc.id(), 3);
        assert_eq!(acc.name(), "savings");
        assert_eq!(acc.balance(), dec!(12.5));
        assert!(acc.is_active());
    }

    #[test]
    fn apply_movements() {
        let mut acc = Account::open(0, "main", dec!(10));

        let posting = Movement::Credit(dec!(5)).posting(acc.id(), acc.balance()).unwrap();
        assert_eq!(posting.account, 0);
        assert_eq!(posting.start, dec!(10));
        assert_eq!(posting.end, dec!(15));
        // planning alone does not touch the balance
        assert_eq!(acc.balance(), dec!(10));
        acc.apply(&posting);

        let posting = Movement::Debit(dec!(7.25)).posting(acc.id(), acc.balance()).unwrap();
        assert_eq!(posting.start, dec!(15));
        assert_eq!(posting.end, dec!(7.75));
        acc.apply(&posting);
        assert_eq!(acc.balance(), dec!(7.75));
    }

    #[test]
    fn overflowing_movement_has_no_posting() {
        assert_eq!(Movement::Credit(dec!(1)).posting(0, Decimal::MAX), None);
        assert_eq!(Movement::Debit(dec!(1)).posting(0, Decimal::MIN), None);
        assert!(Movement::Debit(dec!(1)).posting(0, Decimal::MAX).is_some());
    }

    #[test]
    fn deactivation_is_terminal() {
        let mut acc = Account::open(0, "main", dec!(0));
        acc.deactivate();
        assert_eq!(acc.status(), AccountStatus::Inactive);
        acc.deactivate();
        assert!(!acc.is_active());
    }
}
