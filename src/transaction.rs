use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::AccountId;

pub type TransactionId = u64;

/// Balance of one account right before and right after a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub account: AccountId,
    pub start: Decimal,
    pub end: Decimal,
}

/// Immutable record of a single balance change.
///
/// Snapshot fields of an absent side (no source for deposits, no target for
/// withdrawals) are zero.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    source_account_id: Option<AccountId>,
    target_account_id: Option<AccountId>,
    amount: Decimal,
    source_account_start_balance: Decimal,
    source_account_end_balance: Decimal,
    target_account_start_balance: Decimal,
    target_account_end_balance: Decimal,
    message: String,
}

impl Transaction {
    pub(crate) fn new(
        id: TransactionId,
        source: Option<Posting>,
        target: Option<Posting>,
        amount: Decimal,
        message: String,
    ) -> Self {
        Self {
            id,
            source_account_id: source.map(|p| p.account),
            target_account_id: target.map(|p| p.account),
            amount,
            source_account_start_balance: source.map_or(Decimal::ZERO, |p| p.start),
            source_account_end_balance: source.map_or(Decimal::ZERO, |p| p.end),
            target_account_start_balance: target.map_or(Decimal::ZERO, |p| p.start),
            target_account_end_balance: target.map_or(Decimal::ZERO, |p| p.end),
            message,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn source_account_id(&self) -> Option<AccountId> {
        self.source_account_id
    }

    pub fn target_account_id(&self) -> Option<AccountId> {
        self.target_account_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn source_account_start_balance(&self) -> Decimal {
        self.source_account_start_balance
    }

    pub fn source_account_end_balance(&self) -> Decimal {
        self.source_account_end_balance
    }

    pub fn target_account_start_balance(&self) -> Decimal {
        self.target_account_start_balance
    }

    pub fn target_account_end_balance(&self) -> Decimal {
        self.target_account_end_balance
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the given account is on either side of this transaction.
    pub fn references(&self, account: AccountId) -> bool {
        self.source_account_id == Some(account) || self.target_account_id == Some(account)
    }

    pub(crate) fn source_posting(&self) -> Option<Posting> {
        self.source_account_id.map(|account| Posting {
            account,
            start: self.source_account_start_balance,
            end: self.source_account_end_balance,
        })
    }

    pub(crate) fn target_posting(&self) -> Option<Posting> {
        self.target_account_id.map(|account| Posting {
            account,
            start: self.target_account_start_balance,
            end: self.target_account_end_balance,
        })
    }
}

pub(crate) fn opening_message(account: AccountId) -> String {
    format!("Starting balance of account {account}")
}

pub(crate) fn deposit_message(account: AccountId, amount: Decimal) -> String {
    format!("Deposit of ${amount} into account {account}")
}

pub(crate) fn withdrawal_message(account: AccountId, amount: Decimal) -> String {
    format!("Withdraw of ${amount} from account {account}")
}
