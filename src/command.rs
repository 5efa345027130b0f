use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{account::AccountId, transaction::TransactionId};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Open,
    Rename,
    Deactivate,
    Transfer,
    Deposit,
    Withdraw,
    Account,
    Transaction,
}

/// Raw request as it arrives from the outside, every field optional.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub account: Option<AccountId>,
    pub target: Option<AccountId>,
    pub amount: Option<Decimal>,
    pub text: Option<String>,
    pub transaction: Option<TransactionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    Open {
        name: String,
        start_balance: Decimal,
    },
    Rename {
        account: AccountId,
        name: String,
    },
    Deactivate {
        account: AccountId,
    },
    Transfer {
        source: AccountId,
        target: AccountId,
        amount: Decimal,
        message: String,
    },
    Deposit {
        account: AccountId,
        amount: Decimal,
    },
    Withdraw {
        account: AccountId,
        amount: Decimal,
    },
    ShowAccount {
        account: AccountId,
    },
    ShowTransaction {
        transaction: TransactionId,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Account is required for {kind:?}")]
    AccountRequired { kind: CommandKind },
    #[error("Target account is required for {kind:?}")]
    TargetRequired { kind: CommandKind },
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: CommandKind },
    #[error("Name is required for {kind:?}")]
    NameRequired { kind: CommandKind },
    #[error("Transaction is required for {kind:?}")]
    TransactionRequired { kind: CommandKind },
}

impl LedgerCommand {
    /// Checks that every field the command needs is present.
    ///
    /// Amount signs are left to the ledger, which validates them in its own
    /// fixed order.
    pub fn parse_command(kind: CommandKind, request: Request) -> Result<Self, CommandError> {
        let Request {
            account,
            target,
            amount,
            text,
            transaction,
        } = request;
        let require_account = || account.ok_or(CommandError::AccountRequired { kind });
        let require_amount = || amount.ok_or(CommandError::AmountRequired { kind });

        match kind {
            CommandKind::Open => Ok(Self::Open {
                name: text.ok_or(CommandError::NameRequired { kind })?,
                start_balance: amount.unwrap_or_default(),
            }),
            CommandKind::Rename => Ok(Self::Rename {
                account: require_account()?,
                name: text.ok_or(CommandError::NameRequired { kind })?,
            }),
            CommandKind::Deactivate => Ok(Self::Deactivate {
                account: require_account()?,
            }),
            CommandKind::Transfer => Ok(Self::Transfer {
                source: require_account()?,
                target: target.ok_or(CommandError::TargetRequired { kind })?,
                amount: require_amount()?,
                message: text.unwrap_or_default(),
            }),
            CommandKind::Deposit => Ok(Self::Deposit {
                account: require_account()?,
                amount: require_amount()?,
            }),
            CommandKind::Withdraw => Ok(Self::Withdraw {
                account: require_account()?,
                amount: require_amount()?,
            }),
            CommandKind::Account => Ok(Self::ShowAccount {
                account: require_account()?,
            }),
            CommandKind::Transaction => Ok(Self::ShowTransaction {
                transaction: transaction.ok_or(CommandError::TransactionRequired { kind })?,
            }),
        }
    }
}
