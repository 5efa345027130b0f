//! Runs a command script against a ledger, standing in for the transport layer:
//! it is the only place where ledger outcomes are mapped to upstream status codes.

use std::io::{Read, Write};

use crate::{
    account::AccountId,
    command::{CommandError, CommandKind, LedgerCommand, Request},
    ledger::{Ledger, LedgerError},
};
use anyhow::Result;
use clap::ValueEnum;
use csv_parser::CsvCommandParser;
use csv_printer::print_rows;
use thiserror::Error;
use tracing::{debug, info};

pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Malformed row: {0}")]
    Malformed(#[from] csv::Error),
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
    #[error("Account {account} already has that name, not changed")]
    NotModified { account: AccountId },
}

impl ProcessError {
    /// HTTP status the failure maps to upstream.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Malformed(_) | Self::CommandErr(_) => 400,
            Self::LedgerErr(err) => match err {
                LedgerError::AccountNotFound(_) | LedgerError::TransactionNotFound(_) => 404,
                LedgerError::Inactive(_) => 410,
                LedgerError::InvalidAmount(_)
                | LedgerError::NonPositiveAmount(_)
                | LedgerError::InsufficientFunds(_) => 400,
            },
            Self::NotModified { .. } => 304,
        }
    }
}

/// Which table is printed once the script has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Listing {
    #[default]
    Accounts,
    Transactions,
}

pub struct Service<'w, L, R, W: 'w> {
    pub ledger: &'w L,
    pub input: R,
    pub output: &'w mut W,
    pub listing: Listing,
    pub error_printer: Box<dyn FnMut(u64, ProcessError)>,
}

impl<'w, L, R, W> Service<'w, L, R, W>
where
    L: Ledger,
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvCommandParser::new(self.input);

        let mut executed = 0usize;
        for (line, row) in parser {
            match row
                .map_err(ProcessError::from)
                .and_then(|row| execute(self.ledger, row.into_request()))
            {
                Ok(()) => executed += 1,
                Err(err) => (self.error_printer)(line, err),
            }
        }
        info!(executed, "Command script finished");

        match self.listing {
            Listing::Accounts => print_rows(self.output, self.ledger.accounts()),
            Listing::Transactions => print_rows(self.output, self.ledger.transactions()),
        }
    }
}

fn execute<L: Ledger>(
    ledger: &L,
    (kind, request): (CommandKind, Request),
) -> Result<(), ProcessError> {
    match LedgerCommand::parse_command(kind, request)? {
        LedgerCommand::Open {
            name,
            start_balance,
        } => {
            ledger.open_account(&name, start_balance)?;
        }
        LedgerCommand::Rename { account, name } => {
            if !ledger.rename_account(account, &name)?.is_applied() {
                return Err(ProcessError::NotModified { account });
            }
        }
        LedgerCommand::Deactivate { account } => {
            ledger.deactivate(account)?;
        }
        LedgerCommand::Transfer {
            source,
            target,
            amount,
            message,
        } => {
            ledger.transfer(source, target, amount, &message)?;
        }
        LedgerCommand::Deposit { account, amount } => {
            ledger.deposit(account, amount)?;
        }
        LedgerCommand::Withdraw { account, amount } => {
            ledger.withdraw(account, amount)?;
        }
        LedgerCommand::ShowAccount { account } => {
            let account = ledger.account(account)?;
            debug!(?account, "Account found");
        }
        LedgerCommand::ShowTransaction { transaction } => {
            let transaction = ledger.transaction(transaction)?;
            debug!(?transaction, "Transaction found");
        }
    }
    Ok(())
}
