//! Replays the transaction log of a [`LedgerSnapshot`] and reports every place
//! where recorded balances disagree with the replayed ones.

use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::AccountId,
    transaction::{Posting, TransactionId},
};

use super::LedgerSnapshot;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Discrepancy {
    #[error("Transaction {tx} starts account {account} at {recorded}, replay says {replayed}")]
    StartBalance {
        tx: TransactionId,
        account: AccountId,
        recorded: Decimal,
        replayed: Decimal,
    },
    #[error("Transaction {tx} does not move account {account} by its amount")]
    Arithmetic { tx: TransactionId, account: AccountId },
    #[error("Transaction {tx} references unknown account {account}")]
    UnknownAccount { tx: TransactionId, account: AccountId },
    #[error("Transaction at position {position} has id {tx}")]
    OutOfOrder { position: usize, tx: TransactionId },
    #[error("Account {account} holds {recorded}, replay says {replayed}")]
    Balance {
        account: AccountId,
        recorded: Decimal,
        replayed: Decimal,
    },
}

impl LedgerSnapshot {
    /// Replays the log in id order from zero balances.
    ///
    /// An empty result means every balance equals the signed sum of the
    /// transactions referencing its account.
    pub fn audit(&self) -> Vec<Discrepancy> {
        let mut replayed: HashMap<AccountId, Decimal> = self
            .accounts
            .iter()
            .map(|acc| (acc.id(), Decimal::ZERO))
            .collect();
        let mut found = Vec::new();

        for (position, tx) in self.transactions.iter().enumerate() {
            if usize::try_from(tx.id()).ok() != Some(position) {
                found.push(Discrepancy::OutOfOrder {
                    position,
                    tx: tx.id(),
                });
            }
            if let Some(posting) = tx.source_posting() {
                replay(&mut replayed, &mut found, tx.id(), posting, -tx.amount());
            }
            if let Some(posting) = tx.target_posting() {
                replay(&mut replayed, &mut found, tx.id(), posting, tx.amount());
            }
        }

        for acc in &self.accounts {
            let replayed = replayed.get(&acc.id()).copied().unwrap_or_default();
            if replayed != acc.balance() {
                found.push(Discrepancy::Balance {
                    account: acc.id(),
                    recorded: acc.balance(),
                    replayed,
                });
            }
        }
        found
    }
}

fn replay(
    balances: &mut HashMap<AccountId, Decimal>,
    found: &mut Vec<Discrepancy>,
    tx: TransactionId,
    posting: Posting,
    delta: Decimal,
) {
    let Some(balance) = balances.get_mut(&posting.account) else {
        found.push(Discrepancy::UnknownAccount {
            tx,
            account: posting.account,
        });
        return;
    };
    if *balance != posting.start {
        found.push(Discrepancy::StartBalance {
            tx,
            account: posting.account,
            recorded: posting.start,
            replayed: *balance,
        });
    }
    if posting.end != posting.start + delta {
        found.push(Discrepancy::Arithmetic {
            tx,
            account: posting.account,
        });
    }
    *balance += delta;
}
