use std::io::Read;

use crate::{
    account::AccountId,
    command::{CommandKind, Request},
    transaction::TransactionId,
};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommandRow {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    pub account: Option<AccountId>,
    pub target: Option<AccountId>,
    pub amount: Option<Decimal>,
    pub text: Option<String>,
    pub tx: Option<TransactionId>,
}

impl CommandRow {
    pub fn into_request(self) -> (CommandKind, Request) {
        (
            self.kind,
            Request {
                account: self.account,
                target: self.target,
                amount: self.amount,
                text: self.text,
                transaction: self.tx,
            },
        )
    }
}

/// Parses a command script in CSV format (`type,account,target,amount,text,tx`).
/// Trailing columns may be left out.
///
/// Rows that cannot be deserialized are yielded as errors together with their line.
pub struct CsvCommandParser<R> {
    iter: DeserializeRecordsIntoIter<R, CommandRow>,
}

impl<R> CsvCommandParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvCommandParser<R>
where
    R: Read,
{
    type Item = (u64, Result<CommandRow, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_rows() {
        let input = "type, account, target, amount, text, tx\n\
                     open, , , 10, alice\n\
                     transfer, 0, 1, 2.5, rent money\n\
                     deactivate, 1\n\
                     bogus, 1, , ,\n\
                     transaction, , , , , 4\n";
        let rows: Vec<_> = CsvCommandParser::new(input.as_bytes()).collect();
        assert_eq!(rows.len(), 5);

        let (_, open) = &rows[0];
        let open = open.as_ref().unwrap();
        assert_eq!(open.kind, CommandKind::Open);
        assert_eq!(open.account, None);
        assert_eq!(open.amount, Some(dec!(10)));
        assert_eq!(open.text.as_deref(), Some("alice"));

        let (_, transfer) = &rows[1];
        let transfer = transfer.as_ref().unwrap();
        assert_eq!(transfer.kind, CommandKind::Transfer);
        assert_eq!(transfer.account, Some(0));
        assert_eq!(transfer.target, Some(1));
        assert_eq!(transfer.amount, Some(dec!(2.5)));
        assert_eq!(transfer.text.as_deref(), Some("rent money"));

        let (_, deactivate) = &rows[2];
        let deactivate = deactivate.as_ref().unwrap();
        assert_eq!(deactivate.kind, CommandKind::Deactivate);
        assert_eq!(deactivate.account, Some(1));
        assert_eq!(deactivate.amount, None);

        assert!(rows[3].1.is_err());

        let (_, lookup) = &rows[4];
        let lookup = lookup.as_ref().unwrap();
        assert_eq!(lookup.kind, CommandKind::Transaction);
        assert_eq!(lookup.tx, Some(4));
        assert_eq!(lookup.text, None);
    }
}
