use crate::domain::account::{Account, AccountId};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct AccountRow<'a> {
    id: AccountId,
    account_number: &'a str,
    owner_name: &'a str,
    balance: Decimal,
}

/// Writes account snapshots as CSV.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes one row per account, balances rounded to cents.
    pub fn write_accounts(&mut self, accounts: &[Account]) -> Result<()> {
        for account in accounts {
            self.writer.serialize(AccountRow {
                id: account.id,
                account_number: &account.account_number,
                owner_name: &account.owner_name,
                balance: account.balance.value().round_dp(2),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
