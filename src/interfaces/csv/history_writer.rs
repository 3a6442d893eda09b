use crate::domain::account::AccountId;
use crate::domain::history::{ClassifiedTransaction, Direction};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct HistoryRow {
    id: i64,
    direction: Direction,
    counterparty: AccountId,
    from_account_id: AccountId,
    to_account_id: AccountId,
    amount: Decimal,
    timestamp: String,
}

/// Writes classified transactions as CSV, one row per transaction.
///
/// Timestamps are RFC 3339 in UTC so the instant survives any later
/// locale-specific formatting.
pub struct HistoryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> HistoryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_history(&mut self, items: &[ClassifiedTransaction]) -> Result<()> {
        for item in items {
            let tx = &item.transaction;
            self.writer.serialize(HistoryRow {
                id: tx.id,
                direction: item.direction,
                counterparty: item.counterparty,
                from_account_id: tx.from_account_id,
                to_account_id: tx.to_account_id,
                amount: item.signed_amount,
                timestamp: tx.timestamp.to_rfc3339(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
