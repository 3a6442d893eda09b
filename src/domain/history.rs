//! Direction derivation of transactions relative to a viewed account.

use super::account::AccountId;
use super::transaction::Transaction;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Sent => write!(f, "sent"),
            Direction::Received => write!(f, "received"),
        }
    }
}

/// A transaction seen from one account.
#[derive(Debug, PartialEq, Clone)]
pub struct ClassifiedTransaction {
    pub transaction: Transaction,
    pub viewpoint: AccountId,
    pub direction: Direction,
    /// Negative when sent, positive when received.
    pub signed_amount: Decimal,
    pub counterparty: AccountId,
}

impl ClassifiedTransaction {
    /// False when neither side of the transaction is the viewpoint account.
    ///
    /// Such records are classified as received from the origin; callers that
    /// care about backend consistency can filter on this.
    pub fn involves_viewpoint(&self) -> bool {
        self.transaction.from_account_id == self.viewpoint
            || self.transaction.to_account_id == self.viewpoint
    }

    /// Substring match of `term` against the counterparty and transaction ids.
    /// A blank term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty()
            || self.counterparty.to_string().contains(term)
            || self.transaction.id.to_string().contains(term)
    }
}

pub fn classify(transaction: &Transaction, viewpoint: AccountId) -> ClassifiedTransaction {
    let amount = transaction.amount.value();
    let (direction, signed_amount, counterparty) = if transaction.from_account_id == viewpoint {
        (Direction::Sent, -amount, transaction.to_account_id)
    } else {
        (Direction::Received, amount, transaction.from_account_id)
    };

    let classified = ClassifiedTransaction {
        transaction: transaction.clone(),
        viewpoint,
        direction,
        signed_amount,
        counterparty,
    };
    if !classified.involves_viewpoint() {
        warn!(
            "Transaction {} ({} -> {}) does not involve account {}; treating as received",
            transaction.id, transaction.from_account_id, transaction.to_account_id, viewpoint
        );
    }
    classified
}

/// Classifies every transaction, keeping the input order.
pub fn classify_all<'a, I>(transactions: I, viewpoint: AccountId) -> Vec<ClassifiedTransaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(|tx| classify(tx, viewpoint))
        .collect()
}

/// Which directions a history listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionFilter {
    #[default]
    All,
    Sent,
    Received,
}

impl DirectionFilter {
    pub fn matches(&self, direction: Direction) -> bool {
        match self {
            DirectionFilter::All => true,
            DirectionFilter::Sent => direction == Direction::Sent,
            DirectionFilter::Received => direction == Direction::Received,
        }
    }
}

impl FromStr for DirectionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(DirectionFilter::All),
            "sent" => Ok(DirectionFilter::Sent),
            "received" => Ok(DirectionFilter::Received),
            other => Err(format!("unknown filter '{other}'")),
        }
    }
}

/// Items matching both the direction filter and the search term, in order.
pub fn search(
    items: &[ClassifiedTransaction],
    filter: DirectionFilter,
    term: &str,
) -> Vec<ClassifiedTransaction> {
    items
        .iter()
        .filter(|t| filter.matches(t.direction) && t.matches_search(term))
        .cloned()
        .collect()
}

/// Sum of sent amounts, or `None` if it does not fit in a `Decimal`.
pub fn total_sent(items: &[ClassifiedTransaction]) -> Option<Decimal> {
    items
        .iter()
        .filter(|t| t.direction == Direction::Sent)
        .try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.signed_amount.abs()))
}

/// Sum of received amounts, or `None` if it does not fit in a `Decimal`.
pub fn total_received(items: &[ClassifiedTransaction]) -> Option<Decimal> {
    items
        .iter()
        .filter(|t| t.direction == Direction::Received)
        .try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.signed_amount))
}

/// Totals shown above a history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_sent: Decimal,
    pub total_received: Decimal,
    pub sent_count: usize,
    pub received_count: usize,
}

impl Summary {
    /// `None` when either total overflows.
    pub fn of(items: &[ClassifiedTransaction]) -> Option<Self> {
        let sent_count = items
            .iter()
            .filter(|t| t.direction == Direction::Sent)
            .count();
        Some(Self {
            total_sent: total_sent(items)?,
            total_received: total_received(items)?,
            sent_count,
            received_count: items.len() - sent_count,
        })
    }

    pub fn net(&self) -> Decimal {
        self.total_received - self.total_sent
    }
}
