//! Client-side admission rule for outgoing transfers.
//!
//! The backend owns the ledger; this check only decides whether a transfer
//! may be submitted and what the balance would look like afterwards.

use super::account::{AccountId, Amount, Balance};
use super::transaction::TransferRequest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;
use std::str::FromStr;

/// The most negative balance an account may reach after a transfer.
pub const MIN_BALANCE: Decimal = dec!(-500.00);

/// Why a transfer may not be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NonPositiveAmount,
    MissingDestination,
    OverdraftLimitExceeded,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NonPositiveAmount => write!(f, "amount must be greater than zero"),
            RejectReason::MissingDestination => write!(f, "destination account is required"),
            RejectReason::OverdraftLimitExceeded => {
                write!(f, "transfer exceeds the overdraft limit of {:.2}", MIN_BALANCE)
            }
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferCheck {
    pub projected_balance: Balance,
    pub reason: Option<RejectReason>,
    amount: Decimal,
    destination: Option<AccountId>,
}

impl TransferCheck {
    pub fn is_ok(&self) -> bool {
        self.reason.is_none()
    }

    /// True when the transfer would leave the account below zero.
    pub fn uses_overdraft(&self) -> bool {
        self.projected_balance.is_negative()
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Builds the request for an admissible transfer.
    pub fn into_request(self, from_account_id: AccountId) -> Result<TransferRequest, RejectReason> {
        if let Some(reason) = self.reason {
            return Err(reason);
        }
        let to_account_id = self.destination.ok_or(RejectReason::MissingDestination)?;
        let amount = Amount::new(self.amount).map_err(|_| RejectReason::NonPositiveAmount)?;
        Ok(TransferRequest::new(from_account_id, to_account_id, amount))
    }
}

/// Decides whether a transfer of `amount` to `destination` is admissible.
///
/// Rules are checked in order and the first failure is reported. The
/// projected balance is computed regardless so that callers can preview it;
/// it saturates at the `Decimal` range instead of overflowing.
pub fn validate(
    current_balance: Balance,
    amount: Decimal,
    destination: Option<AccountId>,
) -> TransferCheck {
    let projected_balance = Balance::new(current_balance.value().saturating_sub(amount));

    let reason = if amount <= Decimal::ZERO {
        Some(RejectReason::NonPositiveAmount)
    } else if destination.is_none() {
        Some(RejectReason::MissingDestination)
    } else if projected_balance.value() < MIN_BALANCE {
        Some(RejectReason::OverdraftLimitExceeded)
    } else {
        None
    };

    TransferCheck {
        projected_balance,
        reason,
        amount,
        destination,
    }
}

/// A transfer as typed into a form, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferDraft {
    pub amount: Decimal,
    pub destination: Option<AccountId>,
}

impl TransferDraft {
    pub fn new(amount: Decimal, destination: Option<AccountId>) -> Self {
        Self {
            amount,
            destination,
        }
    }

    /// Normalizes raw text input.
    ///
    /// An unparsable amount becomes zero. A destination that is blank or not
    /// an account identifier is treated as missing.
    pub fn from_input(amount: &str, destination: &str) -> Self {
        Self {
            amount: parse_amount(amount),
            destination: destination.trim().parse().ok(),
        }
    }

    pub fn check(&self, current_balance: Balance) -> TransferCheck {
        validate(current_balance, self.amount, self.destination)
    }
}

fn parse_amount(input: &str) -> Decimal {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}
