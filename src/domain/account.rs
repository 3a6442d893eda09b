use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Backend-assigned account identifier.
pub type AccountId = i64;

/// A signed monetary value, as held on an account.
///
/// Wraps `rust_decimal::Decimal` so that balances never go through floating
/// point arithmetic. On the wire it is a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(#[serde(with = "rust_decimal::serde::float")] pub Decimal);

/// A strictly positive monetary amount, as moved by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Amount::new(value).map_err(serde::de::Error::custom)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Read-only snapshot of an account as reported by the backend.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    /// Display number, e.g. `"123456789"`.
    pub account_number: String,
    pub owner_name: String,
    pub balance: Balance,
}

/// Body of `POST /admin/accounts`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub account_number: String,
    pub balance: Balance,
    pub owner_name: String,
}

impl CreateAccountRequest {
    pub fn new(
        account_number: impl Into<String>,
        owner_name: impl Into<String>,
        balance: Balance,
    ) -> Self {
        Self {
            account_number: account_number.into().trim().to_string(),
            balance,
            owner_name: owner_name.into().trim().to_string(),
        }
    }

    /// Client-side checks run before the request is sent.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.account_number.trim().is_empty() {
            return Err(LedgerError::ValidationError(
                "Account number is required".to_string(),
            ));
        }
        if self.owner_name.trim().is_empty() {
            return Err(LedgerError::ValidationError(
                "Owner name is required".to_string(),
            ));
        }
        if self.balance.is_negative() {
            return Err(LedgerError::ValidationError(
                "Opening balance cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
