use crate::domain::account::AccountId;
use crate::domain::transfer::RejectReason;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Transfer rejected: {0}")]
    TransferRejected(RejectReason),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Transaction totals for account {0} overflow")]
    TotalsOverflow(AccountId),
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Operation requires an admin session")]
    Unauthorized,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
