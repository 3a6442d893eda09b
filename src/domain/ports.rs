use super::account::{Account, AccountId, CreateAccountRequest};
use super::session::{Credentials, Session};
use super::transaction::{Transaction, TransferRequest};
use crate::error::Result;
use async_trait::async_trait;

/// The REST backend that owns accounts and the ledger.
#[async_trait]
pub trait BankingApi: Send + Sync {
    /// Submits a transfer and returns the backend's confirmation text.
    async fn transfer(&self, request: &TransferRequest) -> Result<String>;
    async fn transactions(&self, account_id: AccountId) -> Result<Vec<Transaction>>;
    async fn accounts(&self, session: &Session) -> Result<Vec<Account>>;
    async fn create_account(
        &self,
        session: &Session,
        request: &CreateAccountRequest,
    ) -> Result<Account>;
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session>;
}

pub type BankingApiBox = Box<dyn BankingApi>;
pub type AuthenticatorBox = Box<dyn Authenticator>;
