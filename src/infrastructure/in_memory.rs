use crate::domain::account::{Account, AccountId, CreateAccountRequest};
use crate::domain::ports::{Authenticator, BankingApi};
use crate::domain::session::{Credentials, Role, Session};
use crate::domain::transaction::{Transaction, TransferRequest};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory stand-in for the REST backend.
///
/// Serves seeded accounts and transactions and records every submitted
/// transfer. It applies no ledger rules: balances never change.
#[derive(Default, Clone)]
pub struct InMemoryBankingApi {
    accounts: Arc<RwLock<Vec<Account>>>,
    transactions: Arc<RwLock<Vec<Transaction>>>,
    submitted: Arc<RwLock<Vec<TransferRequest>>>,
}

impl InMemoryBankingApi {
    /// Creates a new, empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(accounts: Vec<Account>, transactions: Vec<Transaction>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
            transactions: Arc::new(RwLock::new(transactions)),
            submitted: Arc::default(),
        }
    }

    /// Transfers received so far, in submission order.
    pub async fn submitted(&self) -> Vec<TransferRequest> {
        self.submitted.read().await.clone()
    }
}

#[async_trait]
impl BankingApi for InMemoryBankingApi {
    async fn transfer(&self, request: &TransferRequest) -> Result<String> {
        let mut submitted = self.submitted.write().await;
        submitted.push(request.clone());
        Ok(format!(
            "Transfer of {} from {} to {} accepted",
            request.amount, request.from_account_id, request.to_account_id
        ))
    }

    async fn transactions(&self, account_id: AccountId) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .iter()
            .filter(|tx| tx.from_account_id == account_id || tx.to_account_id == account_id)
            .cloned()
            .collect())
    }

    async fn accounts(&self, _session: &Session) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.clone())
    }

    async fn create_account(
        &self,
        _session: &Session,
        request: &CreateAccountRequest,
    ) -> Result<Account> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .iter()
            .any(|a| a.account_number == request.account_number)
        {
            return Err(LedgerError::ApiError {
                status: 409,
                message: format!("Account {} already exists", request.account_number),
            });
        }
        let id = accounts.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let account = Account {
            id,
            account_number: request.account_number.clone(),
            owner_name: request.owner_name.clone(),
            balance: request.balance,
        };
        accounts.push(account.clone());
        Ok(account)
    }
}

/// Accepts a single configured admin credential pair.
#[derive(Clone)]
pub struct StaticAuthenticator {
    username: String,
    password: String,
}

impl StaticAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        if credentials.username == self.username && credentials.password == self.password {
            Ok(Session::new(
                format!("static-{}", credentials.username),
                Role::Admin,
            ))
        } else {
            Err(LedgerError::InvalidCredentials)
        }
    }
}
