use crate::domain::account::{Account, AccountId, CreateAccountRequest};
use crate::domain::ports::BankingApi;
use crate::domain::session::Session;
use crate::domain::transaction::{Transaction, TransactionsResponse, TransferRequest};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

/// REST client for the banking backend.
pub struct HttpBankingApi {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBankingApi {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:9080/demo";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-2xx response into an `ApiError`, keeping the body text.
    async fn error_from(response: reqwest::Response, fallback: &str) -> LedgerError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            fallback.to_string()
        } else {
            body
        };
        warn!("Backend returned {}: {}", status, message);
        LedgerError::ApiError { status, message }
    }
}

impl Default for HttpBankingApi {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl BankingApi for HttpBankingApi {
    async fn transfer(&self, request: &TransferRequest) -> Result<String> {
        let url = self.url("/transfer");
        debug!("POST {}", url);
        let response = self.http_client.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response, "Transfer failed").await);
        }
        Ok(response.text().await?)
    }

    async fn transactions(&self, account_id: AccountId) -> Result<Vec<Transaction>> {
        let url = self.url(&format!("/transactions/{}", account_id));
        debug!("GET {}", url);
        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response, "Could not fetch transactions").await);
        }
        let body: TransactionsResponse = response.json().await?;
        Ok(body.transactions)
    }

    async fn accounts(&self, session: &Session) -> Result<Vec<Account>> {
        let url = self.url("/admin/accounts");
        debug!("GET {}", url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(session.token())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response, "Could not fetch accounts").await);
        }
        Ok(response.json().await?)
    }

    async fn create_account(
        &self,
        session: &Session,
        request: &CreateAccountRequest,
    ) -> Result<Account> {
        let url = self.url("/admin/accounts");
        debug!("POST {}", url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(session.token())
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response, "Could not create account").await);
        }
        Ok(response.json().await?)
    }
}
