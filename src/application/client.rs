use crate::domain::account::{Account, AccountId, CreateAccountRequest};
use crate::domain::history::{ClassifiedTransaction, DirectionFilter, Summary, classify_all, search};
use crate::domain::ports::BankingApiBox;
use crate::domain::session::Session;
use crate::domain::transfer::{TransferCheck, TransferDraft};
use crate::error::{LedgerError, Result};
use tracing::{debug, info, warn};

/// A history view for one account.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub account_id: AccountId,
    /// Listing narrowed by direction and search term, in backend order.
    pub items: Vec<ClassifiedTransaction>,
    /// Totals over every fetched transaction, regardless of the filter.
    pub summary: Summary,
}

/// The main entry point for front ends.
///
/// `LedgerClient` owns the backend port. It gates transfer submission on
/// the local validation rule and turns raw transactions into classified
/// history views. Admin operations take an explicit [`Session`].
pub struct LedgerClient {
    api: BankingApiBox,
}

impl LedgerClient {
    pub fn new(api: BankingApiBox) -> Self {
        Self { api }
    }

    /// Live preview of a transfer from `from`. Never touches the backend.
    pub fn check_transfer(&self, from: &Account, draft: &TransferDraft) -> TransferCheck {
        draft.check(from.balance)
    }

    /// Validates and, if admissible, submits a transfer.
    ///
    /// A rejected draft returns `TransferRejected` without any backend call.
    pub async fn submit_transfer(&self, from: &Account, draft: &TransferDraft) -> Result<String> {
        let check = self.check_transfer(from, draft);
        let request = check.into_request(from.id).map_err(|reason| {
            warn!("Transfer from account {} rejected: {}", from.id, reason);
            LedgerError::TransferRejected(reason)
        })?;

        debug!(
            "Submitting transfer of {} from {} to {}",
            request.amount, request.from_account_id, request.to_account_id
        );
        let confirmation = self.api.transfer(&request).await?;
        info!(
            "Transfer of {} from {} to {} accepted",
            request.amount, request.from_account_id, request.to_account_id
        );
        Ok(confirmation)
    }

    /// Fetches and classifies the history of `account_id`.
    ///
    /// `term` matches counterparty or transaction ids; blank matches all.
    pub async fn history(
        &self,
        account_id: AccountId,
        filter: DirectionFilter,
        term: &str,
    ) -> Result<History> {
        let transactions = self.api.transactions(account_id).await?;
        let classified = classify_all(&transactions, account_id);
        let summary =
            Summary::of(&classified).ok_or(LedgerError::TotalsOverflow(account_id))?;
        debug!(
            "Fetched {} transactions for account {}",
            classified.len(),
            account_id
        );
        Ok(History {
            account_id,
            items: search(&classified, filter, term),
            summary,
        })
    }

    pub async fn accounts(&self, session: &Session) -> Result<Vec<Account>> {
        require_admin(session)?;
        self.api.accounts(session).await
    }

    pub async fn find_account(&self, session: &Session, account_id: AccountId) -> Result<Account> {
        self.accounts(session)
            .await?
            .into_iter()
            .find(|a| a.id == account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    pub async fn create_account(
        &self,
        session: &Session,
        request: CreateAccountRequest,
    ) -> Result<Account> {
        require_admin(session)?;
        request.validate()?;
        let account = self.api.create_account(session, &request).await?;
        info!(
            "Created account {} ({}) for {}",
            account.id, account.account_number, account.owner_name
        );
        Ok(account)
    }
}

fn require_admin(session: &Session) -> Result<()> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(LedgerError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{Amount, Balance};
    use crate::domain::ports::BankingApi;
    use crate::domain::session::Role;
    use crate::domain::transaction::Transaction;
    use crate::domain::transfer::RejectReason;
    use crate::infrastructure::in_memory::InMemoryBankingApi;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn account(id: AccountId, balance: Balance) -> Account {
        Account {
            id,
            account_number: format!("ACC-{id}"),
            owner_name: format!("Owner {id}"),
            balance,
        }
    }

    fn tx(id: i64, from: AccountId, to: AccountId, amount: rust_decimal::Decimal) -> Transaction {
        Transaction {
            id,
            from_account_id: from,
            to_account_id: to,
            amount: Amount::new(amount).unwrap(),
            timestamp: Utc.with_ymd_and_hms(2024, 6, id as u32, 9, 0, 0).unwrap(),
        }
    }

    fn admin() -> Session {
        Session::new("token", Role::Admin)
    }

    #[tokio::test]
    async fn test_submit_valid_transfer() {
        let api = InMemoryBankingApi::new();
        let client = LedgerClient::new(Box::new(api.clone()));
        let from = account(1, Balance::new(dec!(100)));

        let draft = TransferDraft::from_input("40.50", "2");
        client.submit_transfer(&from, &draft).await.unwrap();

        let submitted = api.submitted().await;
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].from_account_id, 1);
        assert_eq!(submitted[0].to_account_id, 2);
        assert_eq!(submitted[0].amount.value(), dec!(40.50));
    }

    #[tokio::test]
    async fn test_rejected_transfer_never_reaches_backend() {
        let api = InMemoryBankingApi::new();
        let client = LedgerClient::new(Box::new(api.clone()));
        let from = account(1, Balance::new(dec!(-499.00)));

        let result = client
            .submit_transfer(&from, &TransferDraft::new(dec!(1.01), Some(2)))
            .await;
        assert!(matches!(
            result,
            Err(LedgerError::TransferRejected(
                RejectReason::OverdraftLimitExceeded
            ))
        ));

        let result = client
            .submit_transfer(&from, &TransferDraft::from_input("", "2"))
            .await;
        assert!(matches!(
            result,
            Err(LedgerError::TransferRejected(RejectReason::NonPositiveAmount))
        ));

        assert!(api.submitted().await.is_empty());
    }

    #[tokio::test]
    async fn test_check_transfer_previews_balance() {
        let client = LedgerClient::new(Box::new(InMemoryBankingApi::new()));
        let from = account(1, Balance::new(dec!(2850.75)));

        let check = client.check_transfer(&from, &TransferDraft::new(dec!(3000), Some(2)));
        assert!(check.is_ok());
        assert!(check.uses_overdraft());
        assert_eq!(check.projected_balance, Balance::new(dec!(-149.25)));
    }

    #[tokio::test]
    async fn test_history_classifies_and_summarizes() {
        let api = InMemoryBankingApi::with_data(
            vec![],
            vec![
                tx(1, 1, 2, dec!(150.00)),
                tx(2, 3, 1, dec!(500.00)),
                tx(3, 1, 4, dec!(75.50)),
            ],
        );
        let client = LedgerClient::new(Box::new(api));

        let history = client.history(1, DirectionFilter::Sent, "").await.unwrap();
        let ids: Vec<i64> = history.items.iter().map(|c| c.transaction.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // The summary covers the unfiltered list.
        assert_eq!(history.summary.total_sent, dec!(225.50));
        assert_eq!(history.summary.total_received, dec!(500.00));
        assert_eq!(history.summary.net(), dec!(274.50));
    }

    #[tokio::test]
    async fn test_history_search_narrows_listing_only() {
        let api = InMemoryBankingApi::with_data(
            vec![],
            vec![
                tx(1, 1, 2, dec!(150.00)),
                tx(2, 3, 1, dec!(500.00)),
                tx(3, 1, 3, dec!(75.50)),
            ],
        );
        let client = LedgerClient::new(Box::new(api));

        let history = client.history(1, DirectionFilter::All, "3").await.unwrap();
        let ids: Vec<i64> = history.items.iter().map(|c| c.transaction.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(history.summary.sent_count, 2);
        assert_eq!(history.summary.received_count, 1);

        let history = client.history(1, DirectionFilter::Sent, "3").await.unwrap();
        assert_eq!(history.items.len(), 1);
        assert_eq!(history.items[0].transaction.id, 3);
    }

    #[tokio::test]
    async fn test_history_totals_overflow_is_an_error() {
        let api = InMemoryBankingApi::with_data(
            vec![],
            vec![
                tx(1, 2, 1, rust_decimal::Decimal::MAX),
                tx(2, 3, 1, rust_decimal::Decimal::MAX),
            ],
        );
        let client = LedgerClient::new(Box::new(api));

        let result = client.history(1, DirectionFilter::All, "").await;
        assert!(matches!(result, Err(LedgerError::TotalsOverflow(1))));
    }

    #[tokio::test]
    async fn test_history_empty_account() {
        let client = LedgerClient::new(Box::new(InMemoryBankingApi::new()));
        let history = client.history(42, DirectionFilter::All, "").await.unwrap();
        assert!(history.items.is_empty());
        assert_eq!(history.summary, Summary::default());
    }

    #[tokio::test]
    async fn test_admin_operations_require_admin_session() {
        let client = LedgerClient::new(Box::new(InMemoryBankingApi::new()));
        let customer = Session::new("token", Role::Customer);

        assert!(matches!(
            client.accounts(&customer).await,
            Err(LedgerError::Unauthorized)
        ));
        assert!(matches!(
            client
                .create_account(
                    &customer,
                    CreateAccountRequest::new("1", "Ana", Balance::ZERO)
                )
                .await,
            Err(LedgerError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_create_and_find_account() {
        let client = LedgerClient::new(Box::new(InMemoryBankingApi::new()));
        let created = client
            .create_account(
                &admin(),
                CreateAccountRequest::new("123456789", "Juan Pérez", Balance::new(dec!(1000))),
            )
            .await
            .unwrap();

        let found = client.find_account(&admin(), created.id).await.unwrap();
        assert_eq!(found, created);
        assert!(matches!(
            client.find_account(&admin(), 999).await,
            Err(LedgerError::AccountNotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_create_account_validated_before_submission() {
        let api = InMemoryBankingApi::new();
        let client = LedgerClient::new(Box::new(api.clone()));

        let result = client
            .create_account(&admin(), CreateAccountRequest::new("", "Ana", Balance::ZERO))
            .await;
        assert!(matches!(result, Err(LedgerError::ValidationError(_))));
        assert!(api.accounts(&admin()).await.unwrap().is_empty());
    }
}
