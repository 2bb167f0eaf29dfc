use crate::error::{Error, Result};
use crate::investec::InvestecOperations;
use crate::models::{Realm, Transaction, TransactionFilter};
use indicatif::ProgressStyle;
use tracing::{Span, info, instrument};
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// A transaction tagged with the account it was booked on
#[derive(Debug, Clone, PartialEq)]
pub struct StatementLine {
    pub account_number: String,
    pub account_name: String,
    pub transaction: Transaction,
}

pub struct StatementCollector<C> {
    client: C,
}

impl<C> StatementCollector<C>
where
    C: InvestecOperations + Sync,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Transactions of every account in `realm`, oldest first
    #[instrument(name = "Collecting statement", skip_all, fields(realm = %realm))]
    pub async fn collect(
        &self,
        realm: Realm,
        filter: &TransactionFilter,
    ) -> Result<Vec<StatementLine>> {
        let span = Span::current();
        span.pb_set_style(
            &ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
            )
            .map_err(|e| Error::Other(e.into()))?,
        );
        span.pb_set_message("Fetching transactions");

        let accounts = self.client.list_accounts(realm).await?;
        span.pb_set_length(accounts.len() as u64);

        let mut lines = Vec::new();
        for account in &accounts {
            let transactions = self.client.list_transactions(account, filter).await?;
            let details = account.details();
            lines.extend(transactions.into_iter().map(|transaction| StatementLine {
                account_number: details.account_number.clone(),
                account_name: details.account_name.clone(),
                transaction,
            }));
            span.pb_inc(1);
        }

        // Undated (pending) lines sort last
        lines.sort_by_key(|line| {
            (
                line.transaction.transaction_date.is_none(),
                line.transaction.transaction_date,
                line.transaction.posted_order,
            )
        });

        info!(
            accounts = accounts.len(),
            transactions = lines.len(),
            "Statement collected"
        );

        Ok(lines)
    }
}

#[cfg(test)]
mod mocks {
    use super::*;
    use crate::config::InvestecConfig;
    use crate::investec::{Account, Client};
    use crate::models::AccountDetails;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    pub(crate) fn mock_account(id: &str) -> Account {
        let client = Client::new(&InvestecConfig::new("abc", "xyz", "k1")).unwrap();
        Account::new(
            client,
            Realm::Private,
            AccountDetails {
                account_id: id.to_string(),
                account_number: format!("100{id}"),
                account_name: format!("Account {id}"),
                reference_name: String::new(),
                product_name: "Private Bank Account".to_string(),
            },
        )
    }

    pub(crate) struct MockInvestecClient {
        pub accounts: Vec<Account>,
        pub transactions: HashMap<String, Vec<Transaction>>,
        pub requested_realms: Arc<Mutex<Vec<Realm>>>,
    }

    #[async_trait]
    impl InvestecOperations for MockInvestecClient {
        async fn list_accounts(&self, realm: Realm) -> Result<Vec<Account>> {
            self.requested_realms.lock().unwrap().push(realm);
            Ok(self.accounts.clone())
        }

        async fn list_transactions(
            &self,
            account: &Account,
            _filter: &TransactionFilter,
        ) -> Result<Vec<Transaction>> {
            Ok(self
                .transactions
                .get(account.id())
                .cloned()
                .unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::{MockInvestecClient, mock_account};
    use super::*;
    use crate::models::TransactionType;
    use crate::models::transaction::test_helpers::{mock_date, mock_transaction};
    use rust_decimal::prelude::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_collect_orders_across_accounts() {
        let a1_late = mock_transaction(
            "A1",
            dec!(-10),
            TransactionType::Debit,
            mock_date(2025, 1, 3),
        );
        let a2_early = mock_transaction(
            "A2",
            dec!(25),
            TransactionType::Credit,
            mock_date(2025, 1, 1),
        );
        let a1_pending = Transaction {
            transaction_date: None,
            ..mock_transaction(
                "A1",
                dec!(-5),
                TransactionType::Debit,
                mock_date(2025, 1, 1),
            )
        };

        let client = MockInvestecClient {
            accounts: vec![mock_account("A1"), mock_account("A2")],
            transactions: HashMap::from([
                ("A1".to_string(), vec![a1_pending.clone(), a1_late.clone()]),
                ("A2".to_string(), vec![a2_early.clone()]),
            ]),
            requested_realms: Arc::new(Mutex::new(Vec::new())),
        };
        let realms = client.requested_realms.clone();

        let lines = StatementCollector::new(client)
            .collect(Realm::Business, &TransactionFilter::default())
            .await
            .unwrap();

        let ordered: Vec<Transaction> = lines.iter().map(|l| l.transaction.clone()).collect();
        assert_eq!(ordered, vec![a2_early, a1_late, a1_pending]);
        assert_eq!(lines[0].account_name, "Account A2");
        assert_eq!(lines[0].account_number, "100A2");
        assert_eq!(*realms.lock().unwrap(), vec![Realm::Business]);
    }

    #[tokio::test]
    async fn test_collect_without_accounts() {
        let client = MockInvestecClient {
            accounts: Vec::new(),
            transactions: HashMap::new(),
            requested_realms: Arc::new(Mutex::new(Vec::new())),
        };

        let lines = StatementCollector::new(client)
            .collect(Realm::Private, &TransactionFilter::default())
            .await
            .unwrap();

        assert!(lines.is_empty());
    }
}
