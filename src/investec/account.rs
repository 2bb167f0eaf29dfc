use super::client::{Client, accounts_path};
use super::envelope::Call;
use super::types::{PaymentRequest, TransactionsData, TransferData, TransferRequest, normalize_keys};
use crate::error::Result;
use crate::models::{
    AccountDetails, Balance, PaymentRecipient, Realm, Transaction, TransactionFilter,
    TransferRecipient, TransferResult,
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// An account as returned by the API, bound to the client and realm it came from
#[derive(Debug, Clone)]
pub struct Account {
    client: Client,
    realm: Realm,
    details: AccountDetails,
    meta: Value,
}

impl Account {
    pub(crate) fn from_raw(client: Client, realm: Realm, raw: Value) -> Result<Self> {
        let details: AccountDetails = serde_json::from_value(normalize_keys(raw.clone()))?;
        Ok(Self {
            client,
            realm,
            details,
            meta: raw,
        })
    }

    pub fn new(client: Client, realm: Realm, details: AccountDetails) -> Self {
        let meta = serde_json::to_value(&details).unwrap_or(Value::Null);
        Self {
            client,
            realm,
            details,
            meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.details.account_id
    }

    pub fn details(&self) -> &AccountDetails {
        &self.details
    }

    pub fn realm(&self) -> Realm {
        self.realm
    }

    /// The account record exactly as the provider sent it
    pub fn meta(&self) -> &Value {
        &self.meta
    }

    fn call(&self, operation: &'static str) -> Call {
        Call::new(operation).with("account_id", self.id())
    }

    fn path(&self, rest: &str) -> String {
        accounts_path(self.realm, &format!("/{}{}", self.id(), rest))
    }

    #[instrument(name = "Fetching balance", skip_all, fields(account_id = %self.id()))]
    pub async fn balance(&self) -> Result<Balance> {
        let call = self.call("get account balance");
        self.client.get(&call, &self.path("/balance"), &[]).await
    }

    #[instrument(name = "Fetching transactions", skip_all, fields(account_id = %self.id()))]
    pub async fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let call = self.call("get transactions for account");
        let data: TransactionsData = self
            .client
            .get(&call, &self.path("/transactions"), &filter.query())
            .await?;
        debug!(count = data.transactions.len(), "Transactions fetched");
        Ok(data.transactions)
    }

    /// Transfer to other accounts in a single batch.
    ///
    /// One result per recipient comes back, in no guaranteed order.
    #[instrument(name = "Transferring", skip_all, fields(account_id = %self.id(), recipients = recipients.len()))]
    pub async fn transfer(&self, recipients: &[TransferRecipient]) -> Result<Vec<TransferResult>> {
        let call = self.call("perform transfer for account");
        let body = TransferRequest {
            transfer_list: recipients,
        };
        let data: TransferData = self
            .client
            .post(&call, &self.path("/transfermultiple"), &body)
            .await?;
        Self::batch_results(&call, data)
    }

    /// Pay saved beneficiaries in a single batch
    #[instrument(name = "Paying", skip_all, fields(account_id = %self.id(), recipients = recipients.len()))]
    pub async fn pay(&self, recipients: &[PaymentRecipient]) -> Result<Vec<TransferResult>> {
        let call = self.call("perform payment for account");
        let body = PaymentRequest {
            payment_list: recipients,
        };
        let data: TransferData = self
            .client
            .post(&call, &self.path("/paymultiple"), &body)
            .await?;
        Self::batch_results(&call, data)
    }

    fn batch_results(call: &Call, data: TransferData) -> Result<Vec<TransferResult>> {
        let message = data.error_message();
        match data.into_results() {
            Some(results) => {
                if let Some(message) = message {
                    warn!(%message, "Batch returned an error message");
                }
                Ok(results)
            }
            None => {
                let message = message.unwrap_or_else(|| "no transfer responses".to_string());
                warn!(operation = call.operation, %message, "Batch was rejected");
                Err(call.rejected(message))
            }
        }
    }
}
