use crate::models::{
    Beneficiary, BeneficiaryCategory, CardCode, CardDetails, CardExecution, EnvironmentVariables,
    NameAndCode, PaymentRecipient, Transaction, TransferRecipient, TransferResult,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub(super) struct AccountsData {
    // Kept raw so key casing can be normalized before typing
    pub(super) accounts: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TransactionsData {
    pub(super) transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CardsData {
    pub(super) cards: Vec<CardDetails>,
}

/// Card endpoints wrap their payload in `data.result`
#[derive(Debug, Deserialize)]
pub(super) struct ResultData<T> {
    pub(super) result: T,
}

pub(super) type CardCodeData = ResultData<CardCode>;
pub(super) type ExecutionsData = ResultData<Vec<CardExecution>>;
pub(super) type EnvironmentVariablesData = ResultData<EnvironmentVariables>;
pub(super) type NameAndCodeData = ResultData<Vec<NameAndCode>>;
pub(super) type BeneficiariesData = Vec<Beneficiary>;
pub(super) type BeneficiaryCategoriesData = Vec<BeneficiaryCategory>;

#[derive(Debug, Deserialize)]
pub(super) struct NestedTransferResponses {
    #[serde(rename = "TransferResponses", default)]
    transfer_responses: Vec<TransferResult>,
}

/// Transfers and payments have been seen both flat and nested under `transferResponse`
#[derive(Debug, Deserialize)]
pub(super) struct TransferData {
    #[serde(rename = "TransferResponses", default)]
    transfer_responses: Option<Vec<TransferResult>>,
    #[serde(rename = "transferResponse", default)]
    transfer_response: Option<NestedTransferResponses>,
    #[serde(rename = "ErrorMessage", default)]
    error_message: Option<Value>,
}

impl TransferData {
    /// `None` when the body carries neither response shape, which is how a
    /// rejected batch comes back
    pub(super) fn into_results(self) -> Option<Vec<TransferResult>> {
        match (self.transfer_responses, self.transfer_response) {
            (Some(results), _) => Some(results),
            (None, Some(nested)) => Some(nested.transfer_responses),
            (None, None) => None,
        }
    }

    pub(super) fn error_message(&self) -> Option<String> {
        match self.error_message.as_ref()? {
            Value::Null => None,
            Value::String(message) => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TransferRequest<'a> {
    pub(super) transfer_list: &'a [TransferRecipient],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PaymentRequest<'a> {
    pub(super) payment_list: &'a [PaymentRecipient],
}

#[derive(Debug, Serialize)]
pub(super) struct SaveCodeRequest<'a> {
    pub(super) code: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct PublishCodeRequest<'a> {
    pub(super) codeid: &'a str,
    pub(super) code: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct EnvironmentVariablesRequest<'a> {
    pub(super) variables: &'a Map<String, Value>,
}

/// Lowercase the first letter of every top-level key, so `AccountId` and
/// `accountId` land on the same field.
pub(super) fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (lower_first(&key), value))
                .collect(),
        ),
        other => other,
    }
}

fn lower_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
