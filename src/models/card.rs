use super::null_as_default;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// https://developer.investec.com/za/api-products/documentation/SA_Card_Code#operation/getCards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct CardDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub card_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub card_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_programmable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub card_type_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: String,
}

/// Saved or published card code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardCode {
    pub code_id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// Synthetic transaction used to dry-run card code in the sandbox
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulateExecutionInput {
    pub code: String,
    pub cents_amount: String,
    pub currency_code: String,
    pub merchant_code: u32,
    pub merchant_city: String,
    pub country_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionType {
    BeforeTransaction,
    AfterTransaction,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLog {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardExecution {
    pub execution_id: String,
    #[serde(default)]
    pub root_code_function_id: String,
    #[serde(default)]
    pub sandbox: bool,
    #[serde(rename = "type")]
    pub type_: ExecutionType,
    #[serde(default)]
    pub authorization_approved: Option<bool>,
    #[serde(default)]
    pub logs: Vec<ExecutionLog>,
    #[serde(default)]
    pub sms_count: u32,
    #[serde(default)]
    pub email_count: u32,
    #[serde(default)]
    pub push_notification_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "Error", default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentVariables {
    #[serde(default)]
    pub variables: Map<String, Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// Entry of the country, currency and merchant lookup lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct NameAndCode {
    pub code: String,
    pub name: String,
}
