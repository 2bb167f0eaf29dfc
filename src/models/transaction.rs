use super::null_as_default;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Debit,
    Credit,
}

// https://developer.investec.com/za/api-products/documentation/SA_PB_Account_Information#operation/getAccountTransactions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub account_id: String,
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// Category such as "CardPurchases" or "DebitOrders"; open-ended on the provider side
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub posted_order: Option<u32>,
    #[serde(default)]
    pub posting_date: Option<NaiveDate>,
    #[serde(default)]
    pub value_date: Option<NaiveDate>,
    #[serde(default)]
    pub action_date: Option<NaiveDate>,
    #[serde(default)]
    pub transaction_date: Option<NaiveDate>,
    pub amount: Decimal,
    #[serde(default)]
    pub running_balance: Option<Decimal>,
}

/// Optional filters for a transaction listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub transaction_type: Option<String>,
}

impl TransactionFilter {
    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.to_date = Some(date);
        self
    }

    pub fn transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = Some(transaction_type.into());
        self
    }

    /// Query parameters for the set filters only
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(from) = self.from_date {
            query.push(("fromDate", from.format(DATE_FORMAT).to_string()));
        }
        if let Some(to) = self.to_date {
            query.push(("toDate", to.format(DATE_FORMAT).to_string()));
        }
        if let Some(transaction_type) = &self.transaction_type {
            query.push(("transactionType", transaction_type.clone()));
        }
        query
    }
}
