use rust_decimal::Decimal;
use super::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects between personal and business banking endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    Business,
    #[default]
    Private,
}

impl Realm {
    /// Path segment used by account-scoped endpoints
    pub fn path_segment(self) -> &'static str {
        match self {
            Realm::Business => "bb",
            Realm::Private => "pb",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Realm::Business => "business",
            Realm::Private => "private",
        }
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Realm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "business" => Ok(Realm::Business),
            "private" => Ok(Realm::Private),
            other => Err(format!("unknown realm: {other}")),
        }
    }
}

// https://developer.investec.com/za/api-products/documentation/SA_PB_Account_Information#operation/getAccounts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub account_id: String,
    pub current_balance: Decimal,
    pub available_balance: Decimal,
    pub currency: String,
}
