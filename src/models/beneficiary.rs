use super::null_as_default;
use serde::{Deserialize, Serialize};

// Most of these are null for beneficiaries that were never paid or have no contact details
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Beneficiary {
    #[serde(deserialize_with = "null_as_default")]
    pub beneficiary_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank: String,
    #[serde(deserialize_with = "null_as_default")]
    pub beneficiary_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_payment_amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_payment_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cell_no: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_account_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BeneficiaryCategory {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_default: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}
