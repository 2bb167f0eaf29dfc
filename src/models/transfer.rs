use super::null_as_default;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer, ser::Error as _};

/// One leg of a transfer between the caller's own accounts
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecipient {
    #[serde(rename = "beneficiaryAccountId")]
    pub account_id: String,
    #[serde(serialize_with = "amount_as_number")]
    pub amount: Decimal,
    pub my_reference: String,
    pub their_reference: String,
}

impl TransferRecipient {
    pub fn new(
        account_id: impl Into<String>,
        amount: Decimal,
        my_reference: impl Into<String>,
        their_reference: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
            my_reference: my_reference.into(),
            their_reference: their_reference.into(),
        }
    }
}

/// One payment to a saved beneficiary
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecipient {
    pub beneficiary_id: String,
    #[serde(serialize_with = "amount_as_number")]
    pub amount: Decimal,
    pub my_reference: String,
    pub their_reference: String,
}

impl PaymentRecipient {
    pub fn new(
        beneficiary_id: impl Into<String>,
        amount: Decimal,
        my_reference: impl Into<String>,
        their_reference: impl Into<String>,
    ) -> Self {
        Self {
            beneficiary_id: beneficiary_id.into(),
            amount,
            my_reference: my_reference.into(),
            their_reference: their_reference.into(),
        }
    }
}

/// Result entry for a single recipient of a transfer or payment batch.
///
/// The provider does not guarantee these come back in request order; match on
/// `beneficiary_account_id` rather than position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TransferResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_reference_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub beneficiary_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub beneficiary_account_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authorisation_required: bool,
}

// The API expects plain JSON numbers, not the string form rust_decimal uses
fn amount_as_number<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let amount = amount.normalize();
    if amount.scale() == 0 {
        if let Some(whole) = amount.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match amount.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => Err(S::Error::custom(format!("amount {amount} is out of range"))),
    }
}
