use serde::{Deserialize, Deserializer};

pub mod account;
pub mod beneficiary;
pub mod card;
pub mod transaction;
pub mod transfer;

pub use account::{AccountDetails, Balance, Realm};
pub use beneficiary::{Beneficiary, BeneficiaryCategory};
pub use card::{
    CardCode, CardDetails, CardExecution, EnvironmentVariables, ExecutionLog, ExecutionType,
    NameAndCode, SimulateExecutionInput,
};
pub use transaction::{Transaction, TransactionFilter, TransactionType};
pub use transfer::{PaymentRecipient, TransferRecipient, TransferResult};

/// Reads an explicit `null` as the field's default, so optional text fields
/// deserialize the same whether the key is missing or null.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
