mod account;
mod auth;
mod card;
mod client;
pub mod envelope;
mod types;

pub use account::Account;
pub use auth::{Scope, Token};
pub use card::Card;
pub use client::Client;

use crate::error::Result;
use crate::models::{Realm, Transaction, TransactionFilter};

use async_trait::async_trait;

#[async_trait]
pub trait InvestecOperations {
    async fn list_accounts(&self, realm: Realm) -> Result<Vec<Account>>;

    async fn list_transactions(
        &self,
        account: &Account,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>>;
}

#[async_trait]
impl InvestecOperations for Client {
    async fn list_accounts(&self, realm: Realm) -> Result<Vec<Account>> {
        self.accounts(realm).await
    }

    async fn list_transactions(
        &self,
        account: &Account,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        account.transactions(filter).await
    }
}
