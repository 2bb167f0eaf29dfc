//! Client for the Investec Open API: OAuth2 token handling plus typed access to
//! accounts, balances, transactions, transfers, payments and programmable cards.

pub mod config;
pub mod error;
pub mod investec;
pub mod models;
pub mod statement;

pub use config::{Config, InvestecConfig};
pub use error::{Error, Result};
pub use investec::envelope::is_failure;
pub use investec::{Account, Card, Client, InvestecOperations, Scope, Token};
pub use oauth2::{AccessToken, RefreshToken};
