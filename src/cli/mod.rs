mod accounts;
mod auth;
mod show;
mod transactions;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use investec_client::Result;
use investec_client::models::Realm;

pub use auth::AuthAction;
pub use show::ShowResource;

#[derive(Parser, Debug)]
#[command(name = "investec")]
#[command(about = "Query accounts, transactions and cards through the Investec Open API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Show { resource } => resource.execute().await,
            Commands::Auth { action } => action.execute().await,
            Commands::Accounts { realm } => accounts::list_accounts(*realm).await,
            Commands::Transactions {
                realm,
                from,
                to,
                transaction_type,
            } => {
                transactions::export(*realm, *from, *to, transaction_type.clone()).await
            }
            Commands::Cards => accounts::list_cards().await,
            Commands::Beneficiaries => accounts::list_beneficiaries().await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// List accounts with their balances
    Accounts {
        #[arg(long, default_value = "private")]
        realm: Realm,
    },
    /// Write transactions of every account as CSV to stdout
    Transactions {
        #[arg(long, default_value = "private")]
        realm: Realm,
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Provider category, e.g. CardPurchases
        #[arg(long = "type")]
        transaction_type: Option<String>,
    },
    /// List cards
    Cards,
    /// List saved beneficiaries
    Beneficiaries,
}
