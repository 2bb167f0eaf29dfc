use chrono::NaiveDate;
use investec_client::models::{Realm, TransactionFilter, TransactionType};
use investec_client::statement::{StatementCollector, StatementLine};
use investec_client::{Client, Config, Error, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Flat CSV shape of a statement line
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Row {
    account_number: String,
    account_name: String,
    transaction_date: Option<NaiveDate>,
    posting_date: Option<NaiveDate>,
    description: String,
    #[serde(rename = "Type")]
    type_: TransactionType,
    category: Option<String>,
    amount: Decimal,
    running_balance: Option<Decimal>,
    status: String,
}

impl From<StatementLine> for Row {
    fn from(line: StatementLine) -> Self {
        let t = line.transaction;
        Row {
            account_number: line.account_number,
            account_name: line.account_name,
            transaction_date: t.transaction_date,
            posting_date: t.posting_date,
            description: t.description,
            type_: t.type_,
            category: t.transaction_type,
            amount: t.amount,
            running_balance: t.running_balance,
            status: t.status,
        }
    }
}

pub async fn export(
    realm: Realm,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    transaction_type: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let client = Client::connect(&config.investec).await?;

    let filter = TransactionFilter {
        from_date: from,
        to_date: to,
        transaction_type,
    };
    let lines = StatementCollector::new(client)
        .collect(realm, &filter)
        .await?;

    let stdout = std::io::stdout();
    write_csv(stdout.lock(), lines)
}

fn write_csv<W: Write>(out: W, lines: Vec<StatementLine>) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(out);

    for line in lines {
        writer
            .serialize(Row::from(line))
            .map_err(|e| Error::Other(e.into()))?;
    }
    writer.flush()?;

    Ok(())
}
