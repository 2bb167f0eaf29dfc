use investec_client::models::Realm;
use investec_client::{Client, Config, Result};
use tracing::{info, instrument};

#[instrument(name = "Listing accounts", skip_all, fields(realm = %realm))]
pub async fn list_accounts(realm: Realm) -> Result<()> {
    let config = Config::load()?;
    let client = Client::connect(&config.investec).await?;

    for account in client.accounts(realm).await? {
        let balance = account.balance().await?;
        let details = account.details();
        info!(
            id = %details.account_id,
            number = %details.account_number,
            name = %details.account_name,
            product = %details.product_name,
            current = %balance.current_balance,
            available = %balance.available_balance,
            currency = %balance.currency,
            "Account"
        );
    }

    Ok(())
}

pub async fn list_cards() -> Result<()> {
    let config = Config::load()?;
    let client = Client::connect(&config.investec).await?;

    for card in client.cards().await? {
        let details = card.details();
        info!(
            key = %details.card_key,
            number = %details.card_number,
            status = %details.status,
            programmable = details.is_programmable,
            account = %details.account_number,
            "Card"
        );
    }

    Ok(())
}

pub async fn list_beneficiaries() -> Result<()> {
    let config = Config::load()?;
    let client = Client::connect(&config.investec).await?;

    for beneficiary in client.beneficiaries().await? {
        info!(
            id = %beneficiary.beneficiary_id,
            name = %beneficiary.beneficiary_name,
            bank = %beneficiary.bank,
            reference = %beneficiary.reference_name,
            "Beneficiary"
        );
    }

    Ok(())
}
