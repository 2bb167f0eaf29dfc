use super::account::Account;
use super::auth::{Authenticator, Credentials, Grant, Scope, Token};
use super::card::Card;
use super::envelope::{Call, Envelope};
use super::types::{
    AccountsData, BeneficiariesData, BeneficiaryCategoriesData, CardsData, NameAndCodeData,
};
use crate::config::InvestecConfig;
use crate::error::{Error, Result};
use crate::models::{Beneficiary, BeneficiaryCategory, NameAndCode, Realm};
use oauth2::{AccessToken, AuthorizationCode, RedirectUrl};
use reqwest::redirect::Policy;
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use tracing::{debug, instrument};

/// Entry point to the Investec API.
///
/// Cloning is cheap and clones share the held token. Accounts and cards keep a
/// clone so they can issue follow-up calls on their own.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    authenticator: Authenticator,
    token: RwLock<Option<Token>>,
}

impl Client {
    /// Create a client without authenticating
    pub fn new(config: &InvestecConfig) -> Result<Self> {
        let http = reqwest::ClientBuilder::new()
            .redirect(Policy::none())
            .build()?;
        let base_url = config.base_url();
        let authenticator = Authenticator::new(Credentials::from(config), base_url.clone());

        Ok(Self::from_parts(http, base_url, authenticator, None))
    }

    /// Create a client and obtain a token with the client credentials grant
    #[instrument(name = "Connecting to Investec", skip_all, fields(sandbox = config.sandbox))]
    pub async fn connect(config: &InvestecConfig) -> Result<Self> {
        let client = Self::new(config)?;
        client.authenticate().await?;
        Ok(client)
    }

    fn from_parts(
        http: reqwest::Client,
        base_url: String,
        authenticator: Authenticator,
        token: Option<Token>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                authenticator,
                token: RwLock::new(token),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The currently held token, if any
    pub fn token(&self) -> Option<Token> {
        self.inner
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_token(&self, token: Token) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
    }

    /// An independent client with the same credentials, carrying `token`
    pub fn with_token(&self, token: Token) -> Client {
        Self::from_parts(
            self.inner.http.clone(),
            self.inner.base_url.clone(),
            self.inner.authenticator.clone(),
            Some(token),
        )
    }

    /// Obtain a token, using the refresh grant if the held token has a refresh token.
    ///
    /// On failure the held token is left untouched.
    pub async fn authenticate(&self) -> Result<()> {
        let current = self.token();
        let grant = Authenticator::grant_for(current.as_ref());
        let token = self
            .inner
            .authenticator
            .request_token(&self.inner.http, grant)
            .await?;
        self.set_token(token);
        debug!("Authenticated with Investec");
        Ok(())
    }

    /// Exchange an authorization code for a token held by a new, independent client
    pub async fn exchange_authorization_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Client> {
        let code = AuthorizationCode::new(code.to_string());
        let redirect_uri = RedirectUrl::new(redirect_uri.to_string())?;
        let token = self
            .inner
            .authenticator
            .request_token(
                &self.inner.http,
                Grant::AuthorizationCode {
                    code: &code,
                    redirect_uri: &redirect_uri,
                },
            )
            .await?;
        Ok(self.with_token(token))
    }

    pub fn auth_redirect_url(&self, redirect_uri: &str, scopes: &[Scope]) -> Result<String> {
        self.inner.authenticator.redirect_url(redirect_uri, scopes)
    }

    #[instrument(name = "Fetching accounts", skip_all, fields(realm = %realm))]
    pub async fn accounts(&self, realm: Realm) -> Result<Vec<Account>> {
        let call = Call::new("get accounts").with("realm", realm);
        let data: AccountsData = self.get(&call, &accounts_path(realm, ""), &[]).await?;

        data.accounts
            .into_iter()
            .map(|raw| Account::from_raw(self.clone(), realm, raw))
            .collect()
    }

    #[instrument(name = "Fetching cards", skip_all)]
    pub async fn cards(&self) -> Result<Vec<Card>> {
        let call = Call::new("get cards");
        let data: CardsData = self.get(&call, "/za/v1/cards", &[]).await?;

        Ok(data
            .cards
            .into_iter()
            .map(|details| Card::new(self.clone(), details))
            .collect())
    }

    #[instrument(name = "Fetching beneficiaries", skip_all)]
    pub async fn beneficiaries(&self) -> Result<Vec<Beneficiary>> {
        let call = Call::new("get beneficiaries");
        let data: BeneficiariesData = self
            .get(&call, &accounts_path(Realm::Private, "/beneficiaries"), &[])
            .await?;
        Ok(data)
    }

    #[instrument(name = "Fetching beneficiary categories", skip_all)]
    pub async fn beneficiary_categories(&self) -> Result<Vec<BeneficiaryCategory>> {
        let call = Call::new("get beneficiary categories");
        let data: BeneficiaryCategoriesData = self
            .get(
                &call,
                &accounts_path(Realm::Private, "/beneficiarycategories"),
                &[],
            )
            .await?;
        Ok(data)
    }

    pub async fn card_countries(&self) -> Result<Vec<NameAndCode>> {
        self.card_lookup("get card countries", "countries").await
    }

    pub async fn card_currencies(&self) -> Result<Vec<NameAndCode>> {
        self.card_lookup("get card currencies", "currencies").await
    }

    pub async fn card_merchants(&self) -> Result<Vec<NameAndCode>> {
        self.card_lookup("get card merchants", "merchants").await
    }

    #[instrument(name = "Fetching card lookup list", skip(self))]
    async fn card_lookup(&self, operation: &'static str, list: &str) -> Result<Vec<NameAndCode>> {
        let call = Call::new(operation);
        let data: NameAndCodeData = self
            .get(&call, &format!("/za/v1/cards/{}", list), &[])
            .await?;
        Ok(data.result)
    }

    fn access_token(&self) -> Result<AccessToken> {
        self.token()
            .map(|token| token.access_token)
            .ok_or(Error::NotSetUp)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        call: &Call,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let token = self.access_token()?;
        let url = format!("{}{}", self.inner.base_url, path);
        debug!(operation = call.operation, url = %url, "GET");

        let request = self
            .inner
            .http
            .get(&url)
            .bearer_auth(token.secret())
            .query(query);
        Self::send(call, request).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        call: &Call,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let token = self.access_token()?;
        let url = format!("{}{}", self.inner.base_url, path);
        debug!(operation = call.operation, url = %url, "POST");

        let request = self
            .inner
            .http
            .post(&url)
            .bearer_auth(token.secret())
            .json(body);
        Self::send(call, request).await
    }

    async fn send<T: DeserializeOwned>(call: &Call, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        // Failure bodies are not always JSON and never carry anything we use
        let body: Value = if status == StatusCode::OK {
            response.json().await?
        } else {
            Value::Null
        };

        Envelope::classify(status, body)?.into_data(call)
    }
}

/// Path under the realm-scoped accounts endpoint
pub(crate) fn accounts_path(realm: Realm, rest: &str) -> String {
    format!("/za/{}/v1/accounts{}", realm.path_segment(), rest)
}
