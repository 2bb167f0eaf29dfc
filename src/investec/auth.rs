use super::envelope::is_failure;
use crate::config::InvestecConfig;
use crate::error::{Error, Result};
use oauth2::{AccessToken, AuthorizationCode, ClientId, ClientSecret, RedirectUrl, RefreshToken};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};
use url::Url;

const TOKEN_PATH: &str = "/identity/v2/oauth2/token";
const AUTHORIZE_PATH: &str = "/identity/v2/oauth2/authorize";
const CLIENT_CREDENTIALS_SCOPE: &str = "accounts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Accounts,
    Transactions,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Accounts => "accounts",
            Scope::Transactions => "transactions",
        }
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "accounts" => Ok(Scope::Accounts),
            "transactions" => Ok(Scope::Transactions),
            other => Err(format!("unknown scope: {other}")),
        }
    }
}

/// Access token as issued by the token endpoint. Replaced wholesale on refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: AccessToken,
    #[serde(default = "bearer")]
    pub token_type: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<RefreshToken>,
}

fn bearer() -> String {
    "Bearer".to_string()
}

/// Client credentials, fixed for the lifetime of a client
#[derive(Clone)]
pub(crate) struct Credentials {
    pub(crate) client_id: ClientId,
    client_secret: ClientSecret,
    api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

impl From<&InvestecConfig> for Credentials {
    fn from(config: &InvestecConfig) -> Self {
        Self {
            client_id: ClientId::new(config.client_id.clone()),
            client_secret: ClientSecret::new(config.client_secret.clone()),
            api_key: config.api_key.clone(),
        }
    }
}

pub(crate) enum Grant<'a> {
    ClientCredentials,
    RefreshToken(&'a RefreshToken),
    AuthorizationCode {
        code: &'a AuthorizationCode,
        redirect_uri: &'a RedirectUrl,
    },
}

impl Grant<'_> {
    fn name(&self) -> &'static str {
        match self {
            Grant::ClientCredentials => "client_credentials",
            Grant::RefreshToken(_) => "refresh_token",
            Grant::AuthorizationCode { .. } => "authorization_code",
        }
    }

    fn form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![("grant_type", self.name().to_string())];
        match self {
            Grant::ClientCredentials => {
                form.push(("scope", CLIENT_CREDENTIALS_SCOPE.to_string()));
            }
            Grant::RefreshToken(refresh_token) => {
                form.push(("refresh_token", refresh_token.secret().clone()));
            }
            Grant::AuthorizationCode { code, redirect_uri } => {
                form.push(("code", code.secret().clone()));
                form.push(("redirect_uri", redirect_uri.as_str().to_string()));
            }
        }
        form
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Authenticator {
    credentials: Credentials,
    base_url: String,
}

impl Authenticator {
    pub(crate) fn new(credentials: Credentials, base_url: String) -> Self {
        Self {
            credentials,
            base_url,
        }
    }

    /// Pick the refresh grant when the held token allows it
    pub(crate) fn grant_for(token: Option<&Token>) -> Grant<'_> {
        match token.and_then(|t| t.refresh_token.as_ref()) {
            Some(refresh_token) => Grant::RefreshToken(refresh_token),
            None => Grant::ClientCredentials,
        }
    }

    #[instrument(name = "Requesting Investec token", skip_all, fields(grant = grant.name()))]
    pub(crate) async fn request_token(
        &self,
        http: &reqwest::Client,
        grant: Grant<'_>,
    ) -> Result<Token> {
        let url = format!("{}{}", self.base_url, TOKEN_PATH);

        let response = http
            .post(&url)
            .basic_auth(
                self.credentials.client_id.as_str(),
                Some(self.credentials.client_secret.secret()),
            )
            .header("x-api-key", &self.credentials.api_key)
            .form(&grant.form())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Auth {
                status: Some(status.as_u16()),
                reason: format!("token endpoint returned {}", status),
            });
        }

        let body: Value = response.json().await?;
        parse_token(body)
    }

    /// Authorize-endpoint URL for the authorization code flow. Nothing is fetched.
    pub(crate) fn redirect_url(&self, redirect_uri: &str, scopes: &[Scope]) -> Result<String> {
        let scope = scopes
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let raw = format!(
            "{}{}?scope={}&client_id={}&redirect_uri={}&response_type=code",
            self.base_url,
            AUTHORIZE_PATH,
            scope,
            self.credentials.client_id.as_str(),
            redirect_uri
        );
        // Parsing percent-encodes spaces and other unsafe characters in place
        let url = Url::parse(&raw)?;
        Ok(url.to_string())
    }
}

fn parse_token(body: Value) -> Result<Token> {
    if is_failure(&body) {
        let status = body
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok());
        return Err(Error::Auth {
            status,
            reason: "token endpoint returned a failure body".to_string(),
        });
    }

    let has_access_token = body
        .get("access_token")
        .and_then(Value::as_str)
        .is_some_and(|t| !t.is_empty());
    if !has_access_token {
        return Err(Error::Auth {
            status: None,
            reason: "response carried no access token".to_string(),
        });
    }

    let token: Token = serde_json::from_value(body)?;
    debug!(expires_in = token.expires_in, scope = %token.scope, "Token issued");
    Ok(token)
}
