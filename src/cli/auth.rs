use anyhow::anyhow;
use clap::Subcommand;
use investec_client::models::Realm;
use investec_client::{Client, Config, Error, Result, Scope};
use tiny_http::{Response, Server};
use tracing::{info, instrument};
use url::Url;

const DEFAULT_CALLBACK_PORT: u16 = 3000;

#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Verify the client credentials grant
    Check,
    /// Print the authorization URL for the authorization code flow
    Url {
        #[arg(long)]
        redirect_uri: String,
        #[arg(long = "scope", default_values = ["accounts", "transactions"])]
        scopes: Vec<Scope>,
    },
    /// Run the authorization code flow through a local callback server
    Login {
        #[arg(long, default_value_t = DEFAULT_CALLBACK_PORT)]
        port: u16,
    },
}

impl AuthAction {
    pub async fn execute(&self) -> Result<()> {
        match self {
            AuthAction::Check => check().await,
            AuthAction::Url {
                redirect_uri,
                scopes,
            } => print_url(redirect_uri, scopes),
            AuthAction::Login { port } => login(*port).await,
        }
    }
}

async fn check() -> Result<()> {
    let config = Config::load()?;
    let client = Client::connect(&config.investec).await?;

    if let Some(token) = client.token() {
        info!(
            expires_in = token.expires_in,
            scope = %token.scope,
            "Investec authentication verified"
        );
    }

    Ok(())
}

fn print_url(redirect_uri: &str, scopes: &[Scope]) -> Result<()> {
    let config = Config::load()?;
    let client = Client::new(&config.investec)?;
    println!("{}", client.auth_redirect_url(redirect_uri, scopes)?);
    Ok(())
}

#[instrument(name = "Authorizing with Investec", skip_all)]
async fn login(port: u16) -> Result<()> {
    let config = Config::load()?;
    let client = Client::new(&config.investec)?;

    let redirect_uri = format!("http://localhost:{}/callback", port);
    let auth_url =
        client.auth_redirect_url(&redirect_uri, &[Scope::Accounts, Scope::Transactions])?;

    let server = callback_server(port)?;

    println!("Open this URL in your browser:\n{}", auth_url);
    println!();
    println!("Waiting for authorization...");

    let request = server.recv()?;
    let code = callback_code(port, request.url())?;

    let response = Response::from_string("Authentication successful! You can close this window.");
    request.respond(response)?;

    let oauth_client = client
        .exchange_authorization_code(&code, &redirect_uri)
        .await?;

    let accounts = oauth_client.accounts(Realm::Private).await?;
    info!(accounts = accounts.len(), "Authorization code flow verified");

    Ok(())
}

/// Local server that receives the authorization redirect
fn callback_server(port: u16) -> Result<Server> {
    let bind_addr = format!("127.0.0.1:{}", port);
    Server::http(&bind_addr)
        .map_err(|e| anyhow!("Failed to bind callback server to {}: {}", bind_addr, e).into())
}

fn callback_code(port: u16, path: &str) -> Result<String> {
    let url = Url::parse(&format!("http://localhost:{}{}", port, path))?;

    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, code)| code.into_owned())
        .ok_or_else(|| Error::Auth {
            status: None,
            reason: "No code in callback".to_string(),
        })
}
