use clap::Subcommand;
use investec_client::{Config, Result};
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show the configuration file path
    Paths,
}

impl ShowResource {
    pub async fn execute(&self) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(),
        }
    }
}

fn show_paths() -> Result<()> {
    let config_path = Config::config_file()?;

    info!(path = ?config_path, "Config path");

    Ok(())
}
