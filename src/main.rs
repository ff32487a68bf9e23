use anyhow::{Context, Result};
use clap::Parser;
use minerva_cli::cli::{dispatch, render, Cli};
use minerva_cli::logging::init_logging;
use minerva_cli::MinervaCliClient;

#[tokio::main]
async fn main() -> Result<()> {
    // .env は任意（存在しなければ無視）
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format)?;

    let config = cli.client_config()?;
    let client = MinervaCliClient::new(config).context("Failed to set up the Minerva CLI client")?;
    let auth = cli.auth.to_context(|key| std::env::var(key).ok());

    let output = dispatch(&client, &cli, &auth).await?;
    let text = render(&output)?;
    if !text.is_empty() {
        println!("{}", text.trim_end());
    }

    Ok(())
}
