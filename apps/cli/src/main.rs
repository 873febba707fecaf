mod cli;
mod commands;
mod config;
mod main_lib;
mod token_file;

use clap::Parser;
use cli::Cli;
use config::Config;
use main_lib::{build_context, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);
    let ctx = build_context(config)?;
    tracing::debug!("Using API at {}", ctx.config.api_url);
    commands::run(cli.command, &ctx).await
}
