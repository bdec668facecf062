// ABOUTME: CLI entrypoint for the monex command
// ABOUTME: Handles error exit codes and pipeline wiring

use clap::Parser;
use monex::{
    api::ApiClient, auth::TokenProvider, cli::Cli, config::Credentials, pipeline::run_export,
    Result,
};
use std::path::PathBuf;

fn main() {
    if let Err(e) = run() {
        eprintln!("monex: [E{}] {}", e.exit_code(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = cli.resolve_format();
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format.default_output()));

    let mut credentials = Credentials::load(&cli.auth_file)?;
    if let Some(server) = &cli.account_server {
        credentials.account_server_url = server.trim_end_matches('/').to_string();
    }

    let tokens = TokenProvider::new(credentials)?;
    let mut client = ApiClient::new(tokens, Some(cli.api_base.clone()))?;

    run_export(&mut client, format, &output)
}
