use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use credkeep::auth::CredentialStore;
use credkeep::cli::{self, Cli, Command};
use credkeep::config::Config;
use credkeep::logging;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.logging);

    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path());
    let store = CredentialStore::new(store_path);
    tracing::debug!(path = %store.path().display(), "using credential store");

    match cli.command {
        None => {
            cli::interactive(&store)?;
            Ok(true)
        }
        Some(Command::Signup { username }) => cli::signup(&store, username.as_deref()),
        Some(Command::Login { username }) => cli::login(&store, username.as_deref()),
        Some(Command::Completions { shell }) => {
            cli::completions(shell);
            Ok(true)
        }
    }
}
