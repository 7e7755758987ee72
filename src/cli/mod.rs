//! Command-line surface.
//!
//! Two modes:
//! - No subcommand: an interactive loop over a signup / login / exit menu.
//! - `signup` / `login` subcommands: one-shot operations for scripting, with
//!   the same prompts for anything not given as a flag.
//!
//! Operation failures (bad credentials, duplicate username, ...) are reported
//! to the user and never terminate the interactive loop; only prompt/terminal
//! errors propagate.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use console::style;
use dialoguer::{Input, Password, Select};
use std::path::PathBuf;

use crate::auth::CredentialStore;
use crate::error::AuthError;

#[derive(Parser)]
#[command(
    name = "credkeep",
    version,
    about = "Local user-credential store with a signup/login flow"
)]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the credential store file path.
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new account.
    Signup {
        /// Username to register (prompted when omitted).
        #[arg(long)]
        username: Option<String>,
    },
    /// Log in with an existing account.
    Login {
        /// Username to log in as (prompted when omitted).
        #[arg(long)]
        username: Option<String>,
    },
    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Run the interactive menu loop until the user exits.
pub fn interactive(store: &CredentialStore) -> Result<()> {
    println!("{}", style("credkeep").bold());
    println!("Credential store: {}", store.path().display());

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Select an option")
            .items(&["Signup", "Login", "Exit"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                signup(store, None)?;
            }
            1 => {
                login(store, None)?;
            }
            _ => break,
        }
    }

    Ok(())
}

/// Prompt for anything missing and register a new account.
///
/// Returns whether the operation succeeded; prompt failures propagate.
pub fn signup(store: &CredentialStore, username: Option<&str>) -> Result<bool> {
    let username = match username {
        Some(name) => name.trim().to_string(),
        None => prompt_username()?,
    };

    let password = Password::new().with_prompt("Password").interact()?;
    let confirm = Password::new().with_prompt("Confirm password").interact()?;

    match store.signup(&username, &password, &confirm) {
        Ok(()) => {
            println!(
                "{} Account '{}' created. Welcome, {}!",
                style("Success:").green().bold(),
                username,
                username
            );
            Ok(true)
        }
        Err(err) => {
            report(&err);
            Ok(false)
        }
    }
}

/// Prompt for anything missing and attempt a login.
pub fn login(store: &CredentialStore, username: Option<&str>) -> Result<bool> {
    let username = match username {
        Some(name) => name.trim().to_string(),
        None => prompt_username()?,
    };

    let password = Password::new().with_prompt("Password").interact()?;

    match store.login(&username, &password) {
        Ok(()) => {
            println!(
                "{} Welcome back, {}!",
                style("Success:").green().bold(),
                username
            );
            Ok(true)
        }
        Err(err) => {
            report(&err);
            Ok(false)
        }
    }
}

/// Emit shell completions on stdout.
pub fn completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

fn prompt_username() -> Result<String> {
    let name: String = Input::new()
        .with_prompt("Username")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("username cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(name.trim().to_string())
}

/// Print an operation failure.
///
/// An unreadable store is reported loudly: the file may hold real accounts,
/// so the caller must fix or remove it by hand rather than have it clobbered.
fn report(err: &AuthError) {
    eprintln!("{} {err}", style("Error:").red().bold());
    if let AuthError::StoreUnreadable { path, .. } = err {
        tracing::error!(path = %path.display(), "credential store unreadable; refusing to continue");
        eprintln!(
            "{}",
            style("The store file was left untouched. Fix or remove it before retrying.").yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_signup_with_flags() {
        let cli = Cli::parse_from(["credkeep", "--store", "/tmp/u.json", "signup", "--username", "bob"]);
        assert_eq!(cli.store.as_deref(), Some(std::path::Path::new("/tmp/u.json")));
        match cli.command {
            Some(Command::Signup { username }) => assert_eq!(username.as_deref(), Some("bob")),
            _ => panic!("expected signup subcommand"),
        }
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::parse_from(["credkeep"]);
        assert!(cli.command.is_none());
    }
}
