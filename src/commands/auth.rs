//! Authenticated/public toggle commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use ide_core::config::IdeConfig;
use ide_core::error::AppError;
use ide_core::types::BootData;

use crate::output::{self, OutputFormat};

/// Arguments for auth commands
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Auth subcommand
    #[command(subcommand)]
    pub command: AuthCommand,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Show the stored toggle
    Status,
    /// Flip the toggle
    Toggle,
    /// Set the toggle
    Set {
        /// `true` for authenticated, `false` for public
        #[arg(action = clap::ArgAction::Set)]
        authenticated: bool,
    },
}

/// Auth status display row
#[derive(Debug, Serialize, Tabled)]
struct AuthRow {
    /// Authenticated
    authenticated: bool,
    /// Storage
    storage: String,
}

/// Execute auth commands
pub fn execute(
    args: &AuthArgs,
    config: &IdeConfig,
    data: &BootData,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (session, _) = super::open_session(config, data)?;

    match &args.command {
        AuthCommand::Status => {
            let row = AuthRow {
                authenticated: session.context().state().is_authenticated,
                storage: config.storage.path.clone(),
            };
            output::print_list(&[row], format);
        }
        AuthCommand::Toggle => {
            let now = session.toggle_auth();
            output::print_success(&format!("Requests are now {}", describe(now)));
        }
        AuthCommand::Set { authenticated } => {
            session.set_authenticated(*authenticated);
            output::print_success(&format!("Requests are now {}", describe(*authenticated)));
        }
    }

    Ok(())
}

fn describe(is_authenticated: bool) -> &'static str {
    if is_authenticated { "authenticated" } else { "public" }
}
