//! Identity token commands.

use clap::{Args, Subcommand};

use homeaway_auth::JwtEncoder;
use homeaway_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Sign a bearer token with the configured secret
    Issue {
        /// External identity id (the token subject)
        identity_id: String,
        /// Email address carried in the token
        #[arg(long)]
        email: String,
        /// Avatar URL carried in the token
        #[arg(long)]
        picture: Option<String>,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let encoder = JwtEncoder::new(&config.auth);

    match &args.command {
        TokenCommand::Issue {
            identity_id,
            email,
            picture,
        } => {
            let issued = encoder.issue(identity_id, email, picture.as_deref())?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&issued)?);
                }
                OutputFormat::Table => {
                    output::print_kv("Subject", identity_id);
                    output::print_kv("Expires", &issued.expires_at.to_rfc3339());
                    println!("{}", issued.token);
                }
            }
        }
    }
    Ok(())
}
