//! Configuration inspection commands.

use clap::{Args, Subcommand};

use homeaway_core::error::AppError;

use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration as JSON
    Show,
    /// Load the configuration and print a summary
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(env)?;

    match &args.command {
        ConfigCommand::Show => {
            config.auth.jwt_secret = "****".to_string();
            config.storage.supabase.service_key = "****".to_string();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration for '{env}' is valid"));
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv("Storage", &config.storage.provider);
            output::print_kv("Bucket", &config.storage.bucket);
            output::print_kv("Cache", if config.cache.enabled { "enabled" } else { "disabled" });
            output::print_kv("Log format", &config.logging.format);
        }
    }
    Ok(())
}
