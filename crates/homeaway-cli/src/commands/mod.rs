//! CLI command definitions and dispatch.

pub mod config;
pub mod country;
pub mod migrate;
pub mod property;
pub mod token;

use clap::{Parser, Subcommand};

use homeaway_core::config::AppConfig;
use homeaway_core::error::AppError;
use homeaway_database::DatabasePool;

use crate::output::OutputFormat;

/// HomeAway property rental backend
#[derive(Debug, Parser)]
#[command(name = "homeaway", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to apply on top of config/default.toml
    #[arg(short, long, env = "HOMEAWAY_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Country reference data
    Countries(country::CountryArgs),
    /// Identity tokens for local testing
    Token(token::TokenArgs),
    /// Listing inspection
    Properties(property::PropertyArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Countries(args) => country::execute(args, self.format),
            Commands::Token(args) => token::execute(args, &self.env, self.format),
            Commands::Properties(args) => property::execute(args, &self.env, self.format).await,
            Commands::Config(args) => config::execute(args, &self.env),
        }
    }
}

/// Helper: load configuration for `env`
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: connect to the configured database
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_token_issue() {
        let cli = Cli::try_parse_from([
            "homeaway",
            "token",
            "issue",
            "user_1",
            "--email",
            "ada@homeaway.test",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Token(_)));
    }

    #[test]
    fn test_parse_properties_list_filters() {
        let cli = Cli::try_parse_from([
            "homeaway",
            "--format",
            "json",
            "properties",
            "list",
            "--search",
            "lake",
            "--category",
            "cabins",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Properties(args) = cli.command else {
            panic!("expected properties command");
        };
        let property::PropertyCommand::List { search, category } = args.command;
        assert_eq!(search.as_deref(), Some("lake"));
        assert_eq!(category.as_deref(), Some("cabins"));
    }
}
