//! Listing inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use homeaway_core::error::AppError;
use homeaway_database::{PgPropertyRepository, PropertyRepository};
use homeaway_entity::property::{PropertySearch, PropertySummary};

use crate::output::{self, OutputFormat};

/// Arguments for property commands
#[derive(Debug, Args)]
pub struct PropertyArgs {
    /// Property subcommand
    #[command(subcommand)]
    pub command: PropertyCommand,
}

/// Property subcommands
#[derive(Debug, Subcommand)]
pub enum PropertyCommand {
    /// List listings, newest first
    List {
        /// Substring matched against name and tagline
        #[arg(short, long)]
        search: Option<String>,
        /// Exact category
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Property display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PropertyRow {
    id: String,
    name: String,
    tagline: String,
    country: String,
    price: i32,
}

impl From<PropertySummary> for PropertyRow {
    fn from(p: PropertySummary) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name,
            tagline: p.tagline,
            country: p.country,
            price: p.price,
        }
    }
}

/// Execute property commands
pub async fn execute(args: &PropertyArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let database = super::connect(&config).await?;
    let repo = PgPropertyRepository::new(database.pool().clone());

    match &args.command {
        PropertyCommand::List { search, category } => {
            let filter = PropertySearch::new(search.clone().unwrap_or_default(), category.clone());
            let rows: Vec<PropertyRow> = repo
                .find_many(&filter)
                .await?
                .into_iter()
                .map(PropertyRow::from)
                .collect();
            output::print_list(&rows, format);
        }
    }

    database.close().await;
    Ok(())
}
