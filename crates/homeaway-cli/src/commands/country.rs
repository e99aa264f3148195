//! Country reference commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use homeaway_core::error::AppError;
use homeaway_entity::country::{self, Country};

use crate::output::{self, OutputFormat};

/// Arguments for country commands
#[derive(Debug, Args)]
pub struct CountryArgs {
    /// Country subcommand
    #[command(subcommand)]
    pub command: CountryCommand,
}

/// Country subcommands
#[derive(Debug, Subcommand)]
pub enum CountryCommand {
    /// List every country
    List {
        /// Only countries in this region
        #[arg(short, long)]
        region: Option<String>,
    },
    /// Show one country
    Show {
        /// Two-letter country code
        code: String,
    },
}

/// Country display row for table output
#[derive(Debug, Serialize, Tabled)]
struct CountryRow {
    code: String,
    flag: String,
    name: String,
    region: String,
    latitude: f64,
    longitude: f64,
}

impl From<&Country> for CountryRow {
    fn from(c: &Country) -> Self {
        Self {
            code: c.code.clone(),
            flag: c.flag.clone(),
            name: c.name.clone(),
            region: c.region.clone(),
            latitude: c.location[0],
            longitude: c.location[1],
        }
    }
}

/// Execute country commands
pub fn execute(args: &CountryArgs, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        CountryCommand::List { region } => {
            let rows: Vec<CountryRow> = country::all()
                .iter()
                .filter(|c| {
                    region
                        .as_deref()
                        .is_none_or(|r| c.region.eq_ignore_ascii_case(r))
                })
                .map(CountryRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        CountryCommand::Show { code } => {
            let found = country::find(code)
                .ok_or_else(|| AppError::not_found(format!("Unknown country code '{code}'")))?;
            output::print_item(&CountryRow::from(found), format);
        }
    }
    Ok(())
}
