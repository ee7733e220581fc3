//! Command-line surface.

mod commands;
pub mod render;

pub use commands::run;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sp_core::SortOrder;

#[derive(Debug, Parser)]
#[command(name = "spark")]
#[command(about = "Compare grocery prices across stores and keep a shopping list", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to SPARK_CONFIG, then the data directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search items by name
    Search {
        /// Case-insensitive name fragment; empty lists everything
        #[arg(default_value = "")]
        term: String,
        /// Only show items listed under this postal code
        #[arg(short, long)]
        postal_code: Option<String>,
        #[arg(short, long, value_enum, default_value_t = SortArg::AsLoaded)]
        sort: SortArg,
    },
    /// Item names for autocomplete
    Suggest {
        #[arg(default_value = "")]
        prefix: String,
    },
    /// List known postal codes
    Zipcodes,
    /// Show the stores registered under a postal code
    Stores { code: String },
    /// Manage the shopping list
    List {
        #[command(subcommand)]
        command: ListCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Show the list grouped by store
    Show {
        /// Insertion order instead of grouping by store
        #[arg(long)]
        flat: bool,
    },
    /// Search and add one result to the list
    Add {
        term: String,
        #[arg(short, long)]
        postal_code: Option<String>,
        /// Position in the search results (0-based)
        #[arg(long, default_value_t = 0)]
        pick: usize,
    },
    /// Remove an entry by the index shown in `list show`
    Remove { index: usize },
    /// Remove every entry
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    AsLoaded,
    Price,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::AsLoaded => SortOrder::AsLoaded,
            SortArg::Price => SortOrder::PriceAscending,
        }
    }
}
