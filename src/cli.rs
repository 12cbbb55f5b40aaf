//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lb_core::{OnboardingStep, SelectionCategory};

#[derive(Debug, Parser)]
#[command(name = "localbiz")]
#[command(about = "Local business discovery onboarding client", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (overrides LOCALBIZ_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip all connectivity checks and assume the backend is reachable
    #[arg(long, global = true)]
    pub no_probe: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the signed-in user, where onboarding resumes and sync state
    Status,

    /// Evaluate the onboarding route guard for a path
    Route { path: String },

    /// List catalog rows, falling back to the bundled list when unavailable
    Catalog {
        #[command(subcommand)]
        list: CatalogCommand,
    },

    /// Toggle ids in a category and let the debounced save settle
    Select {
        category: SelectionCategory,
        ids: Vec<String>,
    },

    /// Toggle ids in a category, then save and move to the next step
    Advance {
        category: SelectionCategory,
        ids: Vec<String>,
    },

    /// Move past a step without the selection gate
    Skip { step: OnboardingStep },
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    Interests,
    Subcategories {
        /// Interest ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        interests: Vec<String>,
    },
    DealBreakers,
}
