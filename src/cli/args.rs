//! CLI argument parsing

use clap::{Parser, Subcommand};

use crate::adapter::StoreType;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository backend override (defaults to the configured one)
    #[arg(long, value_enum)]
    pub storage: Option<StoreType>,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the manuscript lifecycle states
    States,
    /// List the actions legal in a given state
    Actions {
        /// State code (e.g. 'SUB', 'REV')
        state: String
    },
    /// Submit a new manuscript
    Create {
        /// Unique manuscript title
        title:         String,
        /// Author email, must exist in the person directory
        author:        String,
        /// Abstract text
        #[arg(long, default_value = "")]
        abstract_text: String,
        /// Full manuscript text
        #[arg(long, default_value = "")]
        text:          String
    },
    /// Apply an editorial action to a manuscript
    Act {
        /// Manuscript title
        title:   String,
        /// Action code (e.g. 'ARF', 'ACC', 'WIT')
        action:  String,
        /// Referee email, required for the referee actions
        #[arg(long)]
        referee: Option<String>
    },
    /// Show one manuscript
    Show {
        /// Manuscript title
        title: String
    },
    /// List all manuscripts
    List,
    /// Delete a manuscript
    Delete {
        /// Manuscript title
        title: String
    }
}
