//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "psp-shelf")]
#[command(about = "Browse curated PSP games by genre with live RAWG metadata", long_about = None)]
pub(crate) struct Cli {
    /// Curated catalog YAML to use instead of the bundled one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List showcase genres
    Genres,

    /// Resolve and show one page of a genre
    Showcase {
        /// Genre name (case-insensitive)
        genre: String,

        /// Page number, starting at 1 (default: first page)
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Search PSP games on RAWG by title
    Search {
        /// Title to search for
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// Show details for one game
    Game {
        /// RAWG slug (e.g., patapon)
        slug: String,
    },

    /// Manage your saved games
    Collection {
        #[command(subcommand)]
        action: CollectionAction,
    },

    /// Manage RAWG API configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum CollectionAction {
    /// List saved games
    List,

    /// Look up a game by slug and save it
    Add {
        /// RAWG slug
        slug: String,
    },

    /// Remove a saved game
    Remove {
        /// RAWG slug
        slug: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current configuration and where each value comes from
    Show,

    /// Interactively set up the API key and endpoint
    Setup,

    /// Print the config file path
    Path,
}
