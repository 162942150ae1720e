//! psp-shelf CLI
//!
//! Curated PSP showcase by genre, resolved live against RAWG.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, CollectionAction, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Emit an empty line through the logger so `--quiet` suppresses it too.
pub(crate) fn log_blank() {
    log::info!("");
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    // Dependencies stay at warn; only our crates follow the flags.
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("psp_shelf", level)
        .filter_module("psp_shelf_catalog", level)
        .filter_module("psp_shelf_scraper", level)
        .target(env_logger::Target::Stdout);

    if verbose {
        builder.format_timestamp_millis().format_target(true);
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            _ => writeln!(buf, "[{}] {}", record.level(), record.args()),
        });
    }

    builder.parse_default_env();
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let catalog_path = cli.catalog.as_deref();

    match cli.command {
        Commands::Genres => commands::genres::run_genres(catalog_path),
        Commands::Showcase { genre, page } => {
            commands::showcase::run_showcase(catalog_path, &genre, page, cli.quiet)
        }
        Commands::Search { query, limit } => commands::search::run_search(&query, limit),
        Commands::Game { slug } => commands::game::run_game(&slug),
        Commands::Collection { action } => match action {
            CollectionAction::List => commands::collection::run_collection_list(),
            CollectionAction::Add { slug } => commands::collection::run_collection_add(&slug),
            CollectionAction::Remove { slug } => {
                commands::collection::run_collection_remove(&slug)
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show();
                Ok(())
            }
            ConfigAction::Setup => commands::config::run_config_setup(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}
