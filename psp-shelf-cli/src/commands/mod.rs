pub(crate) mod collection;
pub(crate) mod config;
pub(crate) mod game;
pub(crate) mod genres;
pub(crate) mod search;
pub(crate) mod showcase;

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psp_shelf_catalog::GenreCatalog;
use psp_shelf_scraper::{ApiError, GameRecord, RawgClient};

use crate::CliError;

/// The catalog from `--catalog`, or the bundled one.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<GenreCatalog, CliError> {
    let catalog = match path {
        Some(p) => psp_shelf_catalog::load_catalog(p)?,
        None => psp_shelf_catalog::bundled_catalog()?,
    };
    Ok(catalog)
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

/// Build a RAWG client from the saved configuration, with setup hints when
/// no API key is available.
pub(crate) fn connect_rawg() -> Result<RawgClient, CliError> {
    match RawgClient::from_config() {
        Ok(client) => {
            log::debug!("Using RAWG endpoint {}", client.base_url());
            Ok(client)
        }
        Err(e @ ApiError::Config(_)) => {
            log::warn!("Set the API key via the RAWG_API_KEY environment variable,");
            log::warn!("or run 'psp-shelf config setup' to save one.");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Truncate to at most `max` characters, appending "..." if cut.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// One-line summary: name, year, rating, and Metacritic score.
pub(crate) fn format_game_line(game: &GameRecord) -> String {
    let mut line = game.name.clone();
    if let Some(year) = game.release_year() {
        line.push_str(&format!(" ({})", year));
    }
    if game.ratings_count > 0 {
        line.push_str(&format!(
            " {}",
            format!("\u{2605} {:.2}/{}", game.rating, game.rating_top)
                .if_supports_color(Stdout, |t| t.yellow()),
        ));
    }
    if let Some(score) = game.metacritic {
        line.push_str(&format!(
            " {}",
            format!("MC {}", score).if_supports_color(Stdout, |t| t.green()),
        ));
    }
    line
}
