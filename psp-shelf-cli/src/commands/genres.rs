use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

pub(crate) fn run_genres(catalog_path: Option<&Path>) -> Result<(), CliError> {
    let catalog = super::load_catalog(catalog_path)?;

    log::info!("Showcase genres:");
    crate::log_blank();

    for genre in &catalog.genres {
        let pages = genre.total_pages();
        log::info!(
            "  {} {}",
            genre.name.if_supports_color(Stdout, |t| t.bold()),
            format!(
                "({} games, {} page{})",
                genre.games.len(),
                pages,
                if pages == 1 { "" } else { "s" }
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
        if !genre.link.is_empty() {
            log::info!(
                "    {}",
                genre.link.if_supports_color(Stdout, |t| t.cyan())
            );
        }
    }

    Ok(())
}
