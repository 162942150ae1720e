use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psp_shelf_catalog::Collection;
use psp_shelf_scraper::PSP_PLATFORM_ID;

use super::truncate_str;
use crate::CliError;

const DESCRIPTION_WIDTH: usize = 600;

pub(crate) fn run_game(slug: &str) -> Result<(), CliError> {
    let client = super::connect_rawg()?;
    let rt = super::runtime()?;
    let game = rt.block_on(client.get_by_slug(slug))?;

    log::info!("{}", game.name.if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} {}",
        "Slug:".if_supports_color(Stdout, |t| t.cyan()),
        game.slug
    );
    if let Some(ref released) = game.released {
        log::info!(
            "  {} {}",
            "Released:".if_supports_color(Stdout, |t| t.cyan()),
            released
        );
    }
    if game.ratings_count > 0 {
        log::info!(
            "  {} {:.2}/{} ({} ratings)",
            "Rating:".if_supports_color(Stdout, |t| t.cyan()),
            game.rating,
            game.rating_top,
            game.ratings_count,
        );
    }
    if let Some(score) = game.metacritic {
        log::info!(
            "  {} {}",
            "Metacritic:".if_supports_color(Stdout, |t| t.cyan()),
            score
        );
    }
    if !game.genres.is_empty() {
        log::info!(
            "  {} {}",
            "Genres:".if_supports_color(Stdout, |t| t.cyan()),
            game.genre_names()
        );
    }
    if !game.platforms.is_empty() {
        let platforms: Vec<&str> = game.platforms.iter().map(|p| p.name.as_str()).collect();
        log::info!(
            "  {} {}",
            "Platforms:".if_supports_color(Stdout, |t| t.cyan()),
            platforms.join(", ")
        );
        if !game.on_platform(PSP_PLATFORM_ID) {
            log::warn!("{} is not listed as a PSP game", game.name);
        }
    }
    if let Some(ref image) = game.image {
        log::info!(
            "  {} {}",
            "Image:".if_supports_color(Stdout, |t| t.cyan()),
            image
        );
    }
    if let Some(ref description) = game.description {
        crate::log_blank();
        log::info!("{}", truncate_str(description.trim(), DESCRIPTION_WIDTH));
    }

    match Collection::open_default() {
        Ok(collection) if collection.contains(&game.slug) => {
            crate::log_blank();
            log::info!(
                "{}",
                "\u{2714} In your collection".if_supports_color(Stdout, |t| t.green())
            );
        }
        Ok(_) => {}
        Err(e) => log::debug!("Collection unavailable: {}", e),
    }

    Ok(())
}
