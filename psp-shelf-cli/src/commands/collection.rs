use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psp_shelf_catalog::{Collection, CollectionItem};

use crate::CliError;

pub(crate) fn run_collection_list() -> Result<(), CliError> {
    let collection = Collection::open_default()?;

    if collection.is_empty() {
        log::info!("Your collection is empty.");
        log::info!("Add a game with 'psp-shelf collection add <slug>'.");
        return Ok(());
    }

    log::info!(
        "{} ({} games)",
        "Collection".if_supports_color(Stdout, |t| t.bold()),
        collection.len()
    );
    crate::log_blank();

    for item in collection.items() {
        let year = item
            .released
            .as_deref()
            .and_then(|d| d.get(..4))
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        let rating = item
            .rating
            .filter(|r| *r > 0.0)
            .map(|r| format!(" \u{2605} {:.2}", r))
            .unwrap_or_default();
        log::info!(
            "  {}{}{} {}",
            item.name.if_supports_color(Stdout, |t| t.bold()),
            year,
            rating.if_supports_color(Stdout, |t| t.yellow()),
            format!("[{}, added {}]", item.slug, item.added_at)
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    Ok(())
}

pub(crate) fn run_collection_add(slug: &str) -> Result<(), CliError> {
    let mut collection = Collection::open_default()?;
    if collection.contains(slug) {
        log::warn!("\"{}\" is already in your collection", slug);
        return Ok(());
    }

    let client = super::connect_rawg()?;
    let rt = super::runtime()?;
    let game = rt.block_on(client.get_by_slug(slug))?;

    let mut item = CollectionItem::new(&game.slug, &game.name);
    item.released = game.released.clone();
    item.rating = Some(game.rating);

    // RAWG may redirect an old slug to the canonical one.
    if !collection.add(item) {
        log::warn!("\"{}\" is already in your collection", game.slug);
        return Ok(());
    }
    collection.save()?;

    log::info!(
        "{} Added {} to your collection",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        game.name.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

pub(crate) fn run_collection_remove(slug: &str) -> Result<(), CliError> {
    let mut collection = Collection::open_default()?;
    if !collection.remove(slug) {
        log::warn!("\"{}\" is not in your collection", slug);
        return Ok(());
    }
    collection.save()?;

    log::info!(
        "{} Removed {} from your collection",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        slug,
    );
    Ok(())
}
