use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psp_shelf_scraper::select_best_match;

use super::format_game_line;
use crate::CliError;

pub(crate) fn run_search(query: &str, limit: u32) -> Result<(), CliError> {
    let client = super::connect_rawg()?;
    let rt = super::runtime()?;

    let page = rt.block_on(client.search(query, limit))?;
    let results: Vec<_> = page
        .results
        .into_iter()
        .map(psp_shelf_scraper::GameRecord::from)
        .collect();

    if results.is_empty() {
        log::info!("No PSP games found for \"{}\"", query);
        return Ok(());
    }

    let best = select_best_match(query, &results).map(|g| g.id);

    log::info!(
        "{} of {} PSP results for \"{}\":",
        results.len(),
        page.count,
        query
    );
    crate::log_blank();

    for game in &results {
        let marker = if Some(game.id) == best {
            format!(" {}", "<- best match".if_supports_color(Stdout, |t| t.green()))
        } else {
            String::new()
        };
        log::info!(
            "  {} {}{}",
            format_game_line(game),
            format!("[{}]", game.slug).if_supports_color(Stdout, |t| t.dimmed()),
            marker,
        );
    }

    if best.is_none() {
        crate::log_blank();
        log::info!(
            "{}",
            "No result is close enough to count as a match.".if_supports_color(Stdout, |t| t.dimmed())
        );
    }

    Ok(())
}
