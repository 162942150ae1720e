use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psp_shelf_scraper::{
    Dispatch, ResolutionStatus, Showcase, ShowcaseBoard, ShowcaseEvent, Slot, resolve_page,
    run_with_events,
};
use tokio::sync::mpsc;

use super::format_game_line;
use crate::CliError;
use crate::spinner::SpinnerPool;

/// Resolve one page of a genre and print its cards.
pub(crate) fn run_showcase(
    catalog_path: Option<&Path>,
    genre: &str,
    page: Option<u32>,
    quiet: bool,
) -> Result<(), CliError> {
    let catalog = super::load_catalog(catalog_path)?;
    let mut showcase = Showcase::new(catalog);

    let mut dispatch = showcase.select_genre(genre)?;
    if let Some(page) = page.filter(|p| *p != dispatch.page) {
        dispatch = showcase.goto_page(page)?;
    }

    let client = super::connect_rawg()?;
    let rt = super::runtime()?;

    log::info!(
        "{} {}",
        dispatch.genre.if_supports_color(Stdout, |t| t.bold()),
        format!("(page {}/{})", dispatch.page, dispatch.total_pages)
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    crate::log_blank();

    let mut board = ShowcaseBoard::new(&dispatch);
    let mut spinners = SpinnerPool::new(dispatch.entries.len(), quiet);

    let (tx, rx) = mpsc::unbounded_channel();
    let results = rt.block_on(run_with_events(
        async {
            let results = resolve_page(&client, &dispatch, &tx).await;
            drop(tx);
            results
        },
        rx,
        |event| {
            if !board.apply(&event) {
                return;
            }
            match &event {
                ShowcaseEvent::Placeholder { index, title, .. } => {
                    spinners.claim(*index, format!("{}...", title));
                }
                ShowcaseEvent::Searching { index, .. } => {
                    if let Some(Slot::Searching { title }) = board.slots().get(*index) {
                        spinners.update(*index, format!("{} (searching by title)...", title));
                    }
                }
                ShowcaseEvent::Resolved { index, .. } => spinners.release(*index),
            }
        },
    ));
    spinners.clear_all();

    print_board(&board);

    let found = results
        .iter()
        .filter(|r| r.status == ResolutionStatus::Found)
        .count();
    crate::log_blank();
    log::info!("{}/{} resolved on RAWG", found, results.len());
    print_page_hint(&dispatch);

    Ok(())
}

fn print_board(board: &ShowcaseBoard) {
    for (i, slot) in board.slots().iter().enumerate() {
        let n = format!("{:>2}.", i + 1);
        match slot {
            Slot::Found(game) => {
                log::info!(
                    "{} {} {}",
                    n.if_supports_color(Stdout, |t| t.dimmed()),
                    format_game_line(game),
                    format!("[{}]", game.slug).if_supports_color(Stdout, |t| t.dimmed()),
                );
                if !game.genres.is_empty() {
                    log::info!("     {}", game.genre_names());
                }
            }
            Slot::NotFound { title } => {
                log::info!(
                    "{} {} {}",
                    n.if_supports_color(Stdout, |t| t.dimmed()),
                    title,
                    "(no RAWG match)".if_supports_color(Stdout, |t| t.yellow()),
                );
            }
            Slot::Placeholder { title } | Slot::Searching { title } => {
                log::info!(
                    "{} {} {}",
                    n.if_supports_color(Stdout, |t| t.dimmed()),
                    title,
                    "(not resolved)".if_supports_color(Stdout, |t| t.red()),
                );
            }
        }
    }
}

fn print_page_hint(dispatch: &Dispatch) {
    let genre = shell_arg(&dispatch.genre);
    if dispatch.page < dispatch.total_pages {
        log::info!(
            "{}",
            format!(
                "Next page: psp-shelf showcase {} --page {}",
                genre,
                dispatch.page + 1
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if dispatch.page > 1 {
        log::info!(
            "{}",
            format!(
                "Previous page: psp-shelf showcase {} --page {}",
                genre,
                dispatch.page - 1
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Quote `arg` for a copy-pasteable shell command when it needs it.
fn shell_arg(arg: &str) -> String {
    if !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
