//! Genre showcase: tab/page state, page resolution, and the render board.
//!
//! [`Showcase`] owns the active genre and per-genre page. Every genre or page
//! change produces a [`Dispatch`] and cancels the one before it.
//! [`resolve_page`] resolves a dispatch's entries concurrently and reports
//! progress as [`ShowcaseEvent`]s, which a [`ShowcaseBoard`] applies to its
//! slots in whatever order they arrive.

use futures::stream::{self, StreamExt};
use psp_shelf_catalog::{CatalogError, CuratedEntry, GenreCatalog, PaginationState};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::lookup::{MetadataSource, ResolutionResult, ResolutionStatus, resolve_entry};
use crate::types::GameRecord;

// ── Controller ──────────────────────────────────────────────────────────────

/// One request to resolve a page of a genre.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// Increases with every dispatch; boards ignore events from others.
    pub generation: u64,
    pub genre: String,
    pub page: u32,
    pub total_pages: u32,
    pub entries: Vec<CuratedEntry>,
    pub cancel: CancellationToken,
}

impl Dispatch {
    /// Whether a newer dispatch has replaced this one.
    pub fn is_stale(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Single owner of the active genre and pagination state.
#[derive(Debug)]
pub struct Showcase {
    catalog: GenreCatalog,
    pages: PaginationState,
    active: Option<String>,
    current: Option<CancellationToken>,
    generation: u64,
}

impl Showcase {
    pub fn new(catalog: GenreCatalog) -> Self {
        Self {
            catalog,
            pages: PaginationState::new(),
            active: None,
            current: None,
            generation: 0,
        }
    }

    pub fn catalog(&self) -> &GenreCatalog {
        &self.catalog
    }

    pub fn active_genre(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn current_page(&self, genre: &str) -> u32 {
        self.pages.current(genre)
    }

    /// Switch to `genre` at the page it was last left on.
    pub fn select_genre(&mut self, genre: &str) -> Result<Dispatch, CatalogError> {
        let page = self.pages.current(genre);
        self.dispatch(genre, page)
    }

    /// Move the active genre to `page`.
    pub fn goto_page(&mut self, page: u32) -> Result<Dispatch, CatalogError> {
        let genre = self.active.clone().ok_or(CatalogError::NoActiveGenre)?;
        self.dispatch(&genre, page)
    }

    pub fn next_page(&mut self) -> Result<Dispatch, CatalogError> {
        let genre = self.active.as_deref().ok_or(CatalogError::NoActiveGenre)?;
        let page = self.pages.current(genre) + 1;
        self.goto_page(page)
    }

    pub fn prev_page(&mut self) -> Result<Dispatch, CatalogError> {
        let genre = self.active.as_deref().ok_or(CatalogError::NoActiveGenre)?;
        let page = self.pages.current(genre).saturating_sub(1);
        self.goto_page(page)
    }

    /// Cancel the outstanding dispatch, if any, without starting a new one.
    pub fn cancel_active(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }

    /// Validate, then commit the new genre/page and cancel the previous
    /// dispatch before handing out the new one. A rejected request leaves
    /// everything as it was.
    fn dispatch(&mut self, genre: &str, page: u32) -> Result<Dispatch, CatalogError> {
        let g = self.catalog.genre(genre)?;
        let entries = g.page(page)?.to_vec();
        let total_pages = g.total_pages();
        let name = g.name.clone();

        self.pages.set(&self.catalog, &name, page)?;
        self.cancel_active();
        self.active = Some(name.clone());

        let cancel = CancellationToken::new();
        self.current = Some(cancel.clone());
        self.generation += 1;

        log::debug!(
            "Dispatch #{}: {} page {}/{} ({} entries)",
            self.generation,
            name,
            page,
            total_pages,
            entries.len(),
        );

        Ok(Dispatch {
            generation: self.generation,
            genre: name,
            page,
            total_pages,
            entries,
            cancel,
        })
    }
}

// ── Events ──────────────────────────────────────────────────────────────────

/// Progress of a page resolution, keyed by dispatch generation and the
/// entry's index on the page.
#[derive(Debug, Clone)]
pub enum ShowcaseEvent {
    /// Emitted for every entry, in page order, before any request starts.
    Placeholder {
        generation: u64,
        index: usize,
        title: String,
    },
    /// The slug lookup failed and the slower title search has started.
    Searching { generation: u64, index: usize },
    /// The entry reached a terminal state.
    Resolved {
        generation: u64,
        index: usize,
        result: ResolutionResult,
    },
}

impl ShowcaseEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Placeholder { generation, .. }
            | Self::Searching { generation, .. }
            | Self::Resolved { generation, .. } => *generation,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Placeholder { index, .. }
            | Self::Searching { index, .. }
            | Self::Resolved { index, .. } => *index,
        }
    }
}

/// Resolve every entry of `dispatch` concurrently.
///
/// Placeholders for all entries are sent first, in page order. After that,
/// entries progress independently and their events interleave in any
/// order; one entry's failure never affects another. Returns the results in
/// page order.
pub async fn resolve_page<S: MetadataSource>(
    source: &S,
    dispatch: &Dispatch,
    events: &mpsc::UnboundedSender<ShowcaseEvent>,
) -> Vec<ResolutionResult> {
    let generation = dispatch.generation;

    for (index, entry) in dispatch.entries.iter().enumerate() {
        let _ = events.send(ShowcaseEvent::Placeholder {
            generation,
            index,
            title: entry.title.clone(),
        });
    }

    let width = dispatch.entries.len().max(1);
    let mut results: Vec<(usize, ResolutionResult)> =
        stream::iter(dispatch.entries.iter().enumerate())
            .map(|(index, entry)| async move {
                let result = resolve_entry(source, entry, &dispatch.cancel, || {
                    let _ = events.send(ShowcaseEvent::Searching { generation, index });
                })
                .await;
                let _ = events.send(ShowcaseEvent::Resolved {
                    generation,
                    index,
                    result: result.clone(),
                });
                (index, result)
            })
            .buffer_unordered(width)
            .collect()
            .await;

    results.sort_by_key(|(index, _)| *index);

    let found = results
        .iter()
        .filter(|(_, r)| r.status == ResolutionStatus::Found)
        .count();
    log::debug!(
        "Dispatch #{} finished: {}/{} found{}",
        generation,
        found,
        results.len(),
        if dispatch.is_stale() { " (stale)" } else { "" },
    );

    results.into_iter().map(|(_, r)| r).collect()
}

// ── Board ───────────────────────────────────────────────────────────────────

/// Render state of one showcase card.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Placeholder { title: String },
    Searching { title: String },
    Found(GameRecord),
    /// Title-only card.
    NotFound { title: String },
}

impl Slot {
    pub fn is_settled(&self) -> bool {
        matches!(self, Slot::Found(_) | Slot::NotFound { .. })
    }

    fn title(&self) -> &str {
        match self {
            Slot::Placeholder { title } | Slot::Searching { title } | Slot::NotFound { title } => {
                title
            }
            Slot::Found(record) => &record.name,
        }
    }
}

/// The grid for one dispatch. Slots move forward only:
/// placeholder → searching → found / not found.
#[derive(Debug, Clone)]
pub struct ShowcaseBoard {
    generation: u64,
    genre: String,
    page: u32,
    total_pages: u32,
    slots: Vec<Slot>,
}

impl ShowcaseBoard {
    pub fn new(dispatch: &Dispatch) -> Self {
        Self {
            generation: dispatch.generation,
            genre: dispatch.genre.clone(),
            page: dispatch.page,
            total_pages: dispatch.total_pages,
            slots: Vec::with_capacity(dispatch.entries.len()),
        }
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn is_settled(&self) -> bool {
        self.slots.iter().all(Slot::is_settled)
    }

    /// Apply an event. Returns whether a slot changed.
    ///
    /// Events from another dispatch and aborted results are dropped.
    pub fn apply(&mut self, event: &ShowcaseEvent) -> bool {
        if event.generation() != self.generation {
            return false;
        }

        match event {
            ShowcaseEvent::Placeholder { index, title, .. } => {
                if *index >= self.slots.len() {
                    self.slots.resize(
                        *index + 1,
                        Slot::Placeholder {
                            title: String::new(),
                        },
                    );
                }
                if self.slots[*index].is_settled() {
                    return false;
                }
                self.slots[*index] = Slot::Placeholder {
                    title: title.clone(),
                };
                true
            }
            ShowcaseEvent::Searching { index, .. } => match self.slots.get_mut(*index) {
                Some(slot @ Slot::Placeholder { .. }) => {
                    let title = slot.title().to_string();
                    *slot = Slot::Searching { title };
                    true
                }
                _ => false,
            },
            ShowcaseEvent::Resolved { index, result, .. } => {
                let Some(slot) = self.slots.get_mut(*index) else {
                    return false;
                };
                if slot.is_settled() {
                    return false;
                }
                match (&result.status, &result.data) {
                    (ResolutionStatus::Found, Some(record)) => {
                        *slot = Slot::Found(record.clone());
                        true
                    }
                    (ResolutionStatus::NotFound, _) => {
                        let title = slot.title().to_string();
                        *slot = Slot::NotFound { title };
                        true
                    }
                    _ => false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupMethod;
    use psp_shelf_catalog::Genre;

    fn catalog() -> GenreCatalog {
        let games = |prefix: &str, n: usize| {
            (0..n)
                .map(|i| CuratedEntry::new(format!("{prefix} {i}"), format!("{prefix}-{i}")))
                .collect()
        };
        GenreCatalog::new(vec![
            Genre {
                name: "Action".into(),
                link: String::new(),
                games: games("action", 12),
            },
            Genre {
                name: "Puzzle".into(),
                link: String::new(),
                games: games("puzzle", 3),
            },
        ])
        .unwrap()
    }

    fn record(slug: &str) -> GameRecord {
        GameRecord {
            id: 1,
            slug: slug.to_string(),
            name: slug.to_string(),
            description: None,
            released: None,
            rating: 0.0,
            rating_top: 0,
            ratings_count: 0,
            metacritic: None,
            image: None,
            platforms: vec![],
            genres: vec![],
        }
    }

    fn placeholder(generation: u64, index: usize) -> ShowcaseEvent {
        ShowcaseEvent::Placeholder {
            generation,
            index,
            title: format!("Title {index}"),
        }
    }

    #[test]
    fn select_genre_sets_active_and_first_page() {
        let mut showcase = Showcase::new(catalog());
        let d = showcase.select_genre("action").unwrap();
        assert_eq!(showcase.active_genre(), Some("Action"));
        assert_eq!(d.genre, "Action");
        assert_eq!(d.page, 1);
        assert_eq!(d.total_pages, 2);
        assert_eq!(d.entries.len(), 8);
    }

    #[test]
    fn switching_genre_cancels_previous_dispatch() {
        let mut showcase = Showcase::new(catalog());
        let first = showcase.select_genre("Action").unwrap();
        assert!(!first.is_stale());
        let second = showcase.select_genre("Puzzle").unwrap();
        assert!(first.is_stale());
        assert!(!second.is_stale());
        assert!(second.generation > first.generation);
    }

    #[test]
    fn page_is_remembered_across_genre_switches() {
        let mut showcase = Showcase::new(catalog());
        showcase.select_genre("Action").unwrap();
        let d = showcase.next_page().unwrap();
        assert_eq!(d.page, 2);
        assert_eq!(d.entries.len(), 4);
        showcase.select_genre("Puzzle").unwrap();
        let back = showcase.select_genre("Action").unwrap();
        assert_eq!(back.page, 2);
    }

    #[test]
    fn paging_one_genre_leaves_non_ascii_case_sibling_selectable() {
        let games = |prefix: &str, n: usize| {
            (0..n)
                .map(|i| CuratedEntry::new(format!("{prefix} {i}"), format!("{prefix}-{i}")))
                .collect()
        };
        let catalog = GenreCatalog::new(vec![
            Genre {
                name: "Ärcade".into(),
                link: String::new(),
                games: games("big", 17),
            },
            Genre {
                name: "ärcade".into(),
                link: String::new(),
                games: games("small", 3),
            },
        ])
        .unwrap();
        let mut showcase = Showcase::new(catalog);
        showcase.select_genre("Ärcade").unwrap();
        showcase.goto_page(3).unwrap();

        assert_eq!(showcase.current_page("ärcade"), 1);
        let d = showcase.select_genre("ärcade").unwrap();
        assert_eq!(d.genre, "ärcade");
        assert_eq!(d.page, 1);
        assert_eq!(d.entries.len(), 3);
    }

    #[test]
    fn rejected_page_keeps_current_dispatch_alive() {
        let mut showcase = Showcase::new(catalog());
        let d = showcase.select_genre("Puzzle").unwrap();
        assert!(matches!(
            showcase.next_page(),
            Err(CatalogError::PageOutOfRange { page: 2, total: 1, .. })
        ));
        assert!(matches!(
            showcase.prev_page(),
            Err(CatalogError::PageOutOfRange { page: 0, .. })
        ));
        assert!(!d.is_stale());
        assert_eq!(showcase.current_page("Puzzle"), 1);
    }

    #[test]
    fn unknown_genre_keeps_active_genre() {
        let mut showcase = Showcase::new(catalog());
        let d = showcase.select_genre("Action").unwrap();
        assert!(showcase.select_genre("Sports").is_err());
        assert_eq!(showcase.active_genre(), Some("Action"));
        assert!(!d.is_stale());
    }

    #[test]
    fn paging_without_active_genre_fails() {
        let mut showcase = Showcase::new(catalog());
        assert!(matches!(
            showcase.goto_page(1),
            Err(CatalogError::NoActiveGenre)
        ));
    }

    #[test]
    fn cancel_active_marks_dispatch_stale() {
        let mut showcase = Showcase::new(catalog());
        let d = showcase.select_genre("Action").unwrap();
        showcase.cancel_active();
        assert!(d.is_stale());
    }

    #[test]
    fn board_patches_slots_out_of_order() {
        let mut showcase = Showcase::new(catalog());
        let d = showcase.select_genre("Puzzle").unwrap();
        let mut board = ShowcaseBoard::new(&d);
        for i in 0..3 {
            assert!(board.apply(&placeholder(d.generation, i)));
        }

        board.apply(&ShowcaseEvent::Resolved {
            generation: d.generation,
            index: 2,
            result: ResolutionResult::found(record("c"), LookupMethod::Slug),
        });
        board.apply(&ShowcaseEvent::Searching {
            generation: d.generation,
            index: 0,
        });
        board.apply(&ShowcaseEvent::Resolved {
            generation: d.generation,
            index: 0,
            result: ResolutionResult::not_found(),
        });

        assert_eq!(
            board.slots()[0],
            Slot::NotFound {
                title: "Title 0".into()
            }
        );
        assert_eq!(
            board.slots()[1],
            Slot::Placeholder {
                title: "Title 1".into()
            }
        );
        assert_eq!(board.slots()[2], Slot::Found(record("c")));
        assert!(!board.is_settled());
    }

    #[test]
    fn board_ignores_other_generations_and_aborted_results() {
        let mut board = ShowcaseBoard::new(&Dispatch {
            generation: 5,
            genre: "Action".into(),
            page: 1,
            total_pages: 1,
            entries: vec![CuratedEntry::new("Title 0", "t-0")],
            cancel: CancellationToken::new(),
        });
        board.apply(&placeholder(5, 0));
        let before = board.slots().to_vec();

        assert!(!board.apply(&placeholder(4, 0)));
        assert!(!board.apply(&ShowcaseEvent::Resolved {
            generation: 4,
            index: 0,
            result: ResolutionResult::found(record("x"), LookupMethod::Slug),
        }));
        assert!(!board.apply(&ShowcaseEvent::Resolved {
            generation: 5,
            index: 0,
            result: ResolutionResult::aborted(),
        }));
        assert_eq!(board.slots(), before.as_slice());
    }

    #[test]
    fn settled_slot_is_never_rolled_back() {
        let mut board = ShowcaseBoard::new(&Dispatch {
            generation: 1,
            genre: "Action".into(),
            page: 1,
            total_pages: 1,
            entries: vec![CuratedEntry::new("Title 0", "t-0")],
            cancel: CancellationToken::new(),
        });
        board.apply(&placeholder(1, 0));
        board.apply(&ShowcaseEvent::Resolved {
            generation: 1,
            index: 0,
            result: ResolutionResult::found(record("a"), LookupMethod::Search),
        });
        assert!(!board.apply(&ShowcaseEvent::Searching {
            generation: 1,
            index: 0
        }));
        assert!(!board.apply(&placeholder(1, 0)));
        assert!(!board.apply(&ShowcaseEvent::Resolved {
            generation: 1,
            index: 0,
            result: ResolutionResult::not_found(),
        }));
        assert_eq!(board.slots()[0], Slot::Found(record("a")));
        assert!(board.is_settled());
    }
}
