use psp_shelf_catalog::CuratedEntry;
use tokio_util::sync::CancellationToken;

use crate::client::RawgClient;
use crate::error::ApiError;
use crate::matcher::select_best_match;
use crate::systems::FALLBACK_SEARCH_LIMIT;
use crate::types::GameRecord;

/// The two calls the resolution pipeline makes against a metadata service.
///
/// Implemented by [`RawgClient`]; tests substitute an in-memory source.
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
    /// Fetch one game by slug. Any error counts as a failed lookup.
    async fn get_by_slug(&self, slug: &str) -> Result<GameRecord, ApiError>;

    /// Search PSP games by title. An empty result is not an error.
    async fn search_by_title(&self, title: &str, limit: u32)
    -> Result<Vec<GameRecord>, ApiError>;
}

impl MetadataSource for RawgClient {
    async fn get_by_slug(&self, slug: &str) -> Result<GameRecord, ApiError> {
        RawgClient::get_by_slug(self, slug).await
    }

    async fn search_by_title(
        &self,
        title: &str,
        limit: u32,
    ) -> Result<Vec<GameRecord>, ApiError> {
        RawgClient::search_by_title(self, title, limit).await
    }
}

/// How a curated entry was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMethod {
    /// The curated slug resolved directly
    Slug,
    /// The slug failed and a title search produced an acceptable match
    Search,
}

impl std::fmt::Display for LookupMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupMethod::Slug => write!(f, "slug"),
            LookupMethod::Search => write!(f, "search"),
        }
    }
}

/// Terminal state of one entry's resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    Found,
    NotFound,
    /// The dispatch was cancelled before this entry finished.
    Aborted,
}

/// Outcome of resolving one curated entry. `data` is set only when found.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    pub status: ResolutionStatus,
    pub data: Option<GameRecord>,
    pub method: Option<LookupMethod>,
}

impl ResolutionResult {
    pub fn found(record: GameRecord, method: LookupMethod) -> Self {
        Self {
            status: ResolutionStatus::Found,
            data: Some(record),
            method: Some(method),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: ResolutionStatus::NotFound,
            data: None,
            method: None,
        }
    }

    pub fn aborted() -> Self {
        Self {
            status: ResolutionStatus::Aborted,
            data: None,
            method: None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.status == ResolutionStatus::Aborted
    }
}

/// Resolve a curated entry to a live record.
///
/// 1. Slug lookup. Success is final.
/// 2. Title search (after calling `on_searching`), then best-match selection.
///    A failed search or no acceptable candidate is `NotFound`.
///
/// `cancel` is checked after every request and also races each request, so
/// a cancelled entry drops its in-flight call and returns `Aborted` without
/// calling `on_searching`. Nothing is retried.
pub async fn resolve_entry<S: MetadataSource>(
    source: &S,
    entry: &CuratedEntry,
    cancel: &CancellationToken,
    on_searching: impl FnOnce(),
) -> ResolutionResult {
    let by_slug = tokio::select! {
        biased;
        _ = cancel.cancelled() => return ResolutionResult::aborted(),
        r = source.get_by_slug(&entry.slug) => r,
    };
    if cancel.is_cancelled() {
        return ResolutionResult::aborted();
    }

    match by_slug {
        Ok(record) => return ResolutionResult::found(record, LookupMethod::Slug),
        Err(e) => {
            log::debug!(
                "Slug '{}' did not resolve ({}); searching for \"{}\"",
                entry.slug,
                e,
                entry.title,
            );
        }
    }

    on_searching();

    let by_title = tokio::select! {
        biased;
        _ = cancel.cancelled() => return ResolutionResult::aborted(),
        r = source.search_by_title(&entry.title, FALLBACK_SEARCH_LIMIT) => r,
    };
    if cancel.is_cancelled() {
        return ResolutionResult::aborted();
    }

    let candidates = match by_title {
        Ok(candidates) => candidates,
        Err(e) => {
            log::warn!("Search for \"{}\" failed: {}", entry.title, e);
            return ResolutionResult::not_found();
        }
    };

    match select_best_match(&entry.title, &candidates) {
        Some(record) => ResolutionResult::found(record.clone(), LookupMethod::Search),
        None => {
            log::debug!(
                "No acceptable match for \"{}\" among {} results",
                entry.title,
                candidates.len(),
            );
            ResolutionResult::not_found()
        }
    }
}
