//! Page arithmetic and the per-genre current-page state.

use std::collections::HashMap;

use crate::error::CatalogError;
use crate::types::GenreCatalog;

/// Curated entries shown per showcase page.
pub const PAGE_SIZE: usize = 8;

/// `ceil(len / PAGE_SIZE)`.
pub fn total_pages(len: usize) -> u32 {
    len.div_ceil(PAGE_SIZE) as u32
}

/// Current page per genre, 1-based. Genres never visited are on page 1, and
/// a genre keeps its page across tab switches. Keys fold ASCII case only,
/// the same rule [`GenreCatalog::get`] uses.
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    pages: HashMap<String, u32>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self, genre: &str) -> u32 {
        self.pages
            .get(&genre.to_ascii_lowercase())
            .copied()
            .unwrap_or(1)
    }

    /// Move `genre` to `page`, rejecting pages outside `1..=total_pages`.
    pub fn set(
        &mut self,
        catalog: &GenreCatalog,
        genre: &str,
        page: u32,
    ) -> Result<u32, CatalogError> {
        let g = catalog.genre(genre)?;
        let total = g.total_pages();
        if page == 0 || page > total {
            return Err(CatalogError::PageOutOfRange {
                genre: g.name.clone(),
                page,
                total,
            });
        }
        self.pages.insert(g.name.to_ascii_lowercase(), page);
        Ok(page)
    }
}
