//! Data model for the curated showcase catalog.
//!
//! A catalog is an ordered list of genres; each genre is an ordered list of
//! curated `{title, slug}` pairs. Both orders are display order.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::paging::{self, PAGE_SIZE};

// ── Curated entry ───────────────────────────────────────────────────────────

/// A hand-picked game in a genre showcase, independent of live API data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedEntry {
    /// Display title, also the search text for the fallback lookup.
    pub title: String,
    /// RAWG slug tried first. May have drifted since curation.
    pub slug: String,
}

impl CuratedEntry {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
        }
    }
}

// ── Genre ───────────────────────────────────────────────────────────────────

/// One genre tab of the showcase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    /// External "see more" link for the genre.
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub games: Vec<CuratedEntry>,
}

impl Genre {
    pub fn total_pages(&self) -> u32 {
        paging::total_pages(self.games.len())
    }

    /// The `page`-th slice of games (1-based). Out-of-range pages are an
    /// error, never clamped.
    pub fn page(&self, page: u32) -> Result<&[CuratedEntry], CatalogError> {
        let total = self.total_pages();
        if page == 0 || page > total {
            return Err(CatalogError::PageOutOfRange {
                genre: self.name.clone(),
                page,
                total,
            });
        }
        let start = (page as usize - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.games.len());
        Ok(&self.games[start..end])
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// The full curated catalog, loaded once at startup and never written back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreCatalog {
    pub genres: Vec<Genre>,
}

impl GenreCatalog {
    /// Build a catalog, rejecting duplicate names and empty genres.
    pub fn new(genres: Vec<Genre>) -> Result<Self, CatalogError> {
        let catalog = Self { genres };
        catalog.validate()?;
        Ok(catalog)
    }

    pub(crate) fn validate(&self) -> Result<(), CatalogError> {
        for (i, genre) in self.genres.iter().enumerate() {
            if genre.games.is_empty() {
                return Err(CatalogError::EmptyGenre(genre.name.clone()));
            }
            if self.genres[..i]
                .iter()
                .any(|g| g.name.eq_ignore_ascii_case(&genre.name))
            {
                return Err(CatalogError::DuplicateGenre(genre.name.clone()));
            }
        }
        Ok(())
    }

    /// Look up a genre by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Genre> {
        self.genres
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
    }

    /// Like [`get`](Self::get) but returns `UnknownGenre` on a miss.
    pub fn genre(&self, name: &str) -> Result<&Genre, CatalogError> {
        self.get(name)
            .ok_or_else(|| CatalogError::UnknownGenre(name.to_string()))
    }

    /// Genre names in tab order.
    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(|g| g.name.as_str())
    }

    /// Entries on page `page` (1-based) of `genre`.
    pub fn page(&self, genre: &str, page: u32) -> Result<&[CuratedEntry], CatalogError> {
        self.genre(genre)?.page(page)
    }

    pub fn total_pages(&self, genre: &str) -> Result<u32, CatalogError> {
        Ok(self.genre(genre)?.total_pages())
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }
}
