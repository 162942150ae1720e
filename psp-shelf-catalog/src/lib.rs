//! Curated genre catalog, pagination, and the personal collection store.
//!
//! This crate has no network dependencies. The curated showcase lists are
//! bundled YAML; the collection is a JSON file in the user's data directory.
//! Live metadata resolution lives in `psp-shelf-scraper`.

pub mod collection;
pub mod error;
pub mod paging;
pub mod types;
pub mod yaml;

pub use collection::{Collection, CollectionItem, collection_path};
pub use error::CatalogError;
pub use paging::{PAGE_SIZE, PaginationState, total_pages};
pub use types::{CuratedEntry, Genre, GenreCatalog};
pub use yaml::{bundled_catalog, load_catalog, parse_catalog};
