//! RAWG-specific identifiers for the handheld this application is about.
//!
//! These are third-party API details, kept here rather than in the catalog.

/// RAWG platform id for the PlayStation Portable.
pub const PSP_PLATFORM_ID: u64 = 17;

/// Value of the `platforms` query facet restricting searches to the PSP.
pub fn platform_facet() -> String {
    PSP_PLATFORM_ID.to_string()
}

/// Number of search results fetched when falling back from a slug lookup.
pub const FALLBACK_SEARCH_LIMIT: u32 = 5;

/// Client identifier sent with every request.
pub fn user_agent() -> String {
    format!("psp-shelf/{}", env!("CARGO_PKG_VERSION"))
}
