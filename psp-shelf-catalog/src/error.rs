use thiserror::Error;

/// Errors from loading the curated catalog, paging it, or touching the
/// collection file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Genre \"{0}\" is listed more than once")]
    DuplicateGenre(String),

    #[error("Genre \"{0}\" has no games")]
    EmptyGenre(String),

    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    #[error("No genre is selected")]
    NoActiveGenre,

    /// Pages are 1-based and never clamped.
    #[error("Page {page} is out of range for \"{genre}\" (1..={total})")]
    PageOutOfRange { genre: String, page: u32, total: u32 },

    #[error("Could not determine data directory")]
    NoDataDir,
}

impl CatalogError {
    pub(crate) fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }
}
