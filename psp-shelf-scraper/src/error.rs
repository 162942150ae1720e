/// Errors from talking to the RAWG API or loading its configuration.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: connection, TLS, timeout, or body read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Slug lookup answered with a non-success status.
    #[error("Game \"{slug}\" not found (HTTP {status})")]
    NotFound { slug: String, status: u16 },

    /// Search or other request answered with a non-success status.
    #[error("Server error (HTTP {status}) for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse API response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    Url(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
