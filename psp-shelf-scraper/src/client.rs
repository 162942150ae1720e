use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::credentials::Credentials;
use crate::error::ApiError;
use crate::systems;
use crate::types::{ApiGame, GameRecord, GamesPage};

/// Upper bound on a single request, connection through body.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a successful response is served from memory.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// A memoized response body and when it was fetched.
struct CachedResponse {
    body: String,
    fetched_at: Instant,
}

/// Outcome of a GET that produced an HTTP response.
enum Fetched<T> {
    Ok(T),
    Status(u16),
}

/// HTTP client for the RAWG games API with response memoization.
///
/// Successful responses are cached in memory keyed by the full request URL.
/// Entries are never evicted; a stale entry is simply refetched on the next
/// read.
pub struct RawgClient {
    http: reqwest::Client,
    creds: Credentials,
    cache_ttl: Duration,
    cache: Arc<Mutex<HashMap<String, CachedResponse>>>,
}

impl RawgClient {
    pub fn new(creds: Credentials) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(systems::user_agent())
            .build()?;

        Ok(Self {
            http,
            creds,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Load credentials from the environment/config file and build a client.
    pub fn from_config() -> Result<Self, ApiError> {
        Self::new(Credentials::load()?)
    }

    /// Override the memoization TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.creds.base_url
    }

    /// Fetch a single game by slug.
    ///
    /// A non-success status is `ApiError::NotFound`; a request that never got
    /// a response is `ApiError::Http`.
    pub async fn get_by_slug(&self, slug: &str) -> Result<GameRecord, ApiError> {
        let url = self.url(&["games", slug], &[])?;
        match self.get_json::<ApiGame>(url).await? {
            Fetched::Ok(game) => Ok(game.into()),
            Fetched::Status(status) => Err(ApiError::NotFound {
                slug: slug.to_string(),
                status,
            }),
        }
    }

    /// Search PSP games by title, returning the raw page envelope.
    pub async fn search(&self, title: &str, limit: u32) -> Result<GamesPage, ApiError> {
        let url = self.url(
            &["games"],
            &[
                ("search", title.to_string()),
                ("page_size", limit.to_string()),
                ("platforms", systems::platform_facet()),
            ],
        )?;
        let url_str = redact(&url);
        match self.get_json::<GamesPage>(url).await? {
            Fetched::Ok(page) => Ok(page),
            Fetched::Status(status) => Err(ApiError::Status {
                status,
                url: url_str,
            }),
        }
    }

    /// Search PSP games by title. An empty result is `Ok(vec![])`.
    pub async fn search_by_title(
        &self,
        title: &str,
        limit: u32,
    ) -> Result<Vec<GameRecord>, ApiError> {
        let page = self.search(title, limit).await?;
        Ok(page.results.into_iter().map(GameRecord::from).collect())
    }

    /// Number of memoized responses (fresh or stale).
    pub async fn cached_responses(&self) -> usize {
        self.cache.lock().await.len()
    }

    /// GET `url` and parse the body, serving from the memo cache when fresh.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: reqwest::Url,
    ) -> Result<Fetched<T>, ApiError> {
        let key = url.as_str().to_string();

        if let Some(body) = self.cached_body(&key).await {
            log::debug!("cache hit: {}", redact(&url));
            return Ok(Fetched::Ok(serde_json::from_str(&body)?));
        }

        log::debug!("GET {}", redact(&url));
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            log::debug!("HTTP {} for {}", status.as_u16(), key_path(&key));
            return Ok(Fetched::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        let parsed: T = serde_json::from_str(&body)?;

        self.cache.lock().await.insert(
            key,
            CachedResponse {
                body,
                fetched_at: Instant::now(),
            },
        );
        Ok(Fetched::Ok(parsed))
    }

    async fn cached_body(&self, key: &str) -> Option<String> {
        let cache = self.cache.lock().await;
        let entry = cache.get(key)?;
        if entry.fetched_at.elapsed() < self.cache_ttl {
            Some(entry.body.clone())
        } else {
            None
        }
    }

    /// Build `{base}/{segments..}?key=..&{params..}`.
    fn url(&self, segments: &[&str], params: &[(&str, String)]) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.creds.base_url)
            .map_err(|e| ApiError::Url(format!("{}: {}", self.creds.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(format!("{} cannot be a base URL", self.creds.base_url)))?
            .pop_if_empty()
            .extend(segments);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", &self.creds.api_key);
            for (k, v) in params {
                query.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

/// URL for logs and error messages, with the API key removed.
fn redact(url: &reqwest::Url) -> String {
    let mut clean = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "key")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if pairs.is_empty() {
        clean.set_query(None);
    } else {
        clean.query_pairs_mut().clear().extend_pairs(pairs);
    }
    clean.to_string()
}

fn key_path(key: &str) -> &str {
    key.split('?').next().unwrap_or(key)
}
