pub mod async_util;
pub mod client;
pub mod credentials;
pub mod error;
pub mod lookup;
pub mod matcher;
pub mod showcase;
pub mod systems;
pub mod types;

pub use async_util::run_with_events;
pub use client::{DEFAULT_CACHE_TTL, RawgClient};
pub use credentials::{
    CredentialSource, CredentialSources, Credentials, config_path, credential_sources,
    has_embedded_api_key, save_to_file,
};
pub use error::ApiError;
pub use lookup::{
    LookupMethod, MetadataSource, ResolutionResult, ResolutionStatus, resolve_entry,
};
pub use matcher::{distance, select_best_match};
pub use showcase::{Dispatch, Showcase, ShowcaseBoard, ShowcaseEvent, Slot, resolve_page};
pub use systems::{FALLBACK_SEARCH_LIMIT, PSP_PLATFORM_ID};
pub use types::{GameRecord, GamesPage};
