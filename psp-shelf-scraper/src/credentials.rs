use std::path::PathBuf;

use crate::error::ApiError;

// XOR-obfuscated API key embedded at compile time.
// Set PSP_SHELF_RAWG_KEY when building to embed one.
include!(concat!(env!("OUT_DIR"), "/embedded_credentials.rs"));

/// Public RAWG endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

fn deobfuscate(data: &[u8]) -> String {
    let decoded: Vec<u8> = data
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ OBFUSCATION_KEY[i % OBFUSCATION_KEY.len()])
        .collect();
    String::from_utf8_lossy(&decoded).into_owned()
}

fn embedded_api_key() -> Option<String> {
    EMBEDDED_API_KEY.map(deobfuscate)
}

/// Returns true if an API key was embedded at compile time.
pub fn has_embedded_api_key() -> bool {
    EMBEDDED_API_KEY.is_some()
}

/// Credentials and endpoint for the RAWG API.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub base_url: String,
}

/// Where a credential field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Embedded at compile time.
    Embedded,
    /// Hard-coded default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Embedded => write!(f, "embedded"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each credential field.
#[derive(Debug)]
pub struct CredentialSources {
    pub api_key: CredentialSource,
    pub base_url: CredentialSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    rawg: Option<RawgConfig>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct RawgConfig {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl Credentials {
    /// Load credentials from environment variables, config file, or the
    /// embedded key.
    ///
    /// Priority: env vars > config file > embedded (compile-time).
    pub fn load() -> Result<Self, ApiError> {
        let config = load_config_file();

        let api_key = std::env::var("RAWG_API_KEY")
            .ok()
            .or_else(|| config.as_ref().and_then(|c| c.api_key.clone()))
            .or_else(embedded_api_key)
            .ok_or_else(|| {
                ApiError::config(
                    "Missing api_key. Set RAWG_API_KEY env var or run 'psp-shelf config setup'",
                )
            })?;

        let base_url = std::env::var("RAWG_BASE_URL")
            .ok()
            .or_else(|| config.as_ref().and_then(|c| c.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }

    /// Credentials with explicit values, e.g. for tests or a mock server.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

/// Return the path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("psp-shelf").join("credentials.toml"))
}

/// Save credentials to the config file, creating parent directories as needed.
///
/// The API key is omitted if it matches the embedded key, and the base URL
/// is omitted if it is the default. Returns the path written.
pub fn save_to_file(creds: &Credentials) -> Result<PathBuf, ApiError> {
    let path = config_path()
        .ok_or_else(|| ApiError::config("Could not determine config directory"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let key_differs = embedded_api_key().as_ref() != Some(&creds.api_key);

    let config = ConfigFile {
        rawg: Some(RawgConfig {
            api_key: key_differs.then(|| creds.api_key.clone()),
            base_url: (creds.base_url != DEFAULT_BASE_URL).then(|| creds.base_url.clone()),
        }),
    };

    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| ApiError::config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(&path, toml_str)?;
    Ok(path)
}

/// Determine where each credential field is coming from.
pub fn credential_sources() -> CredentialSources {
    let config = load_config_file();

    let api_key = if std::env::var("RAWG_API_KEY").is_ok() {
        CredentialSource::EnvVar("RAWG_API_KEY")
    } else if config.as_ref().and_then(|c| c.api_key.as_ref()).is_some() {
        CredentialSource::ConfigFile
    } else if has_embedded_api_key() {
        CredentialSource::Embedded
    } else {
        CredentialSource::Missing
    };

    let base_url = if std::env::var("RAWG_BASE_URL").is_ok() {
        CredentialSource::EnvVar("RAWG_BASE_URL")
    } else if config.as_ref().and_then(|c| c.base_url.as_ref()).is_some() {
        CredentialSource::ConfigFile
    } else {
        CredentialSource::Default
    };

    CredentialSources { api_key, base_url }
}

fn load_config_file() -> Option<RawgConfig> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Option<RawgConfig> {
    match toml::from_str::<ConfigFile>(content) {
        Ok(config) => config.rawg,
        Err(e) => {
            log::warn!("Ignoring malformed credentials file: {}", e);
            None
        }
    }
}
