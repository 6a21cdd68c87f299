//! Configuration management for tunefeed.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Unlike a set of global getters, the
//! values are collected once into a [`Config`] that is handed to the
//! components that need it.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};

use crate::{types::ImageMiss, upstream::ChartPeriod};

pub const DEFAULT_API_URL: &str = "https://spotify-scraper.p.rapidapi.com/v1";
pub const DEFAULT_CATALOG_URL: &str = "https://open.spotify.com";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FAN_OUT: usize = 8;

/// Loads environment variables from `<data_local_dir>/tunefeed/.env`.
///
/// Creates the directory if needed. A missing `.env` file is fine: the
/// process environment alone may carry the configuration.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunefeed/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// What to show when an image cannot be resolved.
///
/// - `Sentinel` - a short text describing the miss (`"No Image Tag Found"`,
///   `"No Image URL"`, `"No URL"`)
/// - `Empty` - an empty string
/// - `Placeholder` - a fixed image URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageFallback {
    #[default]
    Sentinel,
    Empty,
    Placeholder(String),
}

impl ImageFallback {
    /// The value shown in place of an image that could not be resolved.
    pub fn text_for(&self, miss: ImageMiss) -> String {
        match self {
            ImageFallback::Sentinel => match miss {
                ImageMiss::NoImageTag | ImageMiss::PageUnavailable => "No Image Tag Found",
                ImageMiss::NoImageUrl => "No Image URL",
                ImageMiss::MissingField => "No URL",
            }
            .to_string(),
            ImageFallback::Empty => String::new(),
            ImageFallback::Placeholder(url) => url.clone(),
        }
    }
}

impl FromStr for ImageFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(url) = trimmed.strip_prefix("placeholder:") {
            let url = url.trim();
            if url.is_empty() {
                return Err("placeholder needs a url".to_string());
            }
            return Ok(ImageFallback::Placeholder(url.to_string()));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "sentinel" => Ok(ImageFallback::Sentinel),
            "empty" => Ok(ImageFallback::Empty),
            other => Err(format!("unknown image fallback '{}'", other)),
        }
    }
}

/// What the track page shows in place of a missing audio preview.
///
/// - `Notice` - the text `"Preview unavailable"`
/// - `Hidden` - nothing, the player area is left out
/// - `Text` - a custom notice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AudioFallback {
    #[default]
    Notice,
    Hidden,
    Text(String),
}

impl AudioFallback {
    pub const NOTICE: &'static str = "Preview unavailable";

    /// Notice to render, `None` when the player area is hidden.
    pub fn notice(&self) -> Option<&str> {
        match self {
            AudioFallback::Notice => Some(Self::NOTICE),
            AudioFallback::Hidden => None,
            AudioFallback::Text(text) => Some(text.as_str()),
        }
    }
}

impl FromStr for AudioFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(text) = trimmed.strip_prefix("text:") {
            let text = text.trim();
            if text.is_empty() {
                return Err("text needs a message".to_string());
            }
            return Ok(AudioFallback::Text(text.to_string()));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "notice" => Ok(AudioFallback::Notice),
            "hidden" => Ok(AudioFallback::Hidden),
            other => Err(format!("unknown audio fallback '{}'", other)),
        }
    }
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Value of the `x-rapidapi-key` header.
    pub api_key: String,
    /// Value of the `x-rapidapi-host` header.
    pub api_host: String,
    pub api_url: String,
    pub catalog_url: String,
    pub server_addr: String,
    pub request_timeout: Duration,
    pub chart_period: ChartPeriod,
    /// Maximum number of image resolutions in flight for one page.
    pub fan_out: usize,
    pub image_fallback: ImageFallback,
    pub audio_fallback: AudioFallback,
    /// Directory holding `users.json`.
    pub data_dir: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let api_key = required("RAPIDAPI_KEY")?;
        let api_host = required("RAPIDAPI_HOST")?;

        let api_url = get("RAPIDAPI_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let catalog_url = get("CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        let server_addr =
            get("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "REQUEST_TIMEOUT_SECS",
                        value: v,
                    });
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let chart_period = match get("CHART_PERIOD") {
            Some(v) => v.parse::<ChartPeriod>().map_err(|_| ConfigError::Invalid {
                key: "CHART_PERIOD",
                value: v,
            })?,
            None => ChartPeriod::default(),
        };

        let fan_out = match get("RESOLVE_CONCURRENCY") {
            Some(v) => match v.trim().parse::<usize>() {
                Ok(n) => n.max(1),
                Err(_) => {
                    return Err(ConfigError::Invalid {
                        key: "RESOLVE_CONCURRENCY",
                        value: v,
                    });
                }
            },
            None => DEFAULT_FAN_OUT,
        };

        let image_fallback = match get("IMAGE_FALLBACK") {
            Some(v) => v.parse::<ImageFallback>().map_err(|_| ConfigError::Invalid {
                key: "IMAGE_FALLBACK",
                value: v,
            })?,
            None => ImageFallback::default(),
        };

        let audio_fallback = match get("AUDIO_FALLBACK") {
            Some(v) => v.parse::<AudioFallback>().map_err(|_| ConfigError::Invalid {
                key: "AUDIO_FALLBACK",
                value: v,
            })?,
            None => AudioFallback::default(),
        };

        let data_dir = get("TUNEFEED_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Ok(Config {
            api_key,
            api_host,
            api_url: api_url.trim_end_matches('/').to_string(),
            catalog_url: catalog_url.trim_end_matches('/').to_string(),
            server_addr,
            request_timeout,
            chart_period,
            fan_out,
            image_fallback,
            audio_fallback,
            data_dir,
        })
    }

    /// Location of the JSON user store.
    pub fn users_path(&self) -> PathBuf {
        users_path_in(&self.data_dir)
    }
}

/// Location of the JSON user store without requiring API credentials.
pub fn users_path_from_env() -> PathBuf {
    let data_dir = env::var("TUNEFEED_DATA_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_data_dir);
    users_path_in(&data_dir)
}

fn users_path_in(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("users.json")
}

fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunefeed");
    path
}
