//! Runtime configuration for the game data subsystem.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_STATIC_DATA_BASE_URL: &str = "https://ddragon.leagueoflegends.com";
pub const DEFAULT_LOCALE: &str = "pt_BR";
pub const DEFAULT_TIER: &str = "platinum_plus";
/// Version used when the static data provider cannot be reached.
pub const FALLBACK_VERSION: &str = "14.24.1";

/// Settings shared by every component, usually read from a `config.toml`.
///
/// Every field has a default, so a partial (or empty) TOML file is valid:
///
/// ```toml
/// locale = "en_US"
/// functions_base_url = "https://project.example/functions/v1"
/// cache_dir = "/tmp/league-stats"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameDataConfig {
    /// Root of the static data CDN (versions list and per-version catalogs).
    pub static_data_base_url: String,

    /// Root URL the named analytics functions are invoked under.
    /// Empty disables remote analytics; every provider call then fails soft.
    pub functions_base_url: String,

    /// Key sent with every remote function invocation, if set.
    pub functions_api_key: Option<String>,

    pub locale: String,
    pub default_tier: String,
    pub fallback_version: String,

    pub static_data_ttl_secs: u64,
    pub analytics_ttl_secs: u64,

    /// Directory for the file-backed cache. `None` keeps the cache in memory.
    pub cache_dir: Option<Utf8PathBuf>,
}

impl Default for GameDataConfig {
    fn default() -> Self {
        Self {
            static_data_base_url: DEFAULT_STATIC_DATA_BASE_URL.to_string(),
            functions_base_url: String::new(),
            functions_api_key: None,
            locale: DEFAULT_LOCALE.to_string(),
            default_tier: DEFAULT_TIER.to_string(),
            fallback_version: FALLBACK_VERSION.to_string(),
            static_data_ttl_secs: 24 * 60 * 60,
            analytics_ttl_secs: 6 * 60 * 60,
            cache_dir: None,
        }
    }
}

impl GameDataConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_std_path())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file is missing or malformed.
    pub fn load_or_default(path: &Utf8Path) -> Self {
        if !path.as_std_path().exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("Ignoring invalid config at {}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn static_data_ttl(&self) -> Duration {
        Duration::from_secs(self.static_data_ttl_secs)
    }

    pub fn analytics_ttl(&self) -> Duration {
        Duration::from_secs(self.analytics_ttl_secs)
    }
}
