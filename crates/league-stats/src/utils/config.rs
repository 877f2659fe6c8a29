//! Application configuration management utilities.

use crate::errors::CliError;
use camino::{Utf8Path, Utf8PathBuf};
use ltk_game_data::GameDataConfig;
use std::env;
use std::fs;

/// Returns the directory where the current executable resides.
pub fn install_dir() -> Option<Utf8PathBuf> {
    let exe = env::current_exe().ok()?;
    let parent = exe.parent()?;
    Utf8PathBuf::from_path_buf(parent.to_path_buf()).ok()
}

/// Returns a config file path located next to the executable.
pub fn config_path(file_name: &str) -> Option<Utf8PathBuf> {
    install_dir().map(|dir| dir.join(file_name))
}

/// Returns the default configuration file path (config.toml).
pub fn default_config_path() -> Option<Utf8PathBuf> {
    config_path("config.toml")
}

/// Platform cache directory used when `cache_dir` is not configured.
pub fn default_cache_dir() -> Option<Utf8PathBuf> {
    let dirs = directories_next::ProjectDirs::from("gg", "LeagueToolkit", "league-stats")?;
    Utf8PathBuf::from_path_buf(dirs.cache_dir().to_path_buf()).ok()
}

/// Loads the configuration from config.toml.
/// Returns default configuration if the file doesn't exist or cannot be parsed.
pub fn load_config() -> GameDataConfig {
    match default_config_path() {
        Some(path) => GameDataConfig::load_or_default(&path),
        None => GameDataConfig::default(),
    }
}

/// Loads the configuration strictly, reporting parse errors.
pub fn load_config_from(path: &Utf8Path) -> Result<GameDataConfig, CliError> {
    if !path.exists() {
        return Ok(GameDataConfig::default());
    }
    GameDataConfig::load(path).map_err(|source| CliError::ConfigParseError {
        path: path.to_owned(),
        source,
    })
}

/// Saves the configuration to config.toml.
pub fn save_config(cfg: &GameDataConfig) -> Result<Utf8PathBuf, CliError> {
    let path = default_config_path().ok_or(CliError::ConfigPathUnknown)?;
    save_config_to(&path, cfg)?;
    Ok(path)
}

pub fn save_config_to(path: &Utf8Path, cfg: &GameDataConfig) -> Result<(), CliError> {
    let content = toml::to_string_pretty(cfg).map_err(|e| CliError::ConfigSaveFailed {
        path: path.to_owned(),
        source: std::io::Error::other(e),
    })?;
    fs::write(path.as_std_path(), content).map_err(|source| CliError::ConfigSaveFailed {
        path: path.to_owned(),
        source,
    })
}

/// The configuration the game data client is built from: the saved config,
/// with the platform cache directory filled in when none is set.
pub fn effective_config() -> GameDataConfig {
    let mut cfg = load_config();
    if cfg.cache_dir.is_none() {
        cfg.cache_dir = default_cache_dir();
    }
    cfg
}
