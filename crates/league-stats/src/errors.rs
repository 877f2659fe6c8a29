use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Could not determine config path")]
    #[diagnostic(
        code(config::path_unknown),
        help("The config file is stored next to the league-stats executable")
    )]
    ConfigPathUnknown,

    #[error("Configuration file error: {path}")]
    #[diagnostic(
        code(config::parse_error),
        help("Check config.toml for syntax errors, or run 'league-stats config reset'")
    )]
    ConfigParseError {
        path: Utf8PathBuf,
        #[source]
        source: ltk_game_data::Error,
    },

    #[error("Failed to save config to {path}")]
    #[diagnostic(
        code(config::save_failed),
        help("Check file permissions next to the executable")
    )]
    ConfigSaveFailed {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown champion: {name}")]
    #[diagnostic(
        code(champion::unknown),
        help("Use the champion's display name (e.g. 'Wukong') or internal id (e.g. 'MonkeyKing'). Run 'league-stats champions' for a list")
    )]
    UnknownChampion { name: String },

    #[error("No {what} available for {champion}")]
    #[diagnostic(
        code(analytics::unavailable),
        help("Analytics need 'functions_base_url' in config.toml. Run with RUST_LOG=debug for details")
    )]
    AnalyticsUnavailable { what: &'static str, champion: String },

    #[error("Failed to initialize game data client")]
    #[diagnostic(code(game_data::init_failed))]
    GameDataInit {
        #[source]
        source: ltk_game_data::Error,
    },

    #[error("IO operation failed")]
    #[diagnostic(code(io::operation_failed))]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn unknown_champion(name: impl Into<String>) -> Self {
        Self::UnknownChampion { name: name.into() }
    }

    pub fn analytics_unavailable(what: &'static str, champion: impl Into<String>) -> Self {
        Self::AnalyticsUnavailable {
            what,
            champion: champion.into(),
        }
    }
}
