mod analytics;
mod cache;
mod catalog;
mod config;

pub use analytics::{show_matchups, show_positions, show_stats, AnalyticsArgs, StatsSource};
pub use cache::{clear_cache, CacheNamespace};
pub use catalog::{list_champions, list_items, list_runes, list_spells, show_champion, show_version};
pub use config::{reset_config, set_config_value, show_config, ConfigKey};

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}
