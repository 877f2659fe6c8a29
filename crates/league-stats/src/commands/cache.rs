use clap::ValueEnum;
use colored::Colorize;
use ltk_game_data::{GameData, OPGG_NAMESPACE, STATIC_DATA_NAMESPACE, UGG_NAMESPACE};
use miette::Result;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheNamespace {
    All,
    /// Game version and static catalogs
    StaticData,
    Opgg,
    Ugg,
}

impl CacheNamespace {
    fn prefix(self) -> Option<&'static str> {
        match self {
            CacheNamespace::All => None,
            CacheNamespace::StaticData => Some(STATIC_DATA_NAMESPACE),
            CacheNamespace::Opgg => Some(OPGG_NAMESPACE),
            CacheNamespace::Ugg => Some(UGG_NAMESPACE),
        }
    }
}

pub fn clear_cache(data: &GameData, namespace: CacheNamespace) -> Result<()> {
    let removed = match namespace.prefix() {
        Some(prefix) => data.clear_cache(prefix),
        None => data.clear_all(),
    };

    println!(
        "{}",
        format!("✓ Removed {} cached entries", removed).bright_green().bold()
    );
    if let Some(dir) = &data.config().cache_dir {
        println!("  {} {}", "Cache dir:".bright_white().bold(), dir);
    }
    Ok(())
}
