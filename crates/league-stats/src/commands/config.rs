use crate::utils::config;
use camino::Utf8PathBuf;
use clap::ValueEnum;
use colored::Colorize;
use ltk_game_data::GameDataConfig;
use miette::Result;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigKey {
    Locale,
    DefaultTier,
    StaticDataBaseUrl,
    FunctionsBaseUrl,
    FunctionsApiKey,
    CacheDir,
}

fn print_entry(name: &str, value: Option<&str>) {
    match value {
        Some(v) if !v.is_empty() => {
            println!("  {} {}", format!("{}:", name).bright_white(), v)
        }
        _ => println!(
            "  {} {}",
            format!("{}:", name).bright_white(),
            "(not set)".bright_yellow()
        ),
    }
}

pub fn show_config() -> Result<()> {
    let config_path = config::default_config_path()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let cfg = match config::default_config_path() {
        Some(path) => config::load_config_from(&path)?,
        None => GameDataConfig::default(),
    };

    println!();
    println!("  {} {}", "config_file:".bright_white(), config_path);
    print_entry("locale", Some(&cfg.locale));
    print_entry("default_tier", Some(&cfg.default_tier));
    print_entry("static_data_base_url", Some(&cfg.static_data_base_url));
    print_entry("functions_base_url", Some(&cfg.functions_base_url));
    print_entry(
        "functions_api_key",
        cfg.functions_api_key.as_ref().map(|_| "(hidden)"),
    );
    print_entry("fallback_version", Some(&cfg.fallback_version));
    print_entry(
        "static_data_ttl_secs",
        Some(&cfg.static_data_ttl_secs.to_string()),
    );
    print_entry(
        "analytics_ttl_secs",
        Some(&cfg.analytics_ttl_secs.to_string()),
    );
    match &cfg.cache_dir {
        Some(dir) => print_entry("cache_dir", Some(dir.as_str())),
        None => println!(
            "  {} {} {}",
            "cache_dir:".bright_white(),
            config::default_cache_dir()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "(in memory)".to_string()),
            "(default)".dimmed()
        ),
    }
    println!();
    Ok(())
}

pub fn set_config_value(key: ConfigKey, value: String) -> Result<()> {
    let mut cfg = config::load_config();
    let display = match key {
        ConfigKey::FunctionsApiKey => "(hidden)".to_string(),
        _ => value.clone(),
    };

    match key {
        ConfigKey::Locale => cfg.locale = value,
        ConfigKey::DefaultTier => cfg.default_tier = value,
        ConfigKey::StaticDataBaseUrl => cfg.static_data_base_url = value,
        ConfigKey::FunctionsBaseUrl => cfg.functions_base_url = value,
        ConfigKey::FunctionsApiKey => {
            cfg.functions_api_key = Some(value).filter(|v| !v.is_empty())
        }
        ConfigKey::CacheDir => cfg.cache_dir = Some(Utf8PathBuf::from(value)),
    }

    let path = config::save_config(&cfg)?;
    println!("{}", "✓ Configuration updated".bright_green().bold());
    println!();
    println!(
        "  {} {}",
        format!("{:?}:", key).bright_white().bold(),
        display.bright_green()
    );
    println!("  {} {}", "Config file:".bright_white().bold(), path);
    Ok(())
}

pub fn reset_config() -> Result<()> {
    let path = config::save_config(&GameDataConfig::default())?;

    println!(
        "{}",
        "✓ Configuration reset to defaults".bright_green().bold()
    );
    println!();
    println!("  {} {}", "Config file:".bright_white().bold(), path);
    println!();
    println!(
        "  {}",
        "Run 'league-stats config set functions-base-url <url>' to enable analytics".bright_cyan()
    );
    Ok(())
}
