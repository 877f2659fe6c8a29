use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{AnalyticsArgs, CacheNamespace, ConfigKey, StatsSource};
use errors::CliError;
use ltk_game_data::GameData;
use miette::Result;

mod commands;
mod errors;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Override the configured locale (e.g. en_US)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Keep the cache in memory for this run only
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current game version and analytics patch
    Version,
    /// List champions, optionally filtered by name or role tag
    Champions {
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show details for a champion
    Champion {
        /// Display name or internal id
        name: String,
    },
    /// Show aggregate stats for a champion
    Stats {
        champion: String,
        #[arg(short, long, value_enum, default_value = "opgg")]
        source: StatsSource,
        /// Rank tier filter (OP.GG only)
        #[arg(short, long)]
        tier: Option<String>,
        /// Position filter (OP.GG only)
        #[arg(short, long)]
        position: Option<String>,
    },
    /// Show best and worst matchups for a champion
    Matchups {
        champion: String,
        #[arg(short, long, value_enum, default_value = "opgg")]
        source: StatsSource,
        #[arg(short, long)]
        tier: Option<String>,
        #[arg(short, long)]
        position: Option<String>,
    },
    /// Show per-position stats for a champion
    Positions {
        champion: String,
        #[arg(short, long)]
        tier: Option<String>,
    },
    /// List items
    Items {
        /// Include items that cannot be bought in the shop
        #[arg(long)]
        all: bool,
    },
    /// List runes grouped by tree
    Runes,
    /// List summoner spells
    Spells,
    /// Remove cached data
    ClearCache {
        #[arg(value_enum, default_value = "all")]
        namespace: CacheNamespace,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommand>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show,
    /// Set a configuration value
    Set {
        #[arg(value_enum)]
        key: ConfigKey,
        value: String,
    },
    /// Reset configuration to defaults
    Reset,
}

fn parse_args() -> Args {
    // Configure colored/styled help output
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_game_data(args: &Args) -> Result<GameData> {
    let mut cfg = utils::config::effective_config();
    if let Some(locale) = &args.locale {
        cfg.locale = locale.clone();
    }
    if args.no_cache {
        cfg.cache_dir = None;
    }
    tracing::debug!(locale = %cfg.locale, cache_dir = ?cfg.cache_dir, "Building game data client");
    GameData::from_config(cfg).map_err(|source| CliError::GameDataInit { source }.into())
}

async fn run(args: Args, data: GameData) -> Result<()> {
    let json = args.json;
    match args.command {
        Commands::Version => commands::show_version(&data, json).await,
        Commands::Champions { filter } => commands::list_champions(&data, filter, json).await,
        Commands::Champion { name } => commands::show_champion(&data, &name, json).await,
        Commands::Stats {
            champion,
            source,
            tier,
            position,
        } => {
            commands::show_stats(
                &data,
                AnalyticsArgs {
                    champion,
                    source,
                    tier,
                    position,
                    json,
                },
            )
            .await
        }
        Commands::Matchups {
            champion,
            source,
            tier,
            position,
        } => {
            commands::show_matchups(
                &data,
                AnalyticsArgs {
                    champion,
                    source,
                    tier,
                    position,
                    json,
                },
            )
            .await
        }
        Commands::Positions { champion, tier } => {
            commands::show_positions(
                &data,
                AnalyticsArgs {
                    champion,
                    source: StatsSource::Opgg,
                    tier,
                    position: None,
                    json,
                },
            )
            .await
        }
        Commands::Items { all } => commands::list_items(&data, all, json).await,
        Commands::Runes => commands::list_runes(&data, json).await,
        Commands::Spells => commands::list_spells(&data, json).await,
        Commands::ClearCache { namespace } => commands::clear_cache(&data, namespace),
        Commands::Config { action } => run_config(action),
    }
}

fn run_config(action: Option<ConfigCommand>) -> Result<()> {
    match action {
        None | Some(ConfigCommand::Show) => commands::show_config(),
        Some(ConfigCommand::Set { key, value }) => commands::set_config_value(key, value),
        Some(ConfigCommand::Reset) => commands::reset_config(),
    }
}

fn main() -> Result<()> {
    init_logging();

    let args = parse_args();

    // Config commands must work even when the cache directory is unusable.
    if let Commands::Config { action } = args.command {
        return run_config(action);
    }

    let data = build_game_data(&args)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| CliError::IoError { source })?;
    runtime.block_on(run(args, data))
}
