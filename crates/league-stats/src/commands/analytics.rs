use super::print_json;
use crate::errors::CliError;
use crate::println_pad;
use crate::utils::{colored_win_rate, format_games, format_rate};
use clap::ValueEnum;
use colored::Colorize;
use ltk_game_data::static_data::resolve_champion_id;
use ltk_game_data::{ChampionCounter, ChampionMeta, GameData, Matchups};
use miette::Result;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsSource {
    /// OP.GG, filtered by tier and position
    Opgg,
    /// U.GG, current patch overall
    Ugg,
}

pub struct AnalyticsArgs {
    pub champion: String,
    pub source: StatsSource,
    pub tier: Option<String>,
    pub position: Option<String>,
    pub json: bool,
}

impl AnalyticsArgs {
    fn tier<'a>(&'a self, data: &'a GameData) -> &'a str {
        self.tier.as_deref().unwrap_or(&data.config().default_tier)
    }
}

/// U.GG lookups need a champion the static catalog knows about.
async fn ensure_known_champion(data: &GameData, name: &str) -> Result<()> {
    if resolve_champion_id(&data.champions().await, name).is_none() {
        return Err(CliError::unknown_champion(name).into());
    }
    Ok(())
}

pub async fn show_stats(data: &GameData, args: AnalyticsArgs) -> Result<()> {
    let meta = match args.source {
        StatsSource::Opgg => {
            data.opgg()
                .champion_stats(&args.champion, args.tier(data), args.position.as_deref())
                .await
        }
        StatsSource::Ugg => {
            ensure_known_champion(data, &args.champion).await?;
            data.ugg().champion_stats(&args.champion).await
        }
    }
    .ok_or_else(|| CliError::analytics_unavailable("stats", args.champion.as_str()))?;

    if args.json {
        return print_json(&meta);
    }
    print_meta(&meta);
    Ok(())
}

fn print_meta(meta: &ChampionMeta) {
    println_pad!(
        "{} {}",
        "📊 Stats:".bright_blue().bold(),
        meta.champion_name.bright_cyan().bold()
    );
    if !meta.tier.is_empty() || !meta.position.is_empty() {
        println_pad!(
            "{}",
            format!("{} {}", meta.tier, meta.position).trim().dimmed()
        );
    }
    println_pad!("{} {}", "Win rate:".bright_green(), colored_win_rate(meta.win_rate));
    println_pad!("{} {}", "Pick rate:".bright_green(), format_rate(meta.pick_rate));
    println_pad!("{} {}", "Ban rate:".bright_green(), format_rate(meta.ban_rate));
    println_pad!("{} {}", "Games:".bright_green(), format_games(meta.games));
    println_pad!(
        "{} {:.1} / {:.1} / {:.1} {}",
        "KDA:".bright_green(),
        meta.avg_kills,
        meta.avg_deaths,
        meta.avg_assists,
        format!("({:.2})", meta.kda).dimmed()
    );
}

pub async fn show_matchups(data: &GameData, args: AnalyticsArgs) -> Result<()> {
    let matchups = match args.source {
        StatsSource::Opgg => {
            let tier = args.tier(data);
            let position = args.position.as_deref();
            Matchups {
                best: data.opgg().best_matchups(&args.champion, tier, position).await,
                worst: data.opgg().worst_matchups(&args.champion, tier, position).await,
            }
        }
        StatsSource::Ugg => {
            ensure_known_champion(data, &args.champion).await?;
            data.ugg().matchups(&args.champion).await
        }
    };

    if matchups.is_empty() {
        return Err(CliError::analytics_unavailable("matchups", args.champion.as_str()).into());
    }
    if args.json {
        return print_json(&matchups);
    }

    print_counters("✅ Best matchups:", &matchups.best);
    println!();
    print_counters("❌ Worst matchups:", &matchups.worst);
    Ok(())
}

fn print_counters(title: &str, counters: &[ChampionCounter]) {
    println_pad!("{}", title.bright_magenta().bold());
    if counters.is_empty() {
        println_pad!("   {}", "(none)".dimmed());
    }
    for counter in counters {
        let lane = counter
            .lane_win_rate
            .map(|r| format!(" lane {}", format_rate(r)))
            .unwrap_or_default();
        println_pad!(
            "   {} {:<16} {} {}",
            "•".bright_cyan(),
            counter.champion_name.bright_cyan(),
            colored_win_rate(counter.win_rate),
            format!("({} games{})", format_games(counter.games), lane).dimmed()
        );
    }
}

pub async fn show_positions(data: &GameData, args: AnalyticsArgs) -> Result<()> {
    let positions = data
        .opgg()
        .champion_positions(&args.champion, args.tier(data))
        .await;

    if positions.is_empty() {
        return Err(CliError::analytics_unavailable("positions", args.champion.as_str()).into());
    }
    if args.json {
        return print_json(&positions);
    }

    println_pad!(
        "{} {}",
        "🗺️  Positions:".bright_blue().bold(),
        args.champion.bright_cyan().bold()
    );
    for position in &positions {
        println_pad!(
            "   {} {:<8} {} {} {}",
            "•".bright_cyan(),
            position.position.bright_white().bold(),
            colored_win_rate(position.win_rate),
            format!("pick {}", format_rate(position.pick_rate)).bright_yellow(),
            format!("({} games)", format_games(position.games)).dimmed()
        );
    }
    Ok(())
}
