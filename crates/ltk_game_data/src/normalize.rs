//! Canonicalization of heterogeneous analytics payloads.
//!
//! Upstream providers disagree on field naming (`winRate` vs `win_rate` vs
//! `wr`), on numeric encoding (numbers vs numeric strings) and on scale
//! (percent vs fraction). Everything here is a pure function from raw JSON to
//! the canonical types in [`crate::types`]. Missing numbers become `0.0`,
//! missing lists become empty.

use crate::shape::field;
use crate::types::{ChampionAnalysis, ChampionCounter, ChampionMeta, PositionStats};
use serde_json::Value;

/// Field alias tables, most specific spelling first.
pub mod aliases {
    pub const CHAMPION_NAME: &[&str] = &["championName", "champion_name"];
    pub const TIER: &[&str] = &["tier", "rank_tier"];
    pub const POSITION: &[&str] = &["position", "lane"];
    pub const WIN_RATE: &[&str] = &["winRate", "win_rate"];
    pub const PICK_RATE: &[&str] = &["pickRate", "pick_rate"];
    pub const BAN_RATE: &[&str] = &["banRate", "ban_rate"];
    pub const GAMES: &[&str] = &["games"];
    pub const AVG_KILLS: &[&str] = &["avgKills", "avg_kills"];
    pub const AVG_DEATHS: &[&str] = &["avgDeaths", "avg_deaths"];
    pub const AVG_ASSISTS: &[&str] = &["avgAssists", "avg_assists"];
    pub const KDA: &[&str] = &["kda"];
    pub const LANE_WIN_RATE: &[&str] = &["laneWinRate", "lane_win_rate"];
    pub const WEAK_COUNTERS: &[&str] = &["weakCounters", "weak_counters"];
    pub const STRONG_COUNTERS: &[&str] = &["strongCounters", "strong_counters"];

    // Abbreviated spellings seen in schema-free overview and matchup tables.
    pub const LOOSE_WIN_RATE: &[&str] = &["winRate", "win_rate", "wr", "win"];
    pub const LOOSE_PICK_RATE: &[&str] = &["pickRate", "pick_rate", "pr"];
    pub const LOOSE_BAN_RATE: &[&str] = &["banRate", "ban_rate", "br"];
    pub const LOOSE_GAMES: &[&str] = &["games", "n", "count"];
    pub const MATCHUP_WIN_RATE: &[&str] = &["winRate", "win_rate", "wr"];
    pub const MATCHUP_GAMES: &[&str] = &["games", "count", "n"];
    pub const OPPONENT_ID: &[&str] = &["enemyChampionId", "opponentId", "cid", "id"];
}

/// Interpret a JSON number or numeric string as a finite `f64`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Interpret a JSON number or numeric string as an integral champion id.
///
/// Fractional values are rejected rather than truncated.
pub fn coerce_id(value: &Value) -> Option<i64> {
    if let Some(id) = value.as_i64() {
        return Some(id);
    }
    let n = coerce_number(value)?;
    (n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
}

/// First aliased field coerced to a number, or `0.0`.
pub fn number(value: &Value, aliases: &[&str]) -> f64 {
    field(value, aliases).and_then(coerce_number).unwrap_or(0.0)
}

/// First aliased field that is a string.
pub fn text(value: &Value, aliases: &[&str]) -> Option<String> {
    field(value, aliases)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Scale a rate reported as a fraction (`0.56`) up to a percentage (`56`).
///
/// Values above `1` are assumed to already be percentages.
pub fn to_percentage(raw: f64) -> f64 {
    if raw <= 1.0 {
        // 0.56 * 100.0 is 56.00000000000001 in binary floating point
        (raw * 100.0 * 1e6).round() / 1e6
    } else {
        raw
    }
}

pub fn normalize_meta(raw: &Value, fallback_name: &str) -> ChampionMeta {
    ChampionMeta {
        champion_name: text(raw, aliases::CHAMPION_NAME).unwrap_or_else(|| fallback_name.to_string()),
        tier: text(raw, aliases::TIER).unwrap_or_default(),
        position: text(raw, aliases::POSITION).unwrap_or_default(),
        win_rate: number(raw, aliases::WIN_RATE),
        pick_rate: number(raw, aliases::PICK_RATE),
        ban_rate: number(raw, aliases::BAN_RATE),
        games: number(raw, aliases::GAMES),
        avg_kills: number(raw, aliases::AVG_KILLS),
        avg_deaths: number(raw, aliases::AVG_DEATHS),
        avg_assists: number(raw, aliases::AVG_ASSISTS),
        kda: number(raw, aliases::KDA),
    }
}

pub fn normalize_counter(raw: &Value) -> ChampionCounter {
    ChampionCounter {
        champion_name: text(raw, aliases::CHAMPION_NAME).unwrap_or_default(),
        win_rate: number(raw, aliases::WIN_RATE),
        games: number(raw, aliases::GAMES),
        lane_win_rate: field(raw, aliases::LANE_WIN_RATE).and_then(coerce_number),
    }
}

fn normalize_counter_list(raw: &Value, aliases: &[&str]) -> Vec<ChampionCounter> {
    field(raw, aliases)
        .and_then(Value::as_array)
        .map(|rows| rows.iter().map(normalize_counter).collect())
        .unwrap_or_default()
}

pub fn normalize_analysis(raw: &Value, fallback_name: &str) -> ChampionAnalysis {
    ChampionAnalysis {
        champion_name: text(raw, aliases::CHAMPION_NAME).unwrap_or_else(|| fallback_name.to_string()),
        tier: text(raw, aliases::TIER).unwrap_or_default(),
        win_rate: number(raw, aliases::WIN_RATE),
        pick_rate: number(raw, aliases::PICK_RATE),
        ban_rate: number(raw, aliases::BAN_RATE),
        kda: number(raw, aliases::KDA),
        weak_counters: normalize_counter_list(raw, aliases::WEAK_COUNTERS),
        strong_counters: normalize_counter_list(raw, aliases::STRONG_COUNTERS),
    }
}

pub fn normalize_position(raw: &Value) -> PositionStats {
    PositionStats {
        position: text(raw, aliases::POSITION).unwrap_or_default(),
        win_rate: number(raw, aliases::WIN_RATE),
        pick_rate: number(raw, aliases::PICK_RATE),
        games: number(raw, aliases::GAMES),
    }
}

/// Canonicalize one champion's row from a schema-free overview table.
pub fn normalize_overview_entry(entry: &Value, champion_name: &str) -> ChampionMeta {
    ChampionMeta {
        champion_name: champion_name.to_string(),
        tier: String::new(),
        position: String::new(),
        win_rate: number(entry, aliases::LOOSE_WIN_RATE),
        pick_rate: number(entry, aliases::LOOSE_PICK_RATE),
        ban_rate: number(entry, aliases::LOOSE_BAN_RATE),
        games: number(entry, aliases::LOOSE_GAMES),
        avg_kills: number(entry, aliases::AVG_KILLS),
        avg_deaths: number(entry, aliases::AVG_DEATHS),
        avg_assists: number(entry, aliases::AVG_ASSISTS),
        kda: number(entry, aliases::KDA),
    }
}

/// Aliased field, or the element at `index` when the row is positional.
fn row_field<'v>(row: &'v Value, aliases: &[&str], index: usize) -> Option<&'v Value> {
    field(row, aliases).or_else(|| row.get(index))
}

/// Canonicalize one matchup row.
///
/// Accepts object rows (`{ "enemyChampionId": 103, "winRate": 0.52, "games": 900 }`)
/// and positional rows (`[103, 0.52, 900]`). The opponent id is mapped to a
/// display name through `name_for_id`. Rows without a usable opponent id are
/// dropped.
pub fn normalize_matchup_row(
    row: &Value,
    name_for_id: impl Fn(i64) -> String,
) -> Option<ChampionCounter> {
    let opponent_id = row_field(row, aliases::OPPONENT_ID, 0).and_then(coerce_id)?;
    let win_rate = row_field(row, aliases::MATCHUP_WIN_RATE, 1)
        .and_then(coerce_number)
        .map(to_percentage)
        .unwrap_or(0.0);
    let games = row_field(row, aliases::MATCHUP_GAMES, 2)
        .and_then(coerce_number)
        .unwrap_or(0.0);

    let champion_name = name_for_id(opponent_id);
    if champion_name.is_empty() || games < 0.0 {
        return None;
    }

    Some(ChampionCounter {
        champion_name,
        win_rate,
        games,
        lane_win_rate: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_accepts_snake_case() {
        let raw = json!({
            "champion_name": "Ahri",
            "rank_tier": "emerald_plus",
            "lane": "mid",
            "win_rate": 51.5,
            "pick_rate": "8.2",
            "ban_rate": 3,
            "avg_kills": 7.1
        });

        let meta = normalize_meta(&raw, "ignored");
        assert_eq!(meta.champion_name, "Ahri");
        assert_eq!(meta.tier, "emerald_plus");
        assert_eq!(meta.position, "mid");
        assert_eq!(meta.win_rate, 51.5);
        assert_eq!(meta.pick_rate, 8.2);
        assert_eq!(meta.ban_rate, 3.0);
        assert_eq!(meta.avg_kills, 7.1);
        assert_eq!(meta.games, 0.0);
        assert_eq!(meta.kda, 0.0);
    }

    #[test]
    fn test_meta_defaults_from_empty_object() {
        let meta = normalize_meta(&json!({}), "Annie");
        assert_eq!(
            meta,
            ChampionMeta {
                champion_name: "Annie".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_normalize_meta_is_idempotent() {
        let meta = normalize_meta(
            &json!({ "championName": "Lux", "tier": "gold", "winRate": 49.9, "games": 12000, "kda": 2.7 }),
            "Lux",
        );
        let again = normalize_meta(&serde_json::to_value(&meta).unwrap(), "other");
        assert_eq!(meta, again);
    }

    #[test]
    fn test_analysis_counters_mixed_case() {
        let raw = json!({
            "championName": "Ahri",
            "win_rate": 52.0,
            "weak_counters": [
                { "champion_name": "Fizz", "win_rate": 46.1, "games": 800, "lane_win_rate": 44.0 }
            ],
            "strongCounters": [
                { "championName": "Lux", "winRate": 55.3, "games": 1500 }
            ]
        });

        let analysis = normalize_analysis(&raw, "Ahri");
        assert_eq!(analysis.win_rate, 52.0);
        assert_eq!(analysis.weak_counters.len(), 1);
        assert_eq!(analysis.weak_counters[0].champion_name, "Fizz");
        assert_eq!(analysis.weak_counters[0].lane_win_rate, Some(44.0));
        assert_eq!(analysis.strong_counters[0].win_rate, 55.3);
        assert_eq!(analysis.strong_counters[0].lane_win_rate, None);
    }

    #[test]
    fn test_analysis_missing_counters_are_empty() {
        let analysis = normalize_analysis(&json!({ "weakCounters": "n/a" }), "Ahri");
        assert!(analysis.weak_counters.is_empty());
        assert!(analysis.strong_counters.is_empty());
        assert_eq!(analysis.champion_name, "Ahri");
    }

    #[test]
    fn test_percentage_correction() {
        assert_eq!(to_percentage(0.56), 56.0);
        assert_eq!(to_percentage(0.523), 52.3);
        assert_eq!(to_percentage(0.0), 0.0);
        assert_eq!(to_percentage(56.0), 56.0);
        assert_eq!(to_percentage(1.0), 100.0);
    }

    #[test]
    fn test_overview_entry_loose_aliases() {
        let entry = json!({ "wr": 50.4, "pr": 6.0, "br": "1.5", "n": 30000 });
        let meta = normalize_overview_entry(&entry, "Ahri");
        assert_eq!(meta.champion_name, "Ahri");
        assert_eq!(meta.win_rate, 50.4);
        assert_eq!(meta.pick_rate, 6.0);
        assert_eq!(meta.ban_rate, 1.5);
        assert_eq!(meta.games, 30000.0);
    }

    #[test]
    fn test_matchup_row_object_and_positional() {
        let name = |id: i64| if id == 103 { "Ahri".to_string() } else { id.to_string() };

        let object_row = json!({ "enemyChampionId": 103, "winRate": 0.52, "games": 900 });
        let counter = normalize_matchup_row(&object_row, name).unwrap();
        assert_eq!(counter.champion_name, "Ahri");
        assert_eq!(counter.win_rate, 52.0);
        assert_eq!(counter.games, 900.0);

        let positional_row = json!([7, 48.5, 120]);
        let counter = normalize_matchup_row(&positional_row, name).unwrap();
        assert_eq!(counter.champion_name, "7");
        assert_eq!(counter.win_rate, 48.5);
        assert_eq!(counter.games, 120.0);
    }

    #[test]
    fn test_coerce_id_rejects_fractions() {
        assert_eq!(coerce_id(&json!(103)), Some(103));
        assert_eq!(coerce_id(&json!(103.0)), Some(103));
        assert_eq!(coerce_id(&json!("103")), Some(103));
        assert_eq!(coerce_id(&json!(103.7)), None);
        assert_eq!(coerce_id(&json!("103.7")), None);
        assert_eq!(coerce_id(&json!(null)), None);
    }

    #[test]
    fn test_matchup_row_with_fractional_id_is_dropped() {
        let name = |id: i64| if id == 103 { "Ahri".to_string() } else { id.to_string() };
        assert!(normalize_matchup_row(&json!([103.7, 0.52, 900]), name).is_none());
        assert!(normalize_matchup_row(&json!({ "cid": 103.7, "wr": 50 }), name).is_none());
    }

    #[test]
    fn test_matchup_row_without_id_is_dropped() {
        assert!(normalize_matchup_row(&json!({ "winRate": 50 }), |id| id.to_string()).is_none());
        assert!(normalize_matchup_row(&json!("junk"), |id| id.to_string()).is_none());
    }

    #[test]
    fn test_matchup_row_negative_games_is_dropped() {
        let row = json!({ "id": 1, "winRate": 50, "games": -3 });
        assert!(normalize_matchup_row(&row, |id| id.to_string()).is_none());
    }
}
