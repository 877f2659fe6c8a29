//! Catalog entities and canonical analytics shapes.
//!
//! Catalog types mirror the static data provider's JSON (camelCase, lenient
//! defaults). Analytics types are the canonical output of
//! [`normalize`](crate::normalize): every numeric field is always present.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    pub full: String,
    pub sprite: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChampionInfo {
    pub attack: f64,
    pub defense: f64,
    pub magic: f64,
    pub difficulty: f64,
}

/// A champion as listed in the per-version champion catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Champion {
    /// Internal id, e.g. `MonkeyKing`.
    pub id: String,
    /// Numeric id as a string, e.g. `"62"`.
    pub key: String,
    /// Display name, e.g. `Wukong`.
    pub name: String,
    pub title: String,
    pub blurb: String,
    pub info: ChampionInfo,
    pub image: ImageRef,
    pub tags: Vec<String>,
    pub partype: String,
    pub stats: HashMap<String, f64>,
}

impl Champion {
    /// The numeric champion id, if the key is numeric.
    pub fn numeric_id(&self) -> Option<i64> {
        self.key.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChampionSpell {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tooltip: String,
    pub image: ImageRef,
    pub cooldown: Vec<f64>,
    pub cost: Vec<f64>,
    pub range: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChampionPassive {
    pub name: String,
    pub description: String,
    pub image: ImageRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChampionSkin {
    pub id: String,
    pub num: u32,
    pub name: String,
    pub chromas: bool,
}

/// Full per-champion document (`champion/{id}.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChampionDetails {
    #[serde(flatten)]
    pub champion: Champion,
    pub lore: String,
    pub allytips: Vec<String>,
    pub enemytips: Vec<String>,
    pub spells: Vec<ChampionSpell>,
    pub passive: ChampionPassive,
    pub skins: Vec<ChampionSkin>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemGold {
    pub base: f64,
    pub total: f64,
    pub sell: f64,
    pub purchasable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub description: String,
    pub plaintext: String,
    pub gold: ItemGold,
    pub tags: Vec<String>,
    pub stats: HashMap<String, f64>,
    pub image: ImageRef,
    /// Set on items only an ally champion can buy (e.g. Ornn upgrades).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_ally: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rune {
    pub id: i64,
    pub key: String,
    pub icon: String,
    pub name: String,
    pub short_desc: String,
    pub long_desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuneSlot {
    pub runes: Vec<Rune>,
}

/// A rune path such as Precision or Domination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuneTree {
    pub id: i64,
    pub key: String,
    pub icon: String,
    pub name: String,
    pub slots: Vec<RuneSlot>,
}

/// A single rune together with the key of the tree it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRune {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub icon: String,
    pub tree: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummonerSpell {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: ImageRef,
    pub cooldown: Vec<f64>,
    pub modes: Vec<String>,
}

/// Aggregate performance of one champion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionMeta {
    pub champion_name: String,
    pub tier: String,
    pub position: String,
    pub win_rate: f64,
    pub pick_rate: f64,
    pub ban_rate: f64,
    pub games: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub kda: f64,
}

/// One row of a matchup list, from the perspective of the queried champion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionCounter {
    pub champion_name: String,
    pub win_rate: f64,
    pub games: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_win_rate: Option<f64>,
}

/// Champion analysis including its counter lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionAnalysis {
    pub champion_name: String,
    pub tier: String,
    pub win_rate: f64,
    pub pick_rate: f64,
    pub ban_rate: f64,
    pub kda: f64,
    /// Champions that beat the analysed champion.
    pub weak_counters: Vec<ChampionCounter>,
    /// Champions the analysed champion beats.
    pub strong_counters: Vec<ChampionCounter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionStats {
    pub position: String,
    pub win_rate: f64,
    pub pick_rate: f64,
    pub games: f64,
}

/// Best and worst matchups, best sorted by win rate descending and worst ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Matchups {
    pub best: Vec<ChampionCounter>,
    pub worst: Vec<ChampionCounter>,
}

impl Matchups {
    pub fn is_empty(&self) -> bool {
        self.best.is_empty() && self.worst.is_empty()
    }
}
