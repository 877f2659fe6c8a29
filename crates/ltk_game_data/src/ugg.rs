//! Champion analytics from the schema-free U.GG functions.
//!
//! U.GG payloads are forwarded verbatim and have no documented layout, so
//! champion rows and matchup tables are located with ordered shape searches
//! (see [`shape`](crate::shape)). Payloads are keyed by patch (`14_24`) and by
//! numeric champion id, which is resolved through the static catalog before
//! any remote call is made.

use crate::cache::CacheStore;
use crate::error::{Error, Result};
use crate::normalize::{coerce_id, normalize_matchup_row, normalize_overview_entry};
use crate::remote::{unwrap_result, RemoteInvoker};
use crate::shape::{field, first_match, ShapeCandidate};
use crate::static_data::{champion_name_for_id, resolve_champion_id, StaticDataClient};
use crate::types::{Champion, ChampionCounter, ChampionMeta, Matchups};
use serde_json::{json, Value};
use std::sync::Arc;

pub const OVERVIEW_FUNCTION: &str = "ugg-champion-overview";
pub const MATCHUPS_FUNCTION: &str = "ugg-champion-matchups";

/// Length of the best and worst matchup lists.
pub const MATCHUP_LIST_LEN: usize = 20;

/// An unnamed top-level array is taken as the matchup table only when it has
/// more entries than this. The threshold is a guess with no upstream backing;
/// a schema change can make the search pick an unrelated array.
pub const MATCHUP_TABLE_MIN_LEN: usize = 10;

const ENTRY_ID: &[&str] = &["championId", "cid"];

fn entry_matches(entry: &Value, id: i64) -> bool {
    let matches = |v: Option<&Value>| v.and_then(coerce_id) == Some(id);
    matches(field(entry, ENTRY_ID)) || matches(entry.get("id"))
}

fn find_entry(rows: &[Value], id: i64) -> Option<&Value> {
    rows.iter().find(|entry| entry_matches(entry, id))
}

fn overview_root_array<'v>(root: &'v Value, id: &i64) -> Option<&'v Value> {
    find_entry(root.as_array()?, *id)
}

fn overview_data_array<'v>(root: &'v Value, id: &i64) -> Option<&'v Value> {
    find_entry(root.get("data")?.as_array()?, *id)
}

fn overview_keyed_by_id<'v>(root: &'v Value, id: &i64) -> Option<&'v Value> {
    root.as_object()?.get(&id.to_string())
}

/// Where a champion's overview row may live, in precedence order.
pub const OVERVIEW_SHAPES: &[ShapeCandidate<i64>] = &[
    ShapeCandidate::new("root_array", overview_root_array),
    ShapeCandidate::new("data_array", overview_data_array),
    ShapeCandidate::new("keyed_by_id", overview_keyed_by_id),
];

fn table_root_array<'v>(root: &'v Value, _: &()) -> Option<&'v Value> {
    root.is_array().then_some(root)
}

fn table_matchups_field<'v>(root: &'v Value, _: &()) -> Option<&'v Value> {
    root.get("matchups").filter(|v| v.is_array())
}

fn table_first_long_array<'v>(root: &'v Value, _: &()) -> Option<&'v Value> {
    root.as_object()?
        .values()
        .find(|v| v.as_array().is_some_and(|rows| rows.len() > MATCHUP_TABLE_MIN_LEN))
}

/// Where the matchup table may live, in precedence order.
pub const MATCHUP_TABLE_SHAPES: &[ShapeCandidate<()>] = &[
    ShapeCandidate::new("root_array", table_root_array),
    ShapeCandidate::new("matchups_field", table_matchups_field),
    ShapeCandidate::new("first_long_array", table_first_long_array),
];

/// Client for the U.GG analytics functions.
pub struct UggClient {
    invoker: Arc<dyn RemoteInvoker>,
    static_data: Arc<StaticDataClient>,
    cache: CacheStore,
    locale: String,
}

impl UggClient {
    /// `locale` selects the champion catalog used to resolve names and ids.
    pub fn new(
        invoker: Arc<dyn RemoteInvoker>,
        static_data: Arc<StaticDataClient>,
        cache: CacheStore,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            invoker,
            static_data,
            cache,
            locale: locale.into(),
        }
    }

    async fn try_resolve(&self, champion_name: &str) -> Result<(Vec<Champion>, i64)> {
        let champions = self.static_data.try_champions(&self.locale).await?;
        let id = resolve_champion_id(&champions, champion_name).ok_or_else(|| {
            Error::not_found(format!("no champion id for '{}'", champion_name))
        })?;
        Ok((champions, id))
    }

    /// Raw payload from the cache, or from `function` on a miss.
    async fn try_payload(&self, key: &str, function: &str, body: Value) -> Result<Value> {
        if let Some(cached) = self.cache.get(key, None) {
            return Ok(cached);
        }

        tracing::debug!("Invoking {} with {}", function, body);
        let payload = unwrap_result(self.invoker.invoke(function, body).await?);
        if payload.is_null() {
            return Err(Error::parse(format!("{} returned no payload", function)));
        }
        self.cache.set(key, &payload, "");
        Ok(payload)
    }

    /// Aggregate stats for one champion on the current patch.
    pub async fn champion_stats(&self, champion_name: &str) -> Option<ChampionMeta> {
        match self.try_champion_stats(champion_name).await {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::warn!("U.GG overview for {} unavailable: {}", champion_name, e);
                None
            }
        }
    }

    pub async fn try_champion_stats(&self, champion_name: &str) -> Result<ChampionMeta> {
        let (_, id) = self.try_resolve(champion_name).await?;
        let patch = self.static_data.versions().latest_patch().await;

        let overview = self
            .try_payload(
                &format!("overview_{}", patch),
                OVERVIEW_FUNCTION,
                json!({ "patch": patch }),
            )
            .await?;

        let (shape, entry) = first_match(OVERVIEW_SHAPES, &overview, &id).ok_or_else(|| {
            Error::not_found(format!("champion {} in overview for patch {}", id, patch))
        })?;
        tracing::debug!("Overview entry for {} found as {}", champion_name, shape);
        Ok(normalize_overview_entry(entry, champion_name))
    }

    /// Best and worst matchups for one champion on the current patch.
    pub async fn matchups(&self, champion_name: &str) -> Matchups {
        self.try_matchups(champion_name).await.unwrap_or_else(|e| {
            tracing::warn!("U.GG matchups for {} unavailable: {}", champion_name, e);
            Matchups::default()
        })
    }

    pub async fn try_matchups(&self, champion_name: &str) -> Result<Matchups> {
        let (champions, id) = self.try_resolve(champion_name).await?;
        let patch = self.static_data.versions().latest_patch().await;

        let payload = self
            .try_payload(
                &format!("matchups_{}_{}", patch, id),
                MATCHUPS_FUNCTION,
                json!({ "patch": patch, "championId": id }),
            )
            .await?;

        let (shape, table) = first_match(MATCHUP_TABLE_SHAPES, &payload, &())
            .ok_or_else(|| Error::parse("no matchup table in payload"))?;
        tracing::debug!("Matchup table for {} found as {}", champion_name, shape);

        let rows: Vec<ChampionCounter> = table
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|row| normalize_matchup_row(row, |id| champion_name_for_id(&champions, id)))
            .collect();
        Ok(rank_matchups(rows))
    }
}

/// Sort by win rate and split into the top and bottom
/// [`MATCHUP_LIST_LEN`] rows. `worst` starts with the lowest win rate.
pub fn rank_matchups(mut rows: Vec<ChampionCounter>) -> Matchups {
    rows.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));

    let best = rows.iter().take(MATCHUP_LIST_LEN).cloned().collect();
    let worst = rows.iter().rev().take(MATCHUP_LIST_LEN).cloned().collect();
    Matchups { best, worst }
}
