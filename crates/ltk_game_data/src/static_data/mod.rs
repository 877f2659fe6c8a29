//! Versioned static catalog: champions, items, runes and summoner spells.
//!
//! Every resource follows the same fetch pattern. The current version is
//! resolved first, the cache is consulted under `{resource}_{locale}` tagged
//! with that version, and on a miss the resource document is fetched, its
//! top-level `data` map unwrapped, and the decoded collection cached.

mod source;
mod urls;

pub use source::{DataDragonHttp, StaticDataSource};
pub use urls::AssetUrls;

use crate::cache::CacheStore;
use crate::error::{Error, Result};
use crate::types::{Champion, ChampionDetails, FlatRune, Item, RuneTree, SummonerSpell};
use crate::version::VersionResolver;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Client for the per-version static catalog.
pub struct StaticDataClient {
    source: Arc<dyn StaticDataSource>,
    versions: Arc<VersionResolver>,
    cache: CacheStore,
}

impl StaticDataClient {
    pub fn new(
        source: Arc<dyn StaticDataSource>,
        versions: Arc<VersionResolver>,
        cache: CacheStore,
    ) -> Self {
        Self {
            source,
            versions,
            cache,
        }
    }

    pub fn versions(&self) -> &Arc<VersionResolver> {
        &self.versions
    }

    async fn try_fetch<T, F>(&self, resource: &str, cache_key: &str, locale: &str, decode: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Value) -> Result<T>,
    {
        let version = self.versions.latest_version().await;
        if let Some(cached) = self.cache.get::<T>(cache_key, Some(&version)) {
            return Ok(cached);
        }

        let document = self.source.fetch_resource(&version, locale, resource).await?;
        let decoded = decode(unwrap_data(document))?;
        self.cache.set(cache_key, &decoded, &version);
        Ok(decoded)
    }

    /// All champions, ordered by internal id.
    pub async fn champions(&self, locale: &str) -> Vec<Champion> {
        self.try_champions(locale).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch champion list: {}", e);
            Vec::new()
        })
    }

    pub async fn try_champions(&self, locale: &str) -> Result<Vec<Champion>> {
        self.try_fetch("champion", &format!("champions_{}", locale), locale, |data| {
            let by_id: BTreeMap<String, Champion> = serde_json::from_value(data)?;
            Ok(by_id.into_values().collect())
        })
        .await
    }

    /// Full details for one champion, by internal id (e.g. `MonkeyKing`).
    pub async fn champion_details(&self, champion_id: &str, locale: &str) -> Option<ChampionDetails> {
        match self.try_champion_details(champion_id, locale).await {
            Ok(details) => Some(details),
            Err(e) => {
                tracing::warn!("Failed to fetch champion details for {}: {}", champion_id, e);
                None
            }
        }
    }

    pub async fn try_champion_details(&self, champion_id: &str, locale: &str) -> Result<ChampionDetails> {
        self.try_fetch(
            &format!("champion/{}", champion_id),
            &format!("champion_{}_{}", champion_id, locale),
            locale,
            |mut data| {
                let entry = data
                    .get_mut(champion_id)
                    .map(Value::take)
                    .ok_or_else(|| Error::not_found(format!("champion '{}'", champion_id)))?;
                Ok(serde_json::from_value(entry)?)
            },
        )
        .await
    }

    /// The item catalog keyed by item id.
    pub async fn items(&self, locale: &str) -> BTreeMap<String, Item> {
        self.try_items(locale).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch item catalog: {}", e);
            BTreeMap::new()
        })
    }

    pub async fn try_items(&self, locale: &str) -> Result<BTreeMap<String, Item>> {
        self.try_fetch("item", &format!("items_{}", locale), locale, |data| {
            Ok(serde_json::from_value(data)?)
        })
        .await
    }

    /// Items a player can buy in the shop.
    pub async fn purchasable_items(&self, locale: &str) -> Vec<(String, Item)> {
        purchasable(self.items(locale).await)
    }

    /// Rune trees. The rune document is a bare array without a `data` map.
    pub async fn runes(&self, locale: &str) -> Vec<RuneTree> {
        self.try_runes(locale).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch rune catalog: {}", e);
            Vec::new()
        })
    }

    pub async fn try_runes(&self, locale: &str) -> Result<Vec<RuneTree>> {
        self.try_fetch("runesReforged", &format!("runes_{}", locale), locale, |data| {
            Ok(serde_json::from_value(data)?)
        })
        .await
    }

    pub async fn summoner_spells(&self, locale: &str) -> BTreeMap<String, SummonerSpell> {
        self.try_summoner_spells(locale).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch summoner spells: {}", e);
            BTreeMap::new()
        })
    }

    pub async fn try_summoner_spells(&self, locale: &str) -> Result<BTreeMap<String, SummonerSpell>> {
        self.try_fetch("summoner", &format!("spells_{}", locale), locale, |data| {
            Ok(serde_json::from_value(data)?)
        })
        .await
    }
}

/// The `data` member of a catalog document, or the document itself when it
/// has none.
fn unwrap_data(document: Value) -> Value {
    match document {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or_default(),
        other => other,
    }
}

fn purchasable(items: BTreeMap<String, Item>) -> Vec<(String, Item)> {
    items
        .into_iter()
        .filter(|(_, item)| item.gold.total > 0.0 && item.required_ally.is_none())
        .collect()
}

/// Every rune across all trees and slots, tagged with its tree's key.
pub fn flatten_runes(trees: &[RuneTree]) -> Vec<FlatRune> {
    trees
        .iter()
        .flat_map(|tree| {
            tree.slots.iter().flat_map(|slot| &slot.runes).map(|rune| FlatRune {
                id: rune.id,
                key: rune.key.clone(),
                name: rune.name.clone(),
                icon: rune.icon.clone(),
                tree: tree.key.clone(),
            })
        })
        .collect()
}

/// Numeric id of the champion whose display name or internal id matches
/// `name_or_id`, ignoring case.
pub fn resolve_champion_id(champions: &[Champion], name_or_id: &str) -> Option<i64> {
    let wanted = name_or_id.trim().to_lowercase();
    champions
        .iter()
        .find(|c| c.name.to_lowercase() == wanted || c.id.to_lowercase() == wanted)
        .and_then(Champion::numeric_id)
}

/// Display name for a numeric champion id, or the id itself as text.
pub fn champion_name_for_id(champions: &[Champion], id: i64) -> String {
    champions
        .iter()
        .find(|c| c.numeric_id() == Some(id))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::error::ErrorKind;
    use crate::test_support::{FakeStaticSource, ManualClock};
    use serde_json::json;
    use std::time::Duration;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn catalog() -> FakeStaticSource {
        FakeStaticSource::with_versions(&["14.24.1"])
            .resource(
                "champion",
                json!({
                    "type": "champion",
                    "version": "14.24.1",
                    "data": {
                        "Ahri": { "id": "Ahri", "key": "103", "name": "Ahri" },
                        "MonkeyKing": { "id": "MonkeyKing", "key": "62", "name": "Wukong" },
                        "Aatrox": { "id": "Aatrox", "key": "266", "name": "Aatrox" }
                    }
                }),
            )
            .resource(
                "champion/Ahri",
                json!({
                    "data": {
                        "Ahri": {
                            "id": "Ahri",
                            "key": "103",
                            "name": "Ahri",
                            "lore": "Innately connected to the magic of the spirit realm...",
                            "spells": [{ "id": "AhriQ", "name": "Orb of Deception", "cooldown": [7, 7, 7, 7, 7] }],
                            "passive": { "name": "Essence Theft", "image": { "full": "Ahri_SoulEater2.png" } },
                            "skins": [{ "id": "103000", "num": 0, "name": "default", "chromas": false }]
                        }
                    }
                }),
            )
            .resource(
                "item",
                json!({
                    "data": {
                        "1001": { "name": "Boots", "gold": { "base": 300, "total": 300, "purchasable": true } },
                        "2052": { "name": "Poro-Snax", "gold": { "base": 0, "total": 0, "purchasable": false } },
                        "7050": { "name": "Gangplank Placeholder", "gold": { "total": 0 } },
                        "126697": {
                            "name": "Upgraded Aeropack",
                            "gold": { "total": 3000 },
                            "requiredAlly": "Ornn"
                        }
                    }
                }),
            )
            .resource(
                "runesReforged",
                json!([
                    {
                        "id": 8100, "key": "Domination", "name": "Domination", "icon": "perk-images/Styles/7200_Domination.png",
                        "slots": [
                            { "runes": [{ "id": 8112, "key": "Electrocute", "name": "Electrocute", "icon": "e.png" }] },
                            { "runes": [{ "id": 8126, "key": "CheapShot", "name": "Cheap Shot", "icon": "c.png" }] }
                        ]
                    },
                    {
                        "id": 8000, "key": "Precision", "name": "Precision", "icon": "p.png",
                        "slots": [{ "runes": [{ "id": 8005, "key": "PressTheAttack", "name": "Press the Attack", "icon": "pta.png" }] }]
                    }
                ]),
            )
            .resource(
                "summoner",
                json!({ "data": { "SummonerFlash": { "id": "SummonerFlash", "name": "Flash", "cooldown": [300] } } }),
            )
    }

    fn client(source: Arc<FakeStaticSource>) -> (StaticDataClient, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let cache = CacheStore::new(Arc::new(MemoryStore::new()), "ddragon_", DAY).with_clock(clock.clone());
        let versions = Arc::new(VersionResolver::new(source.clone(), cache.clone(), "14.24.1"));
        (StaticDataClient::new(source, versions, cache), clock)
    }

    #[tokio::test]
    async fn test_champions_unwraps_data_and_caches() {
        let source = Arc::new(catalog());
        let (client, _) = client(source.clone());

        let champions = client.champions("en_US").await;
        let ids: Vec<_> = champions.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["Aatrox", "Ahri", "MonkeyKing"]);

        client.champions("en_US").await;
        assert_eq!(source.resource_calls(), vec!["14.24.1/en_US/champion".to_string()]);
    }

    #[tokio::test]
    async fn test_locales_are_cached_separately() {
        let source = Arc::new(catalog());
        let (client, _) = client(source.clone());

        client.champions("en_US").await;
        client.champions("pt_BR").await;
        assert_eq!(source.resource_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_champion_details() {
        let source = Arc::new(catalog());
        let (client, _) = client(source);

        let ahri = client.champion_details("Ahri", "en_US").await.unwrap();
        assert_eq!(ahri.champion.name, "Ahri");
        assert_eq!(ahri.spells[0].cooldown.len(), 5);
        assert_eq!(ahri.passive.image.full, "Ahri_SoulEater2.png");

        let err = client.try_champion_details("Zed", "en_US").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(client.champion_details("Zed", "en_US").await.is_none());
    }

    #[tokio::test]
    async fn test_items_and_purchasable_filter() {
        let source = Arc::new(catalog());
        let (client, _) = client(source);

        assert_eq!(client.items("en_US").await.len(), 4);
        let buyable: Vec<_> = client
            .purchasable_items("en_US")
            .await
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(buyable, vec!["1001".to_string()]);
    }

    #[tokio::test]
    async fn test_runes_are_a_bare_array() {
        let source = Arc::new(catalog());
        let (client, _) = client(source);

        let trees = client.runes("en_US").await;
        assert_eq!(trees.len(), 2);

        let flat = flatten_runes(&trees);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[1].key, "CheapShot");
        assert_eq!(flat[1].tree, "Domination");
        assert_eq!(flat[2].tree, "Precision");
    }

    #[tokio::test]
    async fn test_summoner_spells() {
        let source = Arc::new(catalog());
        let (client, _) = client(source);
        let spells = client.summoner_spells("en_US").await;
        assert_eq!(spells["SummonerFlash"].name, "Flash");
    }

    #[tokio::test]
    async fn test_failure_yields_empty_collections() {
        let source = Arc::new(FakeStaticSource::offline());
        let (client, _) = client(source.clone());

        assert!(client.champions("en_US").await.is_empty());
        assert!(client.items("en_US").await.is_empty());
        assert!(client.runes("en_US").await.is_empty());
        // The fallback version is used for the resource request.
        assert_eq!(source.resource_calls()[0], "14.24.1/en_US/champion");
    }

    #[tokio::test]
    async fn test_expired_catalog_is_refetched() {
        let source = Arc::new(catalog());
        let (client, clock) = client(source.clone());

        client.items("en_US").await;
        clock.advance(DAY + Duration::from_secs(1));
        client.items("en_US").await;
        assert_eq!(source.resource_calls().len(), 2);
    }

    #[test]
    fn test_resolve_champion_id() {
        let champions = vec![
            Champion {
                id: "MonkeyKing".to_string(),
                key: "62".to_string(),
                name: "Wukong".to_string(),
                ..Default::default()
            },
            Champion {
                id: "Ahri".to_string(),
                key: "103".to_string(),
                name: "Ahri".to_string(),
                ..Default::default()
            },
        ];

        assert_eq!(resolve_champion_id(&champions, "wukong"), Some(62));
        assert_eq!(resolve_champion_id(&champions, "MONKEYKING"), Some(62));
        assert_eq!(resolve_champion_id(&champions, "Aatrox"), None);

        assert_eq!(champion_name_for_id(&champions, 103), "Ahri");
        assert_eq!(champion_name_for_id(&champions, 266), "266");
    }
}
