//! Wiring of every component over one shared cache backend.

use crate::cache::{clear_prefix, CacheStore, FileStore, KeyValueStore, MemoryStore};
use crate::config::GameDataConfig;
use crate::error::Result;
use crate::opgg::OpggClient;
use crate::remote::{HttpInvoker, RemoteInvoker};
use crate::static_data::{AssetUrls, DataDragonHttp, StaticDataClient, StaticDataSource};
use crate::types::{Champion, ChampionDetails, Item, RuneTree, SummonerSpell};
use crate::ugg::UggClient;
use crate::version::VersionResolver;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Key prefix of static data and version entries.
pub const STATIC_DATA_NAMESPACE: &str = "ddragon_";
/// Key prefix of OP.GG analytics entries.
pub const OPGG_NAMESPACE: &str = "opgg_";
/// Key prefix of U.GG analytics entries.
pub const UGG_NAMESPACE: &str = "ugg_";

/// Entry point bundling the version resolver, static catalog and both
/// analytics providers.
///
/// All components share one [`KeyValueStore`], each through its own
/// namespace, so [`clear_cache`](Self::clear_cache) can drop one provider's
/// entries without touching the others.
pub struct GameData {
    config: GameDataConfig,
    backend: Arc<dyn KeyValueStore>,
    static_data: Arc<StaticDataClient>,
    opgg: OpggClient,
    ugg: UggClient,
    assets: AssetUrls,
}

impl GameData {
    /// Build the HTTP transports and cache backend described by `config`.
    pub fn from_config(config: GameDataConfig) -> Result<Self> {
        let backend: Arc<dyn KeyValueStore> = match &config.cache_dir {
            Some(dir) => Arc::new(FileStore::open(dir.clone())?),
            None => Arc::new(MemoryStore::new()),
        };
        let source = Arc::new(DataDragonHttp::new(config.static_data_base_url.clone())?);
        let invoker = Arc::new(HttpInvoker::new(
            config.functions_base_url.clone(),
            config.functions_api_key.clone(),
        )?);
        Ok(Self::with_parts(config, backend, source, invoker))
    }

    /// Assemble from explicit transports and backend.
    pub fn with_parts(
        config: GameDataConfig,
        backend: Arc<dyn KeyValueStore>,
        source: Arc<dyn StaticDataSource>,
        invoker: Arc<dyn RemoteInvoker>,
    ) -> Self {
        let static_cache = CacheStore::new(
            backend.clone(),
            STATIC_DATA_NAMESPACE,
            config.static_data_ttl(),
        );
        let opgg_cache = CacheStore::new(backend.clone(), OPGG_NAMESPACE, config.analytics_ttl());
        let ugg_cache = CacheStore::new(backend.clone(), UGG_NAMESPACE, config.analytics_ttl());

        let versions = Arc::new(VersionResolver::new(
            source.clone(),
            static_cache.clone(),
            config.fallback_version.clone(),
        ));
        let static_data = Arc::new(StaticDataClient::new(source, versions, static_cache));
        let opgg = OpggClient::new(invoker.clone(), opgg_cache);
        let ugg = UggClient::new(invoker, static_data.clone(), ugg_cache, config.locale.clone());
        let assets = AssetUrls::new(config.static_data_base_url.clone());

        Self {
            config,
            backend,
            static_data,
            opgg,
            ugg,
            assets,
        }
    }

    pub fn config(&self) -> &GameDataConfig {
        &self.config
    }

    pub fn versions(&self) -> &VersionResolver {
        self.static_data.versions()
    }

    pub fn static_data(&self) -> &StaticDataClient {
        &self.static_data
    }

    pub fn opgg(&self) -> &OpggClient {
        &self.opgg
    }

    pub fn ugg(&self) -> &UggClient {
        &self.ugg
    }

    pub fn assets(&self) -> &AssetUrls {
        &self.assets
    }

    pub async fn latest_version(&self) -> String {
        self.versions().latest_version().await
    }

    pub async fn champions(&self) -> Vec<Champion> {
        self.static_data.champions(&self.config.locale).await
    }

    pub async fn champion_details(&self, champion_id: &str) -> Option<ChampionDetails> {
        self.static_data
            .champion_details(champion_id, &self.config.locale)
            .await
    }

    pub async fn items(&self) -> BTreeMap<String, Item> {
        self.static_data.items(&self.config.locale).await
    }

    pub async fn runes(&self) -> Vec<RuneTree> {
        self.static_data.runes(&self.config.locale).await
    }

    pub async fn summoner_spells(&self) -> BTreeMap<String, SummonerSpell> {
        self.static_data.summoner_spells(&self.config.locale).await
    }

    pub async fn champion_icon_url(&self, champion_id: &str) -> String {
        let version = self.latest_version().await;
        self.assets.champion_icon(&version, champion_id)
    }

    pub async fn item_icon_url(&self, item_id: &str) -> String {
        let version = self.latest_version().await;
        self.assets.item_icon(&version, item_id)
    }

    pub async fn summoner_spell_icon_url(&self, spell_id: &str) -> String {
        let version = self.latest_version().await;
        self.assets.summoner_spell_icon(&version, spell_id)
    }

    pub async fn passive_icon_url(&self, image_file: &str) -> String {
        let version = self.latest_version().await;
        self.assets.passive_icon(&version, image_file)
    }

    /// Remove every cache entry whose key starts with `prefix`, e.g.
    /// [`OPGG_NAMESPACE`]. Returns how many entries were removed.
    pub fn clear_cache(&self, prefix: &str) -> usize {
        clear_prefix(self.backend.as_ref(), prefix)
    }

    /// Remove the entries of all three namespaces.
    pub fn clear_all(&self) -> usize {
        [STATIC_DATA_NAMESPACE, OPGG_NAMESPACE, UGG_NAMESPACE]
            .iter()
            .map(|prefix| self.clear_cache(prefix))
            .sum()
    }
}
