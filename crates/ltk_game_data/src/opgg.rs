//! Champion analytics from the envelope-wrapped OP.GG functions.
//!
//! Each function answers with an envelope around the real payload:
//!
//! ```json
//! { "result": { "content": [{ "type": "text", "text": "```json\n{ ... }\n```" }] } }
//! ```
//!
//! The text may hold a fenced JSON block or bare JSON. Some deployments skip
//! the envelope and return the payload object directly, with or without the
//! `result` wrapper. Payload fields arrive in camelCase or snake_case and are
//! canonicalized by [`normalize`](crate::normalize).

use crate::cache::CacheStore;
use crate::error::{Error, Result};
use crate::normalize::{normalize_analysis, normalize_meta, normalize_position};
use crate::remote::{unwrap_result, RemoteInvoker};
use crate::types::{ChampionAnalysis, ChampionCounter, ChampionMeta, PositionStats};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::{Arc, LazyLock};

pub const ANALYSIS_FUNCTION: &str = "opgg-champion-analysis";
pub const META_FUNCTION: &str = "opgg-champion-meta";
pub const POSITIONS_FUNCTION: &str = "opgg-champion-positions";

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("fence pattern is valid")
});

/// Client for the OP.GG analytics functions.
///
/// Results are cached for the analytics TTL, unversioned. Every public lookup
/// is fail-soft; the `try_*` forms report why a lookup produced nothing.
pub struct OpggClient {
    invoker: Arc<dyn RemoteInvoker>,
    cache: CacheStore,
}

impl OpggClient {
    pub fn new(invoker: Arc<dyn RemoteInvoker>, cache: CacheStore) -> Self {
        Self { invoker, cache }
    }

    async fn try_invoke(
        &self,
        function: &str,
        champion_name: &str,
        tier: &str,
        position: Option<&str>,
    ) -> Result<Value> {
        let mut body = json!({ "championName": champion_name, "tier": tier });
        if let Some(position) = position {
            body["position"] = json!(position);
        }

        tracing::debug!("Fetching {} for {} via {}", tier, champion_name, function);
        let response = self.invoker.invoke(function, body).await?;
        parse_envelope(response)
    }

    pub async fn champion_analysis(
        &self,
        champion_name: &str,
        tier: &str,
        position: Option<&str>,
    ) -> Option<ChampionAnalysis> {
        match self.try_champion_analysis(champion_name, tier, position).await {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                tracing::warn!("OP.GG analysis for {} unavailable: {}", champion_name, e);
                None
            }
        }
    }

    pub async fn try_champion_analysis(
        &self,
        champion_name: &str,
        tier: &str,
        position: Option<&str>,
    ) -> Result<ChampionAnalysis> {
        let key = format!(
            "analysis_{}_{}_{}",
            champion_name,
            tier,
            position.unwrap_or("all")
        );
        if let Some(cached) = self.cache.get(&key, None) {
            return Ok(cached);
        }

        let payload = self
            .try_invoke(ANALYSIS_FUNCTION, champion_name, tier, position)
            .await?;
        let analysis = normalize_analysis(require_object(&payload)?, champion_name);
        self.cache.set(&key, &analysis, "");
        Ok(analysis)
    }

    pub async fn champion_meta(
        &self,
        champion_name: &str,
        tier: &str,
        position: Option<&str>,
    ) -> Option<ChampionMeta> {
        match self.try_champion_meta(champion_name, tier, position).await {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::warn!("OP.GG meta for {} unavailable: {}", champion_name, e);
                None
            }
        }
    }

    pub async fn try_champion_meta(
        &self,
        champion_name: &str,
        tier: &str,
        position: Option<&str>,
    ) -> Result<ChampionMeta> {
        let key = format!(
            "meta_{}_{}_{}",
            champion_name,
            tier,
            position.unwrap_or("all")
        );
        if let Some(cached) = self.cache.get(&key, None) {
            return Ok(cached);
        }

        let payload = self
            .try_invoke(META_FUNCTION, champion_name, tier, position)
            .await?;
        let meta = normalize_meta(require_object(&payload)?, champion_name);
        self.cache.set(&key, &meta, "");
        Ok(meta)
    }

    /// Same as [`champion_meta`](Self::champion_meta).
    pub async fn champion_stats(
        &self,
        champion_name: &str,
        tier: &str,
        position: Option<&str>,
    ) -> Option<ChampionMeta> {
        self.champion_meta(champion_name, tier, position).await
    }

    pub async fn champion_positions(&self, champion_name: &str, tier: &str) -> Vec<PositionStats> {
        self.try_champion_positions(champion_name, tier)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("OP.GG positions for {} unavailable: {}", champion_name, e);
                Vec::new()
            })
    }

    /// Empty position lists are returned but never cached.
    pub async fn try_champion_positions(
        &self,
        champion_name: &str,
        tier: &str,
    ) -> Result<Vec<PositionStats>> {
        let key = format!("positions_{}_{}", champion_name, tier);
        if let Some(cached) = self.cache.get(&key, None) {
            return Ok(cached);
        }

        let payload = self
            .try_invoke(POSITIONS_FUNCTION, champion_name, tier, None)
            .await?;
        let rows = payload
            .as_array()
            .ok_or_else(|| Error::parse("positions payload is not an array"))?;
        let positions: Vec<PositionStats> = rows.iter().map(normalize_position).collect();

        if positions.is_empty() {
            tracing::debug!("No positions reported for {}", champion_name);
        } else {
            self.cache.set(&key, &positions, "");
        }
        Ok(positions)
    }

    /// Champions `champion_name` performs well against.
    pub async fn best_matchups(
        &self,
        champion_name: &str,
        tier: &str,
        position: Option<&str>,
    ) -> Vec<ChampionCounter> {
        self.champion_analysis(champion_name, tier, position)
            .await
            .map(|analysis| analysis.strong_counters)
            .unwrap_or_default()
    }

    /// Champions that counter `champion_name`.
    pub async fn worst_matchups(
        &self,
        champion_name: &str,
        tier: &str,
        position: Option<&str>,
    ) -> Vec<ChampionCounter> {
        self.champion_analysis(champion_name, tier, position)
            .await
            .map(|analysis| analysis.weak_counters)
            .unwrap_or_default()
    }
}

fn require_object(payload: &Value) -> Result<&Value> {
    if payload.is_object() {
        Ok(payload)
    } else {
        Err(Error::parse("payload is not an object"))
    }
}

/// Extract the payload from a function response.
///
/// 1. `result` is unwrapped when present.
/// 2. With a `content` list, the first item must be a text item whose text is
///    a fenced JSON block or, failing that, JSON on its own.
/// 3. Without `content` (absent or null) the unwrapped root is the payload.
pub fn parse_envelope(response: Value) -> Result<Value> {
    let root = unwrap_result(response);
    if root.is_null() {
        return Err(Error::parse("empty envelope"));
    }

    let content = match root.get("content") {
        None | Some(Value::Null) => return Ok(root),
        Some(content) => content,
    };

    let first = content
        .get(0)
        .ok_or_else(|| Error::parse("envelope content is empty"))?;
    match (first.get("type").and_then(Value::as_str), first.get("text").and_then(Value::as_str)) {
        (Some("text"), Some(text)) => parse_text(text),
        _ => Err(Error::parse("envelope content is not text")),
    }
}

fn parse_text(text: &str) -> Result<Value> {
    if let Some(fenced) = FENCED_JSON.captures(text).and_then(|c| c.get(1)) {
        match serde_json::from_str(fenced.as_str()) {
            Ok(value) => return Ok(value),
            Err(e) => tracing::debug!("Fenced block is not JSON, parsing whole text: {}", e),
        }
    }
    Ok(serde_json::from_str(text.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::error::ErrorKind;
    use crate::cache::clear_prefix;
    use crate::test_support::{FailingStore, FakeInvoker};
    use std::time::Duration;

    const SIX_HOURS: Duration = Duration::from_secs(6 * 60 * 60);

    fn client(invoker: Arc<FakeInvoker>) -> OpggClient {
        let cache = CacheStore::new(Arc::new(MemoryStore::new()), "opgg_", SIX_HOURS);
        OpggClient::new(invoker, cache)
    }

    fn text_envelope(text: &str) -> Value {
        json!({ "result": { "content": [{ "type": "text", "text": text }] } })
    }

    #[test]
    fn test_envelope_fenced_json() {
        let text = "Here is the data:\n```json\n{\"winRate\": 51.2}\n```\nEnjoy.";
        assert_eq!(parse_envelope(text_envelope(text)).unwrap(), json!({ "winRate": 51.2 }));
    }

    #[test]
    fn test_envelope_bare_json_text() {
        let text = "{\"win_rate\": 49.9}";
        assert_eq!(parse_envelope(text_envelope(text)).unwrap(), json!({ "win_rate": 49.9 }));
    }

    #[test]
    fn test_envelope_broken_fence_falls_back_to_whole_text() {
        let text = "```json\nnot json\n```";
        let err = parse_envelope(text_envelope(text)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_envelope_without_content() {
        let bare = json!({ "championName": "Ahri", "winRate": 52.0 });
        assert_eq!(parse_envelope(bare.clone()).unwrap(), bare);
        assert_eq!(parse_envelope(json!({ "result": bare.clone() })).unwrap(), bare);
        assert_eq!(
            parse_envelope(json!({ "content": null, "kda": 3.1 })).unwrap(),
            json!({ "content": null, "kda": 3.1 })
        );
    }

    #[test]
    fn test_envelope_rejects_non_text_content() {
        let image = json!({ "result": { "content": [{ "type": "image", "data": "..." }] } });
        assert_eq!(parse_envelope(image).unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(parse_envelope(json!({ "content": [] })).unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(parse_envelope(Value::Null).unwrap_err().kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_analysis_unavailable_yields_empty_matchups() {
        let invoker = Arc::new(FakeInvoker::new());
        let client = client(invoker.clone());

        let err = client
            .try_champion_analysis("Ahri", "platinum_plus", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);

        assert!(client.champion_analysis("Ahri", "platinum_plus", None).await.is_none());
        assert!(client.best_matchups("Ahri", "platinum_plus", None).await.is_empty());
        assert!(client.worst_matchups("Ahri", "platinum_plus", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_analysis_normalizes_and_caches() {
        let payload = r#"```json
{
  "champion_name": "Ahri",
  "rank_tier": "platinum_plus",
  "win_rate": 51.3,
  "pickRate": 9.1,
  "strong_counters": [{ "champion_name": "Veigar", "win_rate": 55.0, "games": 800, "lane_win_rate": 53.2 }],
  "weakCounters": [{ "championName": "Fizz", "winRate": 46.1, "games": 1200 }]
}
```"#;
        let invoker = Arc::new(FakeInvoker::new().respond(ANALYSIS_FUNCTION, text_envelope(payload)));
        let client = client(invoker.clone());

        let analysis = client
            .champion_analysis("Ahri", "platinum_plus", Some("mid"))
            .await
            .unwrap();
        assert_eq!(analysis.tier, "platinum_plus");
        assert_eq!(analysis.ban_rate, 0.0);

        let best = client.best_matchups("Ahri", "platinum_plus", Some("mid")).await;
        assert_eq!(best[0].champion_name, "Veigar");
        assert_eq!(best[0].lane_win_rate, Some(53.2));
        let worst = client.worst_matchups("Ahri", "platinum_plus", Some("mid")).await;
        assert_eq!(worst[0].champion_name, "Fizz");

        assert_eq!(invoker.call_count(), 1);
        let (function, body) = &invoker.calls()[0];
        assert_eq!(function, ANALYSIS_FUNCTION);
        assert_eq!(body, &json!({ "championName": "Ahri", "tier": "platinum_plus", "position": "mid" }));
    }

    #[tokio::test]
    async fn test_broken_cache_backend_still_serves_remote_data() {
        let backend = Arc::new(FailingStore::default());
        let invoker = Arc::new(FakeInvoker::new().respond(META_FUNCTION, json!({ "winRate": 50.0 })));
        let client = OpggClient::new(
            invoker.clone(),
            CacheStore::new(backend.clone(), "opgg_", SIX_HOURS),
        );

        let meta = client.champion_meta("Ahri", "platinum_plus", None).await.unwrap();
        assert_eq!(meta.win_rate, 50.0);
        assert_eq!(invoker.call_count(), 1);
        assert_eq!(clear_prefix(backend.as_ref(), "opgg_"), 0);
        assert!(backend.attempts() > 0);
    }

    #[tokio::test]
    async fn test_meta_and_stats_alias() {
        let invoker = Arc::new(FakeInvoker::new().respond(
            META_FUNCTION,
            json!({ "result": { "winRate": 50.5, "games": 10000, "lane": "top" } }),
        ));
        let client = client(invoker.clone());

        let meta = client.champion_meta("Garen", "gold", None).await.unwrap();
        assert_eq!(meta.champion_name, "Garen");
        assert_eq!(meta.position, "top");
        assert_eq!(meta.games, 10000.0);
        assert_eq!(meta.avg_kills, 0.0);

        assert_eq!(client.champion_stats("Garen", "gold", None).await, Some(meta));
        assert_eq!(invoker.call_count(), 1);
        assert_eq!(invoker.calls()[0].1, json!({ "championName": "Garen", "tier": "gold" }));
    }

    #[tokio::test]
    async fn test_position_filter_is_part_of_cache_key() {
        let invoker = Arc::new(FakeInvoker::new().respond(META_FUNCTION, json!({ "winRate": 50.0 })));
        let client = client(invoker.clone());

        client.champion_meta("Garen", "gold", None).await;
        client.champion_meta("Garen", "gold", Some("top")).await;
        assert_eq!(invoker.call_count(), 2);
    }

    #[tokio::test]
    async fn test_positions() {
        let invoker = Arc::new(FakeInvoker::new().respond(
            POSITIONS_FUNCTION,
            text_envelope(r#"[{ "position": "mid", "win_rate": 51.0, "pickRate": 80.0, "games": 5000 }, { "lane": "bottom" }]"#),
        ));
        let client = client(invoker.clone());

        let positions = client.champion_positions("Ahri", "platinum_plus").await;
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].win_rate, 51.0);
        assert_eq!(positions[1].position, "bottom");

        client.champion_positions("Ahri", "platinum_plus").await;
        assert_eq!(invoker.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_positions_are_not_cached() {
        let invoker = Arc::new(FakeInvoker::new().respond(POSITIONS_FUNCTION, json!([])));
        let client = client(invoker.clone());

        assert!(client.champion_positions("Ahri", "gold").await.is_empty());
        assert!(client.champion_positions("Ahri", "gold").await.is_empty());
        assert_eq!(invoker.call_count(), 2);
    }

    #[tokio::test]
    async fn test_non_object_payload_is_parse_error() {
        let invoker = Arc::new(FakeInvoker::new().respond(META_FUNCTION, text_envelope("42")));
        let client = client(invoker);

        let err = client.try_champion_meta("Ahri", "gold", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
