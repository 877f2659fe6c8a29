use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Transport for the versioned static data catalog.
#[async_trait]
pub trait StaticDataSource: Send + Sync {
    /// All published versions, in the order the provider returns them.
    async fn fetch_versions(&self) -> Result<Vec<String>>;

    /// The raw document for `resource` (e.g. `champion`, `item`, `champion/Ahri`).
    async fn fetch_resource(&self, version: &str, locale: &str, resource: &str) -> Result<Value>;
}

/// Data Dragon over HTTP.
///
/// - `GET {base}/api/versions.json`
/// - `GET {base}/cdn/{version}/data/{locale}/{resource}.json`
#[derive(Debug, Clone)]
pub struct DataDragonHttp {
    client: reqwest::Client,
    base_url: String,
}

impl DataDragonHttp {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                "ltk_game_data/",
                env!("CARGO_PKG_VERSION"),
                " (+https://github.com/LeagueToolkit/league-mod)"
            ))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl StaticDataSource for DataDragonHttp {
    async fn fetch_versions(&self) -> Result<Vec<String>> {
        self.get_json(&format!("{}/api/versions.json", self.base_url))
            .await
    }

    async fn fetch_resource(&self, version: &str, locale: &str, resource: &str) -> Result<Value> {
        self.get_json(&format!(
            "{}/cdn/{}/data/{}/{}.json",
            self.base_url, version, locale, resource
        ))
        .await
    }
}
