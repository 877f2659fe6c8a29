//! Named remote functions the analytics providers are reached through.
//!
//! Each provider talks to a small set of named endpoints (for example
//! `opgg-champion-meta`) that accept a JSON body and answer with JSON. The
//! transport is abstracted behind [`RemoteInvoker`] so providers can be driven
//! by in-memory doubles in tests.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait RemoteInvoker: Send + Sync {
    /// Invoke `function` with `body` and return the decoded JSON response.
    async fn invoke(&self, function: &str, body: Value) -> Result<Value>;
}

/// Invokes functions by POSTing JSON to `{base_url}/{function}`.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpInvoker {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                "ltk_game_data/",
                env!("CARGO_PKG_VERSION"),
                " (+https://github.com/LeagueToolkit/league-mod)"
            ))
            .build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl RemoteInvoker for HttpInvoker {
    async fn invoke(&self, function: &str, body: Value) -> Result<Value> {
        if self.base_url.is_empty() {
            return Err(Error::Network(format!(
                "no functions endpoint configured for '{}'",
                function
            )));
        }

        let url = format!("{}/{}", self.base_url, function);
        tracing::debug!("Invoking remote function {}", url);

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key).header("apikey", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// The `result` member of a function response, or the response itself.
pub fn unwrap_result(response: Value) -> Value {
    match response {
        Value::Object(mut map) if map.get("result").is_some_and(|r| !r.is_null()) => {
            map.remove("result").unwrap_or_default()
        }
        other => other,
    }
}
