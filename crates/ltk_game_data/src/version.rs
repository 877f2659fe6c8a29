//! Resolution of the current game client version.

use crate::cache::CacheStore;
use crate::error::{Error, Result};
use crate::static_data::StaticDataSource;
use semver::Version;
use std::sync::Arc;

const VERSION_CACHE_KEY: &str = "version";
/// Version tag of the cached version entry itself.
const LATEST_TAG: &str = "latest";

/// Resolves the latest game client version, caching it in the static data
/// namespace.
///
/// The provider's versions list is assumed to be ordered newest first and the
/// first element is taken as-is. That ordering is an external contract this
/// crate does not control, so every fresh fetch is cross-checked and a warning
/// is logged when a later entry looks newer than the first.
///
/// Lookup failures never propagate: [`latest_version`](Self::latest_version)
/// degrades to a fixed fallback version so dependent components keep working.
pub struct VersionResolver {
    source: Arc<dyn StaticDataSource>,
    cache: CacheStore,
    fallback: String,
}

impl VersionResolver {
    pub fn new(source: Arc<dyn StaticDataSource>, cache: CacheStore, fallback: impl Into<String>) -> Self {
        Self {
            source,
            cache,
            fallback: fallback.into(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// The latest version, or the fallback version if it cannot be determined.
    pub async fn latest_version(&self) -> String {
        match self.try_latest_version().await {
            Ok(version) => version,
            Err(e) => {
                tracing::warn!(
                    "Failed to resolve latest version, using fallback {}: {}",
                    self.fallback,
                    e
                );
                self.fallback.clone()
            }
        }
    }

    pub async fn try_latest_version(&self) -> Result<String> {
        if let Some(version) = self.cache.get::<String>(VERSION_CACHE_KEY, Some(LATEST_TAG)) {
            return Ok(version);
        }

        let versions = self.source.fetch_versions().await?;
        let latest = versions
            .first()
            .cloned()
            .ok_or_else(|| Error::parse("versions list is empty"))?;
        warn_if_not_newest(&latest, &versions);

        self.cache.set(VERSION_CACHE_KEY, &latest, LATEST_TAG);
        tracing::debug!("Resolved latest version {}", latest);
        Ok(latest)
    }

    /// The analytics patch identifier for the latest version.
    pub async fn latest_patch(&self) -> String {
        to_patch(&self.latest_version().await)
    }
}

/// Translate a client version into a patch identifier: `"14.24.1"` → `"14_24"`.
pub fn to_patch(version: &str) -> String {
    let mut parts = version.trim().split('.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or_default();
    format!("{}_{}", major, minor)
}

/// First entry after `first` that parses as a strictly newer semver version.
///
/// Entries that are not `major.minor.patch` (old `lolpatch_*` tags) are skipped.
fn newer_than_first<'a>(first: &str, versions: &'a [String]) -> Option<&'a str> {
    let first = Version::parse(first).ok()?;
    versions
        .iter()
        .skip(1)
        .find(|v| Version::parse(v).is_ok_and(|parsed| parsed > first))
        .map(String::as_str)
}

fn warn_if_not_newest(first: &str, versions: &[String]) {
    if Version::parse(first).is_err() {
        tracing::warn!("Latest version '{}' is not a semver version", first);
        return;
    }
    if let Some(newer) = newer_than_first(first, versions) {
        tracing::warn!(
            "Versions list is not newest-first: '{}' is listed after '{}'",
            newer,
            first
        );
    }
}
