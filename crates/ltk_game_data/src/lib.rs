//! Game data resolution and caching for League of Legends tooling.
//!
//! This crate fetches the versioned static catalog (champions, items, runes,
//! summoner spells) and third-party champion analytics, reconciles their
//! inconsistent payload shapes into one schema and caches the results with
//! time- and version-based invalidation.
//!
//! Most callers start from [`GameData`]:
//!
//! ```no_run
//! # async fn run() -> ltk_game_data::Result<()> {
//! use ltk_game_data::{GameData, GameDataConfig};
//!
//! let data = GameData::from_config(GameDataConfig::default())?;
//! let version = data.latest_version().await;
//! let stats = data.ugg().champion_stats("Ahri").await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod client;
mod config;
mod error;
pub mod normalize;
pub mod opgg;
pub mod remote;
pub mod shape;
pub mod static_data;
pub mod types;
pub mod ugg;
pub mod version;

#[cfg(test)]
mod test_support;

pub use cache::{CacheEntry, CacheStore, Clock, FileStore, KeyValueStore, MemoryStore, SystemClock};
pub use client::{GameData, OPGG_NAMESPACE, STATIC_DATA_NAMESPACE, UGG_NAMESPACE};
pub use config::*;
pub use error::{Error, ErrorKind, Result};
pub use opgg::OpggClient;
pub use remote::{HttpInvoker, RemoteInvoker};
pub use static_data::{AssetUrls, DataDragonHttp, StaticDataClient, StaticDataSource};
pub use types::*;
pub use ugg::UggClient;
pub use version::{to_patch, VersionResolver};
