//! In-memory doubles shared by unit tests.

use crate::cache::{Clock, KeyValueStore};
use crate::error::{Error, Result};
use crate::remote::RemoteInvoker;
use crate::static_data::StaticDataSource;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A clock that only moves when told to.
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(now_millis),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Backend whose every operation fails, as a full disk or revoked quota would.
#[derive(Default)]
pub struct FailingStore {
    attempts: AtomicUsize,
}

impl FailingStore {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail<T>(&self, op: &str) -> Result<T> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::Storage(format!("{} rejected: quota exceeded", op)))
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        self.fail("get")
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        self.fail("set")
    }

    fn remove(&self, _key: &str) -> Result<()> {
        self.fail("remove")
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.fail("keys")
    }
}

/// Static data source serving canned documents keyed by resource name.
#[derive(Default)]
pub struct FakeStaticSource {
    versions: Option<Vec<String>>,
    resources: HashMap<String, Value>,
    version_calls: AtomicUsize,
    resource_calls: Mutex<Vec<String>>,
}

impl FakeStaticSource {
    pub fn with_versions(versions: &[&str]) -> Self {
        Self {
            versions: Some(versions.iter().map(|v| v.to_string()).collect()),
            ..Default::default()
        }
    }

    /// Every request fails with a network error.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn resource(mut self, name: &str, document: Value) -> Self {
        self.resources.insert(name.to_string(), document);
        self
    }

    pub fn version_calls(&self) -> usize {
        self.version_calls.load(Ordering::SeqCst)
    }

    /// `{version}/{locale}/{resource}` for every resource request made so far.
    pub fn resource_calls(&self) -> Vec<String> {
        self.resource_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StaticDataSource for FakeStaticSource {
    async fn fetch_versions(&self) -> Result<Vec<String>> {
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        self.versions
            .clone()
            .ok_or_else(|| Error::Network("offline".to_string()))
    }

    async fn fetch_resource(&self, version: &str, locale: &str, resource: &str) -> Result<Value> {
        self.resource_calls
            .lock()
            .unwrap()
            .push(format!("{}/{}/{}", version, locale, resource));
        if self.versions.is_none() {
            return Err(Error::Network("offline".to_string()));
        }
        self.resources.get(resource).cloned().ok_or(Error::Http {
            status: 404,
            url: resource.to_string(),
        })
    }
}

/// Remote invoker answering each function name with a canned response.
///
/// Functions without a registered response fail with a network error.
#[derive(Default)]
pub struct FakeInvoker {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, function: &str, response: Value) -> Self {
        self.responses.insert(function.to_string(), response);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteInvoker for FakeInvoker {
    async fn invoke(&self, function: &str, body: Value) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((function.to_string(), body));
        self.responses
            .get(function)
            .cloned()
            .ok_or_else(|| Error::Network(format!("{} unreachable", function)))
    }
}
