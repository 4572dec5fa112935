//! # Aggregate Fetcher
//!
//! Runs a fixed set of named GET requests concurrently and publishes one
//! consolidated result.
//!
//! ## Cycle
//!
//! ```text
//! Idle ──fetch()──► Loading ──all requests settled──► Settled
//!                      ▲                                  │
//!                      └────────── next fetch() ──────────┘
//! ```
//!
//! - Every request is dispatched up front and joined with
//!   [`futures::future::join_all`], which waits for *all* of them. A failing
//!   request never cancels or delays its siblings.
//! - A success is passed through the [`ResourceRegistry`] and stored under its
//!   key. A failure (transport, non-2xx, timeout, undecodable body) only marks
//!   the key as failed; the error itself is logged and dropped.
//! - The fetch as a whole cannot fail. If every request fails the result is an
//!   empty `values` map and a full `failed_keys` set.
//!
//! ## Publishing
//!
//! The fetcher owns a [`watch`] channel. It writes to it twice per cycle: once
//! to flip the phase to `Loading` and once to install the settled result.
//! Subscribers therefore only ever observe complete snapshots, and `Loading`
//! is never re-entered within a cycle.
//!
//! While a cycle is `Loading`, the snapshot still carries the previous cycle's
//! settled result so a consumer can keep showing it.

use crate::cardinality::ResourceRegistry;
use crate::client::HttpClient;
use crate::error::FetchError;
use crate::normalize::NormalizedValue;
use crate::request::RequestSet;
use futures::future::join_all;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Where the fetcher is within its current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No fetch has been triggered yet.
    #[default]
    Idle,
    /// Requests are in flight.
    Loading,
    /// Every request of the current cycle has settled.
    Settled,
}

/// The outcome of one cycle: normalized values for keys that succeeded and the
/// set of keys that failed. The two never share a key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    pub values: BTreeMap<String, NormalizedValue>,
    pub failed_keys: BTreeSet<String>,
}

impl AggregateResult {
    pub fn get(&self, key: &str) -> Option<&NormalizedValue> {
        self.values.get(key)
    }

    pub fn is_failed(&self, key: &str) -> bool {
        self.failed_keys.contains(key)
    }

    /// True when at least one key succeeded and at least one failed.
    pub fn is_partial(&self) -> bool {
        !self.values.is_empty() && !self.failed_keys.is_empty()
    }

    /// Keeps only the values whose key is not part of `requests`.
    fn stale_outside(&self, requests: &RequestSet) -> Self {
        Self {
            values: self
                .values
                .iter()
                .filter(|(key, _)| !requests.contains_key(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            failed_keys: BTreeSet::new(),
        }
    }
}

/// The snapshot published to subscribers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    /// Incremented once per triggered cycle; `0` before the first one.
    pub cycle: u64,
    pub phase: Phase,
    pub result: AggregateResult,
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

/// What happens to values from the previous cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetentionPolicy {
    /// Each cycle starts from an empty result.
    #[default]
    Replace,
    /// Values for keys *not* requested this cycle are carried over. Keys that
    /// are requested always get a fresh value or a failure mark.
    RetainStale,
}

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Per-request limit. A request that exceeds it counts as failed.
    pub request_timeout: Option<Duration>,
    pub retention: RetentionPolicy,
}

/// Issues a [`RequestSet`] concurrently and publishes an [`AggregateResult`].
///
/// `fetch` takes `&mut self`: one fetcher runs one cycle at a time, and it is
/// the only writer of its published state.
pub struct AggregateFetcher<C: HttpClient> {
    client: C,
    registry: ResourceRegistry,
    options: FetchOptions,
    state: watch::Sender<FetchState>,
}

impl<C: HttpClient> AggregateFetcher<C> {
    pub fn new(client: C, registry: ResourceRegistry) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            client,
            registry,
            options: FetchOptions::default(),
            state,
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// A receiver that sees every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// The latest published snapshot.
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// Runs one full cycle and returns its result.
    #[instrument(skip_all, fields(requests = requests.len()))]
    pub async fn fetch(&mut self, requests: &RequestSet) -> AggregateResult {
        let cycle = self.state.borrow().cycle + 1;
        let previous = self.state.borrow().result.clone();

        self.state.send_modify(|state| {
            state.cycle = cycle;
            state.phase = Phase::Loading;
        });
        debug!(cycle, "Loading");

        let client = &self.client;
        let timeout = self.options.request_timeout;
        let pending = requests.iter().map(|descriptor| async move {
            let request = client.get(&descriptor.endpoint);
            let outcome = match timeout {
                Some(limit) => tokio::time::timeout(limit, request)
                    .await
                    .unwrap_or_else(|_| {
                        Err(FetchError::Timeout {
                            url: descriptor.endpoint.clone(),
                        })
                    }),
                None => request.await,
            };
            (descriptor.key, outcome)
        });
        let settled = join_all(pending).await;

        let mut result = match self.options.retention {
            RetentionPolicy::Replace => AggregateResult::default(),
            RetentionPolicy::RetainStale => previous.stale_outside(requests),
        };

        for (key, outcome) in settled {
            match outcome {
                Ok(response) => {
                    let value = self.registry.normalize(&key, Some(&response.body));
                    debug!(cycle, %key, url = %response.url, "Settled");
                    result.values.insert(key, value);
                }
                Err(error) => {
                    warn!(cycle, %key, url = error.url().unwrap_or_default(), %error, "Section unavailable");
                    result.values.remove(&key);
                    result.failed_keys.insert(key);
                }
            }
        }

        info!(
            cycle,
            ok = result.values.len(),
            failed = result.failed_keys.len(),
            "Settled"
        );

        self.state.send_replace(FetchState {
            cycle,
            phase: Phase::Settled,
            result: result.clone(),
        });

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardinality::Cardinality;
    use crate::mock::MockHttpClient;
    use serde_json::json;

    fn registry() -> ResourceRegistry {
        ResourceRegistry::new()
            .singular("hero")
            .singular("about")
            .plural("whatWeDo")
    }

    #[tokio::test]
    async fn test_mixed_outcomes() {
        let mut mock = MockHttpClient::new();
        mock.expect_get("/hero").return_ok(json!({ "data": { "name": "X" } }));
        mock.expect_get("/about").return_status(500);
        mock.expect_get("/what-we-do")
            .return_ok(json!({ "data": { "data": [{ "id": 1 }, { "id": 2 }] } }));

        let requests = RequestSet::new()
            .with("hero", "/hero")
            .and_then(|s| s.with("about", "/about"))
            .and_then(|s| s.with("whatWeDo", "/what-we-do"))
            .unwrap();

        let mut fetcher = AggregateFetcher::new(mock.clone(), registry());
        let result = fetcher.fetch(&requests).await;

        assert_eq!(
            result.get("hero"),
            Some(&NormalizedValue::Record(json!({ "name": "X" })))
        );
        assert_eq!(
            result.get("whatWeDo"),
            Some(&NormalizedValue::List(vec![json!({ "id": 1 }), json!({ "id": 2 })]))
        );
        assert!(result.get("about").is_none());
        assert_eq!(result.failed_keys, BTreeSet::from(["about".to_string()]));
        assert!(result.is_partial());

        let state = fetcher.state();
        assert_eq!(state.phase, Phase::Settled);
        assert!(!state.is_loading());
        assert_eq!(state.cycle, 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_all_requests_fail() {
        let mut mock = MockHttpClient::new();
        mock.expect_get("/hero").return_err(FetchError::Transport {
            url: "/hero".into(),
            message: "connection refused".into(),
        });
        mock.expect_get("/about").return_status(404);

        let requests = RequestSet::new()
            .with("hero", "/hero")
            .and_then(|s| s.with("about", "/about"))
            .unwrap();

        let mut fetcher = AggregateFetcher::new(mock, registry());
        let result = fetcher.fetch(&requests).await;

        assert!(result.values.is_empty());
        assert_eq!(result.failed_keys.len(), 2);
        assert_eq!(fetcher.state().phase, Phase::Settled);
    }

    #[tokio::test]
    async fn test_loading_until_slowest_request_settles() {
        let mut mock = MockHttpClient::new();
        mock.expect_get("/hero")
            .with_delay(Duration::from_millis(50))
            .return_ok(json!({ "title": "slow" }));
        mock.expect_get("/about").return_ok(json!({ "title": "fast" }));

        let requests = RequestSet::new()
            .with("hero", "/hero")
            .and_then(|s| s.with("about", "/about"))
            .unwrap();

        let mut fetcher = AggregateFetcher::new(mock, registry());
        let mut rx = fetcher.subscribe();
        let task = tokio::spawn(async move {
            let result = fetcher.fetch(&requests).await;
            (fetcher, result)
        });

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading());

        rx.changed().await.unwrap();
        let settled = rx.borrow_and_update().clone();
        assert_eq!(settled.phase, Phase::Settled);
        assert_eq!(settled.result.values.len(), 2);

        let (_fetcher, result) = task.await.unwrap();
        assert_eq!(result, settled.result);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        let mut mock = MockHttpClient::new();
        mock.expect_get("/hero")
            .with_delay(Duration::from_millis(200))
            .return_ok(json!({ "title": "late" }));
        mock.expect_get("/about").return_ok(json!({ "title": "on time" }));

        let requests = RequestSet::new()
            .with("hero", "/hero")
            .and_then(|s| s.with("about", "/about"))
            .unwrap();

        let mut fetcher = AggregateFetcher::new(mock, registry()).with_options(FetchOptions {
            request_timeout: Some(Duration::from_millis(20)),
            ..FetchOptions::default()
        });
        let result = fetcher.fetch(&requests).await;

        assert!(result.is_failed("hero"));
        assert!(result.get("about").is_some());
    }

    #[tokio::test]
    async fn test_retain_stale_keeps_unrequested_keys_only() {
        let mut mock = MockHttpClient::new();
        mock.expect_get("/hero").return_ok(json!({ "title": "first" }));
        mock.expect_get("/about").return_ok(json!({ "title": "about" }));
        mock.expect_get("/hero").return_status(503);

        let both = RequestSet::new()
            .with("hero", "/hero")
            .and_then(|s| s.with("about", "/about"))
            .unwrap();
        let hero_only = RequestSet::new().with("hero", "/hero").unwrap();

        let mut fetcher = AggregateFetcher::new(mock, registry()).with_options(FetchOptions {
            retention: RetentionPolicy::RetainStale,
            ..FetchOptions::default()
        });
        fetcher.fetch(&both).await;
        let second = fetcher.fetch(&hero_only).await;

        assert!(second.get("about").is_some());
        assert!(second.get("hero").is_none());
        assert!(second.is_failed("hero"));
        assert_eq!(fetcher.state().cycle, 2);
    }

    #[tokio::test]
    async fn test_replace_drops_previous_values() {
        let mut mock = MockHttpClient::new();
        mock.expect_get("/about").return_ok(json!({ "title": "about" }));
        mock.expect_get("/hero").return_ok(json!({ "title": "hero" }));

        let mut fetcher = AggregateFetcher::new(mock, registry());
        fetcher.fetch(&RequestSet::new().with("about", "/about").unwrap()).await;
        let second = fetcher.fetch(&RequestSet::new().with("hero", "/hero").unwrap()).await;

        assert_eq!(second.values.keys().collect::<Vec<_>>(), vec!["hero"]);
    }

    #[tokio::test]
    async fn test_unknown_key_uses_default_shape() {
        let mut mock = MockHttpClient::new();
        mock.expect_get("/footer").return_ok(json!({ "data": [{ "label": "Contact" }] }));

        let mut fetcher = AggregateFetcher::new(mock, registry());
        let result = fetcher.fetch(&RequestSet::new().with("footer", "/footer").unwrap()).await;

        assert_eq!(fetcher.registry().classify("footer"), Cardinality::Default);
        assert_eq!(
            result.get("footer"),
            Some(&NormalizedValue::Record(json!({ "data": [{ "label": "Contact" }] })))
        );
    }
}
