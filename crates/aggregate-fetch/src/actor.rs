//! # Fetch Actor
//!
//! Wraps an [`AggregateFetcher`] in its own Tokio task so that refreshes can be
//! triggered from anywhere (a page mount, a "reload" button, a timer) without
//! sharing the fetcher itself.
//!
//! ## Concurrency Model
//!
//! The actor owns the fetcher and processes [`FetchCommand`]s *sequentially*.
//! A refresh that arrives while a cycle is in flight waits for that cycle to
//! settle, so there is never more than one writer of the published state and
//! `Loading` is only ever entered from `Idle` or `Settled`.
//!
//! ## Teardown
//!
//! The actor stops when every [`FetchHandle`] is dropped. A cycle that is
//! already in flight still completes and publishes, but a consumer that has
//! gone away has also dropped its `watch::Receiver`, so the late snapshot is
//! never observed.

use crate::client::HttpClient;
use crate::error::HandleError;
use crate::fetcher::{AggregateFetcher, AggregateResult, FetchState, Phase};
use crate::request::RequestSet;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<T>;

/// Messages accepted by a [`FetchActor`].
#[derive(Debug)]
pub enum FetchCommand {
    /// Run one cycle. `requests` replaces the actor's request set when given.
    Refresh {
        requests: Option<RequestSet>,
        respond_to: Option<Response<AggregateResult>>,
    },
}

/// The task that owns an [`AggregateFetcher`].
pub struct FetchActor<C: HttpClient> {
    receiver: mpsc::Receiver<FetchCommand>,
    fetcher: AggregateFetcher<C>,
    requests: RequestSet,
}

impl<C: HttpClient + 'static> FetchActor<C> {
    pub fn new(
        fetcher: AggregateFetcher<C>,
        requests: RequestSet,
        buffer_size: usize,
    ) -> (Self, FetchHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let handle = FetchHandle {
            sender,
            state: fetcher.subscribe(),
        };
        let actor = Self {
            receiver,
            fetcher,
            requests,
        };
        (actor, handle)
    }

    /// Runs the command loop until every handle is dropped.
    pub async fn run(mut self) {
        info!(requests = self.requests.len(), "Fetch actor started");

        while let Some(command) = self.receiver.recv().await {
            match command {
                FetchCommand::Refresh {
                    requests,
                    respond_to,
                } => {
                    if let Some(requests) = requests {
                        debug!(requests = requests.len(), "Request set replaced");
                        self.requests = requests;
                    }
                    let result = self.fetcher.fetch(&self.requests).await;
                    if let Some(respond_to) = respond_to {
                        let _ = respond_to.send(result);
                    }
                }
            }
        }

        info!(cycles = self.fetcher.state().cycle, "Shutdown");
    }
}

/// A cloneable handle to a running [`FetchActor`].
#[derive(Clone)]
pub struct FetchHandle {
    sender: mpsc::Sender<FetchCommand>,
    state: watch::Receiver<FetchState>,
}

impl FetchHandle {
    /// Runs a cycle and waits for its result.
    pub async fn refresh(&self) -> Result<AggregateResult, HandleError> {
        self.request(None).await
    }

    /// Replaces the request set, runs a cycle and waits for its result.
    pub async fn refresh_with(&self, requests: RequestSet) -> Result<AggregateResult, HandleError> {
        self.request(Some(requests)).await
    }

    /// Queues a cycle without waiting for it.
    pub async fn trigger(&self) -> Result<(), HandleError> {
        self.sender
            .send(FetchCommand::Refresh {
                requests: None,
                respond_to: None,
            })
            .await
            .map_err(|_| HandleError::ActorClosed)
    }

    async fn request(&self, requests: Option<RequestSet>) -> Result<AggregateResult, HandleError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FetchCommand::Refresh {
                requests,
                respond_to: Some(respond_to),
            })
            .await
            .map_err(|_| HandleError::ActorClosed)?;
        response.await.map_err(|_| HandleError::ActorDropped)
    }

    /// A fresh receiver for published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.clone()
    }

    /// The latest published snapshot.
    pub fn current(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// Waits until the current cycle, if any, has settled. Returns at once
    /// when no cycle is in flight, including before the first one.
    pub async fn settled(&self) -> Result<FetchState, HandleError> {
        let mut state = self.state.clone();
        let snapshot = state
            .wait_for(|s| s.phase != Phase::Loading)
            .await
            .map_err(|_| HandleError::ActorClosed)?;
        Ok(snapshot.clone())
    }
}
