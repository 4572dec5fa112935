//! # Aggregate Fetch
//!
//! Client-side data fetching for pages that are stitched together from many
//! unrelated backend endpoints.
//!
//! A landing page may need a hero banner, an "about" blurb, a product list and
//! a dozen other sections, each served by its own endpoint, each wrapped in a
//! slightly different JSON envelope, and any of which may be down. This crate
//! fetches them all at once, keeps whatever succeeded, marks whatever failed,
//! and reshapes every payload into one predictable form.
//!
//! ## Architecture Overview
//!
//! 1. **Normalization** ([`normalize`], [`ResourceRegistry`]): each resource
//!    key is classified once as [`Cardinality::Singular`], `Plural` or
//!    `Default`, and an explicit fallback chain per class digs the payload out
//!    of the envelope. Pure, infallible.
//! 2. **Aggregation** ([`AggregateFetcher`]): dispatches a [`RequestSet`]
//!    concurrently, waits for every request to settle, and publishes an
//!    [`AggregateResult`] through a `watch` channel. Partial failure is the
//!    normal case, not an error.
//! 3. **Triggering** ([`FetchActor`], [`FetchHandle`]): a task that owns the
//!    fetcher and runs one cycle per refresh request.
//! 4. **Transport** ([`HttpClient`], [`RestClient`]): the injected network
//!    seam. Tests use [`mock::MockHttpClient`].
//! 5. **CRUD** ([`ResourceClient`], [`CrudClient`]): the list / create /
//!    update / delete / toggle-status routes used by admin screens.
//!
//! ## Example
//!
//! ```rust,no_run
//! use aggregate_fetch::{AggregateFetcher, RequestSet, ResourceRegistry, RestClient};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), aggregate_fetch::FetchError> {
//! let client = RestClient::new("https://api.example.com", Duration::from_secs(10))?;
//! let registry = ResourceRegistry::new().singular("hero").plural("products");
//! let requests = RequestSet::new()
//!     .with("hero", "/hero")?
//!     .with("products", "/products")?;
//!
//! let mut fetcher = AggregateFetcher::new(client, registry);
//! let result = fetcher.fetch(&requests).await;
//! for key in &result.failed_keys {
//!     println!("{key} unavailable");
//! }
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod cardinality;
pub mod client;
pub mod envelope;
pub mod error;
pub mod fetcher;
pub mod mock;
pub mod normalize;
pub mod request;
pub mod resource;
pub mod tracing;

// Re-export core types for convenience
pub use actor::{FetchActor, FetchCommand, FetchHandle};
pub use cardinality::{Cardinality, ResourceRegistry};
pub use client::{HttpClient, RestClient};
pub use envelope::{ApiResponse, HttpResponse};
pub use error::{ClientError, FetchError, HandleError};
pub use fetcher::{AggregateFetcher, AggregateResult, FetchOptions, FetchState, Phase, RetentionPolicy};
pub use normalize::{normalize, NormalizedValue};
pub use request::{HttpRequest, Method, RequestDescriptor, RequestSet};
pub use resource::{CrudClient, ResourceClient, RestResource};
