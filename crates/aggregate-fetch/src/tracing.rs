//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Cycles**: `Loading` at debug, one `Settled` summary per cycle at info
//!   (`cycle`, `ok`, `failed`).
//! - **Sections**: each failed key at warn with its error, each settled key at
//!   debug with the URL it came from.
//! - **CRUD calls**: one span per [`CrudClient`](crate::CrudClient) operation
//!   with a `resource` field, and a warn line for backend rejections.
//! - **Actor lifecycle**: startup, request-set replacement and shutdown.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Cycle summaries and failures
//! RUST_LOG=info cargo run
//!
//! # Every request, with URLs
//! RUST_LOG=debug cargo run
//!
//! # Only the fetch layer
//! RUST_LOG=aggregate_fetch=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a partially failing landing page looks like:
//!
//! ```text
//! INFO Fetch actor started requests=8
//! WARN fetch: Section unavailable cycle=1 key="about" error=HTTP 500 from https://api.example.com/about
//! INFO fetch: Settled cycle=1 ok=7 failed=1
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
