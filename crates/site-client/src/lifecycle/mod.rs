//! # System Lifecycle
//!
//! [`SiteSystem`] builds every client from one injected [`HttpClient`](aggregate_fetch::HttpClient),
//! spawns the landing page [`FetchActor`](aggregate_fetch::FetchActor), and
//! shuts it down again.
//!
//! ```rust,ignore
//! let config = SiteConfig::load(None)?;
//! let system = SiteSystem::from_config(&config)?;
//!
//! let result = system.landing.refresh().await?;
//! let view = LandingView::from_result(&result);
//!
//! system.shutdown().await?;
//! ```
//!
//! Shutdown drops the landing handle, which closes the actor's channel; the
//! actor finishes any cycle in flight and exits.

pub mod site_system;

pub use site_system::*;
