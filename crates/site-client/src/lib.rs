//! # Site Client
//!
//! The data layer of the solar / energy marketing site: the landing page
//! sections fetched through [`aggregate_fetch`], and the admin resource
//! clients (products, categories, GST rates, business listings, service
//! reviews).
//!
//! - **[landing]**: section keys, endpoints and cardinalities, plus the typed
//!   [`LandingView`](landing::LandingView).
//! - **[model]**: record and payload types.
//! - **[clients]**: one CRUD client per admin screen.
//! - **[config]**: layered configuration (file, environment, flags).
//! - **[lifecycle]**: [`SiteSystem`](lifecycle::SiteSystem), which wires
//!   everything to one injected HTTP client.

use aggregate_fetch::HttpClient;
use std::sync::Arc;

pub mod clients;
pub mod config;
pub mod error;
pub mod landing;
pub mod lifecycle;
pub mod model;

/// The HTTP client shared by every component of a [`lifecycle::SiteSystem`].
pub type SharedHttp = Arc<dyn HttpClient>;
