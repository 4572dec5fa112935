//! Type-safe wrappers around [`ResourceClient`](aggregate_fetch::ResourceClient),
//! one per admin screen.

pub mod category_client;
pub mod directory_client;
pub mod gst_rate_client;
pub mod product_client;
pub mod settings_client;

pub use category_client::*;
pub use directory_client::*;
pub use gst_rate_client::*;
pub use product_client::*;
pub use settings_client::*;
