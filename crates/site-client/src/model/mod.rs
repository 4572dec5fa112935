//! Pure data structures for the site's landing sections and admin resources.
//!
//! Admin record types implement [`RestResource`](aggregate_fetch::RestResource)
//! so they can be driven through a [`ResourceClient`](aggregate_fetch::ResourceClient).

/// Declares a numeric identifier newtype that serializes as a bare number.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// Records without an `is_active` flag are treated as active.
fn active() -> bool {
    true
}

pub mod catalog;
pub mod directory;
pub mod landing;

pub use catalog::*;
pub use directory::*;
pub use landing::*;
