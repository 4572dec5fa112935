//! # Resource Cardinality
//!
//! Every logical resource key is classified exactly once into a
//! [`Cardinality`], and normalization branches on that tag rather than on the
//! key string itself.

use crate::normalize::{normalize, NormalizedValue};
use serde_json::Value;
use std::collections::HashMap;

/// How many records a resource is expected to yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    /// Exactly one record (hero banner, about section).
    Singular,
    /// An ordered list of records (products, services).
    Plural,
    /// Unclassified: the payload is passed through with no shape guarantee.
    #[default]
    Default,
}

/// Maps resource keys to their [`Cardinality`]. Unknown keys fall back to
/// [`Cardinality::Default`].
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    classes: HashMap<String, Cardinality>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: impl Into<String>, cardinality: Cardinality) -> &mut Self {
        self.classes.insert(key.into(), cardinality);
        self
    }

    pub fn singular(mut self, key: impl Into<String>) -> Self {
        self.register(key, Cardinality::Singular);
        self
    }

    pub fn plural(mut self, key: impl Into<String>) -> Self {
        self.register(key, Cardinality::Plural);
        self
    }

    pub fn classify(&self, key: &str) -> Cardinality {
        self.classes.get(key).copied().unwrap_or_default()
    }

    /// Normalizes `body` according to the class registered for `key`.
    pub fn normalize(&self, key: &str, body: Option<&Value>) -> NormalizedValue {
        normalize(self.classify(key), body)
    }
}

impl<K: Into<String>> FromIterator<(K, Cardinality)> for ResourceRegistry {
    fn from_iter<I: IntoIterator<Item = (K, Cardinality)>>(iter: I) -> Self {
        let mut registry = ResourceRegistry::new();
        for (key, cardinality) in iter {
            registry.register(key, cardinality);
        }
        registry
    }
}
