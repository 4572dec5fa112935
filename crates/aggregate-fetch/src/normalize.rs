//! # Response Normalization
//!
//! The backend returns the same logical resource under several envelopes:
//!
//! ```text
//! { ...record }                    bare record
//! { "data": { ...record } }        wrapped once
//! { "data": [ { ...record } ] }    wrapped as an array of one
//! { "data": { "data": [ ... ] } }  wrapped twice
//! ```
//!
//! [`normalize`] picks the payload out of whichever of these arrived, using a
//! fixed fallback chain per [`Cardinality`]. It is pure and never fails: the
//! worst case is [`NormalizedValue::Null`] or an empty list.
//!
//! | Cardinality | Chain (first hit wins)                             | Terminal  |
//! |-------------|----------------------------------------------------|-----------|
//! | Singular    | `body.data.data`, `body.data`, `body` (arrays unwrapped to their first element) | `Null` |
//! | Plural      | `body.data` if array, `body.data.data` if array    | `[]`      |
//! | Default     | `body`                                             | `Null`    |

use crate::cardinality::Cardinality;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The canonical shape handed to consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    Record(Value),
    List(Vec<Value>),
    Null,
}

impl NormalizedValue {
    pub fn as_record(&self) -> Option<&Value> {
        match self {
            NormalizedValue::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            NormalizedValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NormalizedValue::Null)
    }

    /// Deserializes the value into a typed record or list.
    ///
    /// `Null` decodes as JSON `null`, so `Option<T>` targets read it as `None`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match self {
            NormalizedValue::Record(record) => T::deserialize(record),
            NormalizedValue::List(items) => T::deserialize(Value::Array(items.clone())),
            NormalizedValue::Null => T::deserialize(Value::Null),
        }
    }
}

/// Reshapes a raw response body for a resource of the given cardinality.
pub fn normalize(cardinality: Cardinality, body: Option<&Value>) -> NormalizedValue {
    let body = body.filter(|b| !b.is_null());
    match cardinality {
        Cardinality::Singular => body.and_then(single_record).map_or(NormalizedValue::Null, NormalizedValue::Record),
        Cardinality::Plural => NormalizedValue::List(body.and_then(record_list).unwrap_or_default()),
        Cardinality::Default => body.cloned().map_or(NormalizedValue::Null, NormalizedValue::Record),
    }
}

fn data(value: &Value) -> Option<&Value> {
    value.get("data").filter(|v| !v.is_null())
}

/// Arrays stand in for their first element; empty arrays and nulls are misses.
fn unwrap_first(value: &Value) -> Option<&Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => items.first().filter(|v| !v.is_null()),
        other => Some(other),
    }
}

fn single_record(body: &Value) -> Option<Value> {
    let nested = data(body).and_then(data);
    nested
        .and_then(unwrap_first)
        .or_else(|| data(body).and_then(unwrap_first))
        .or_else(|| unwrap_first(body))
        .cloned()
}

fn record_list(body: &Value) -> Option<Vec<Value>> {
    let outer = data(body)?;
    outer
        .as_array()
        .or_else(|| data(outer).and_then(Value::as_array))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> NormalizedValue {
        NormalizedValue::Record(value)
    }

    #[test]
    fn test_singular_envelopes_all_yield_the_record() {
        let x = json!({ "title": "Go solar", "subtitle": "Save on bills" });
        let envelopes = [
            json!({ "data": { "data": [x.clone()] } }),
            json!({ "data": { "data": x.clone() } }),
            json!({ "data": x.clone() }),
            json!({ "data": [x.clone()] }),
            x.clone(),
        ];

        for envelope in &envelopes {
            let normalized = normalize(Cardinality::Singular, Some(envelope));
            assert_eq!(normalized, record(x.clone()), "envelope {envelope}");
        }
    }

    #[test]
    fn test_singular_never_returns_an_array() {
        let normalized = normalize(Cardinality::Singular, Some(&json!({ "data": { "data": [] } })));
        assert!(normalized.as_list().is_none());
        // The empty inner array is skipped and the next level is used.
        assert_eq!(normalized, record(json!({ "data": [] })));
    }

    #[test]
    fn test_plural_prefers_single_nesting() {
        let normalized = normalize(Cardinality::Plural, Some(&json!({ "data": [{ "id": 9 }] })));
        assert_eq!(normalized, NormalizedValue::List(vec![json!({ "id": 9 })]));
    }

    #[test]
    fn test_plural_double_nesting() {
        let body = json!({ "data": { "data": [{ "id": 1 }, { "id": 2 }] } });
        let normalized = normalize(Cardinality::Plural, Some(&body));
        assert_eq!(normalized.as_list().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_plural_without_array_is_empty() {
        for body in [json!({ "data": { "id": 1 } }), json!({ "items": [] }), json!("text"), json!([1, 2])] {
            assert_eq!(normalize(Cardinality::Plural, Some(&body)), NormalizedValue::List(vec![]));
        }
    }

    #[test]
    fn test_absent_response() {
        assert_eq!(normalize(Cardinality::Singular, None), NormalizedValue::Null);
        assert_eq!(normalize(Cardinality::Default, None), NormalizedValue::Null);
        assert_eq!(normalize(Cardinality::Plural, None), NormalizedValue::List(vec![]));
        assert_eq!(normalize(Cardinality::Singular, Some(&Value::Null)), NormalizedValue::Null);
        assert_eq!(normalize(Cardinality::Plural, Some(&Value::Null)), NormalizedValue::List(vec![]));
    }

    #[test]
    fn test_default_passes_body_through() {
        let body = json!({ "data": { "links": [1, 2] } });
        assert_eq!(normalize(Cardinality::Default, Some(&body)), record(body.clone()));
    }

    #[test]
    fn test_normalize_is_repeatable() {
        let body = json!({ "data": { "data": [{ "id": 3 }] } });
        for cardinality in [Cardinality::Singular, Cardinality::Plural, Cardinality::Default] {
            assert_eq!(normalize(cardinality, Some(&body)), normalize(cardinality, Some(&body)));
        }
    }

    #[test]
    fn test_decode_typed() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Item {
            id: u32,
        }

        let list = NormalizedValue::List(vec![json!({ "id": 1 }), json!({ "id": 2 })]);
        let items: Vec<Item> = list.decode().unwrap();
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);

        let missing: Option<Item> = NormalizedValue::Null.decode().unwrap();
        assert!(missing.is_none());
    }
}
