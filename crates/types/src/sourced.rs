//! Provenance wrapper for field values.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A value together with the upstream sources that attested to it.
///
/// `data.json` wraps fields as `{"v": ..., "s": [...]}`; `data_no_sources.json`
/// stores the bare value. Both decode into this type, so the category records
/// are shared by the two snapshot variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sourced<T> {
    // Must stay first: untagged variants are tried in order and a bare object
    // payload would otherwise never be recognised as wrapped.
    Sourced { v: T, s: Vec<String> },
    Unsourced(T),
}

impl<T> Sourced<T> {
    pub fn new(value: T, sources: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Sourced {
            v: value,
            s: sources.into_iter().map(Into::into).collect(),
        }
    }

    pub fn bare(value: T) -> Self {
        Self::Unsourced(value)
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Sourced { v, .. } | Self::Unsourced(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Sourced { v, .. } | Self::Unsourced(v) => v,
        }
    }

    /// Sources attesting to the value; empty for bare values.
    pub fn sources(&self) -> &[String] {
        match self {
            Self::Sourced { s, .. } => s,
            Self::Unsourced(_) => &[],
        }
    }

    pub fn is_sourced(&self) -> bool {
        matches!(self, Self::Sourced { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        match self {
            Self::Sourced { v, s } => Sourced::Sourced { v: f(v), s },
            Self::Unsourced(v) => Sourced::Unsourced(f(v)),
        }
    }

    /// Drop the provenance, keeping the value.
    pub fn unsourced(self) -> Self {
        Self::Unsourced(self.into_inner())
    }
}

impl<T> Deref for Sourced<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value()
    }
}

impl<T> From<T> for Sourced<T> {
    fn from(value: T) -> Self {
        Self::Unsourced(value)
    }
}

/// Replace every `{"v": x, "s": [...]}` object in a document by `x`.
///
/// Works on raw JSON so that any document shape, known or not, can be
/// projected to its provenance-free form.
pub fn strip_sources(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            if map.contains_key("v") && map.contains_key("s") {
                return strip_sources(map.remove("v").unwrap_or(Value::Null));
            }
            Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, strip_sources(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(strip_sources).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sourced_reads_both_shapes() {
        let wrapped: Sourced<String> =
            serde_json::from_value(json!({"v": "Blu Air", "s": ["MRT Wiki"]})).unwrap();
        assert!(wrapped.is_sourced());
        assert_eq!(wrapped.value(), "Blu Air");
        assert_eq!(wrapped.sources(), ["MRT Wiki".to_string()]);

        let bare: Sourced<String> = serde_json::from_value(json!("Blu Air")).unwrap();
        assert!(!bare.is_sourced());
        assert_eq!(*bare, "Blu Air");
        assert!(bare.sources().is_empty());
    }

    #[test]
    fn test_sourced_optional_payload() {
        let none: Sourced<Option<String>> =
            serde_json::from_value(json!({"v": null, "s": ["Town List"]})).unwrap();
        assert_eq!(none.value(), &None);
        assert_eq!(none.sources().len(), 1);

        let bare_none: Sourced<Option<String>> = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(bare_none, Sourced::Unsourced(None));
    }

    #[test]
    fn test_sourced_serializes_in_wire_shape() {
        let wrapped = Sourced::new(true, ["A"]);
        assert_eq!(serde_json::to_value(&wrapped).unwrap(), json!({"v": true, "s": ["A"]}));

        let bare = Sourced::bare(3);
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!(3));
    }

    #[test]
    fn test_sourced_map_and_unsourced() {
        let wrapped = Sourced::new(2, ["A", "B"]).map(|v| v * 10);
        assert_eq!(wrapped.value(), &20);
        assert_eq!(wrapped.sources().len(), 2);
        assert_eq!(wrapped.unsourced(), Sourced::Unsourced(20));
    }

    #[test]
    fn test_strip_sources_projection() {
        let doc = json!({
            "name": "Blu Air",
            "link": {"v": "https://example.invalid", "s": ["MRT Wiki"]},
            "gates": [{"v": 3, "s": ["A"]}, {"v": 4, "s": ["B"]}],
            "nested": {"v": {"v": 1, "s": []}, "s": []},
            "only_v": {"v": 1},
            "source": ["A", "B"]
        });

        let stripped = strip_sources(doc);
        assert_eq!(
            stripped,
            json!({
                "name": "Blu Air",
                "link": "https://example.invalid",
                "gates": [3, 4],
                "nested": 1,
                "only_v": {"v": 1},
                "source": ["A", "B"]
            })
        );
    }
}
