//! Wire-shape helpers shared by the FHIR model and its JSON/XML codecs.
//!
//! FHIR JSON splits every primitive into a bare value under `field` and an
//! optional `_field` sidecar carrying the element `id` and `extension` list.
//! FHIR XML instead nests that metadata inside the primitive's own element,
//! and hides cardinality entirely. The helpers in this crate describe those
//! shapes once so that the model code can accept both without knowing which
//! syntax produced the wire object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix that marks the sidecar key of a primitive field (`_birthDate`).
pub const SIDECAR_PREFIX: char = '_';

/// Returns the sidecar key paired with a primitive field name.
///
/// ```
/// assert_eq!(helios_serde_support::sidecar_key("birthDate"), "_birthDate");
/// ```
#[inline]
pub fn sidecar_key(field: &str) -> String {
    let mut key = String::with_capacity(field.len() + 1);
    key.push(SIDECAR_PREFIX);
    key.push_str(field);
    key
}

/// Checks if a wire key is a primitive sidecar key (e.g. `_birthDate`).
#[inline]
pub fn is_sidecar_key(key: &str) -> bool {
    key.starts_with(SIDECAR_PREFIX)
}

/// Strips the sidecar prefix from a key. Keys without the prefix are returned unchanged.
#[inline]
pub fn strip_sidecar_prefix(key: &str) -> &str {
    key.strip_prefix(SIDECAR_PREFIX).unwrap_or(key)
}

/// Helper that accepts either a single value or an array when decoding.
///
/// FHIR allows most repeatable elements to appear either once or multiple times
/// depending on the instance's actual cardinality. While JSON carries enough
/// structure (`[]` vs scalar) to tell the two apart, the XML stream does not
/// embed the schema-driven cardinality constraints: a repeated element that
/// occurs once looks exactly like a singular element. Every list field is
/// therefore read through `SingleOrVec` so both shapes are accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleOrVec<T>(Vec<T>);

impl<T> SingleOrVec<T> {
    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no items were present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwraps into the underlying list.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl SingleOrVec<Value> {
    /// Classifies a wire value: arrays keep their items, `null` is empty and
    /// anything else becomes a one-element list.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => SingleOrVec(items),
            Value::Null => SingleOrVec(Vec::new()),
            other => SingleOrVec(vec![other]),
        }
    }
}

impl<T> AsRef<[T]> for SingleOrVec<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<SingleOrVec<T>> for Vec<T> {
    #[inline]
    fn from(wrapper: SingleOrVec<T>) -> Self {
        wrapper.0
    }
}

impl<T> Default for SingleOrVec<T> {
    #[inline]
    fn default() -> Self {
        SingleOrVec(Vec::new())
    }
}

impl<T> IntoIterator for SingleOrVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A primitive as it arrives on the wire: either bare or element-shaped.
///
/// **JSON**: primitive values come through as scalars; their metadata lives in
/// the `_field` sidecar and is merged separately.
///   - `"birthDate": "1970-03-30"` → `Primitive("1970-03-30")`
///
/// **XML**: all primitives are elements with inline metadata, no `_field` exists.
///   - `<birthDate value="1970-03-30"/>` → `Element({"value": "1970-03-30"})`
///   - `<birthDate id="x" value="..."/>` → `Element({"id": "x", "value": "..."})`
///   - `<birthDate id="x"><extension>...</extension></birthDate>` → `Element` without `value`
///
/// A bare primitive is never an object, so the object check is unambiguous.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveOrElement {
    /// A scalar (or `null`) taken directly from JSON.
    Primitive(Value),
    /// An element-shaped object (`value`, `id`, `extension`) with a lexical value.
    Element(Map<String, Value>),
}

impl PrimitiveOrElement {
    /// Classifies a wire value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(object) => PrimitiveOrElement::Element(object),
            other => PrimitiveOrElement::Primitive(other),
        }
    }
}

/// The id and extension metadata of a FHIR primitive.
///
/// In FHIR JSON, primitive values can have associated metadata stored in a parallel
/// `_fieldName` object containing an `id` and/or `extension` array:
///
/// ```json
/// {
///   "status": "active",
///   "_status": {
///     "id": "status-1",
///     "extension": [...]
///   }
/// }
/// ```
///
/// # Type Parameters
/// - `E`: Extension representation (a typed extension, or a raw `serde_json::Value`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdAndExtension<E> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<E>>,
}

impl<E> IdAndExtension<E> {
    /// Returns `true` when neither an id nor any extension is present.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.extension.as_ref().is_none_or(|ext| ext.is_empty())
    }
}

impl<E> Default for IdAndExtension<E> {
    fn default() -> Self {
        Self {
            id: None,
            extension: None,
        }
    }
}

impl IdAndExtension<Value> {
    /// Builds the sidecar object; empty sidecars produce `None`.
    pub fn into_value(self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        let mut object = Map::new();
        if let Some(id) = self.id {
            object.insert("id".to_string(), Value::String(id));
        }
        if let Some(extension) = self.extension.filter(|ext| !ext.is_empty()) {
            object.insert("extension".to_string(), Value::Array(extension));
        }
        Some(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sidecar_key_helpers() {
        assert_eq!(sidecar_key("given"), "_given");
        assert!(is_sidecar_key("_birthDate"));
        assert!(!is_sidecar_key("birthDate"));
        assert_eq!(strip_sidecar_prefix("_birthDate"), "birthDate");
        assert_eq!(strip_sidecar_prefix("birthDate"), "birthDate");
    }

    #[test]
    fn test_single_or_vec_accepts_both_shapes() {
        let single = SingleOrVec::from_value(json!({"family": "Doe"}));
        assert_eq!(single.len(), 1);

        let many = SingleOrVec::from_value(json!(["a", "b", null]));
        assert_eq!(many.into_vec(), vec![json!("a"), json!("b"), Value::Null]);

        assert!(SingleOrVec::from_value(Value::Null).is_empty());
    }

    #[test]
    fn test_primitive_or_element_classification() {
        assert_eq!(
            PrimitiveOrElement::from_value(json!("1970-03-30")),
            PrimitiveOrElement::Primitive(json!("1970-03-30"))
        );
        match PrimitiveOrElement::from_value(json!({"value": "true", "id": "a1"})) {
            PrimitiveOrElement::Element(object) => {
                assert_eq!(object.get("id"), Some(&json!("a1")));
            }
            other => panic!("expected element form, got {:?}", other),
        }
    }

    #[test]
    fn test_id_and_extension_round_trip() {
        let sidecar: IdAndExtension<Value> =
            serde_json::from_value(json!({"id": "x1", "extension": [{"url": "u"}]})).unwrap();
        assert_eq!(sidecar.id.as_deref(), Some("x1"));
        assert_eq!(
            sidecar.into_value(),
            Some(json!({"id": "x1", "extension": [{"url": "u"}]}))
        );

        let empty = IdAndExtension::<Value> {
            id: None,
            extension: Some(Vec::new()),
        };
        assert!(empty.is_empty());
        assert_eq!(empty.into_value(), None);
    }

    #[test]
    fn test_id_and_extension_rejects_unknown_keys() {
        let result: Result<IdAndExtension<Value>, _> =
            serde_json::from_value(json!({"id": "x1", "value": 3}));
        assert!(result.is_err());
    }
}
