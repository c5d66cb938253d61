//! serde and `Display` plumbing for declared model types.
//!
//! Every model type goes through its [`WireObject`](crate::wire::WireObject)
//! form, so any serde format sees exactly the FHIR JSON shape and decoding
//! runs the same strict reader as [`FhirType::from_wire`].

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::wire::FhirType;

/// Serializes a model value as its wire object.
pub fn serialize_wire<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: FhirType,
    S: Serializer,
{
    value.to_wire().serialize(serializer)
}

/// Deserializes a model value from its wire object.
pub fn deserialize_wire<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FhirType,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    T::from_wire_value(value).map_err(D::Error::custom)
}

/// Writes the pretty JSON dump used by `Display`.
///
/// The dump is diagnostic only, so a serialization failure is logged and
/// replaced by `<unserializable {Type}>` rather than returned.
pub fn write_debug_dump<T: FhirType>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match serde_json::to_string_pretty(&value.to_wire()) {
        Ok(text) => f.write_str(&text),
        Err(err) => {
            tracing::warn!(type_name = T::TYPE_NAME, error = %err, "debug dump fell back");
            write!(f, "<unserializable {}>", T::TYPE_NAME)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::element::Element;

    crate::fhir_type! {
        struct Tag {
            code: Option<Element<String, Tag>> = "code",
        }
    }

    #[test]
    fn test_serde_goes_through_wire_form() {
        let tag = Tag {
            code: Some(Element::new("a".to_string()).with_id("c1")),
        };
        let text = serde_json::to_string(&tag).unwrap();
        assert_eq!(text, r#"{"code":"a","_code":{"id":"c1"}}"#);

        let back: Tag = serde_json::from_str(&text).unwrap();
        assert_eq!(back, tag);
    }

    #[test]
    fn test_deserialize_reports_model_errors() {
        let err = serde_json::from_str::<Tag>(r#"{"code":"a","other":1}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `other` in Tag"));
    }

    #[test]
    fn test_display_is_pretty_json() {
        let tag = Tag {
            code: Some(Element::new("a".to_string())),
        };
        assert_eq!(tag.to_string(), "{\n  \"code\": \"a\"\n}");
    }
}
