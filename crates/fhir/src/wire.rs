//! The wire object model shared by every codec.
//!
//! Each model type is written into (and read back from) a [`WireObject`], an
//! insertion-ordered JSON map that mirrors FHIR JSON: primitives as bare
//! values plus `_field` sidecars, choice fields as type-suffixed keys and
//! contained resources as objects carrying their own `resourceType`. The JSON
//! codec serializes this map directly; the XML codec renders it as elements.
//!
//! Reading is strict: [`WireReader`] hands out keys as fields claim them and
//! [`WireReader::finish`] rejects anything left over, so unknown keys never
//! disappear silently.
//!
//! The XML reader produces a different layout for primitives, one object per
//! element (`{"value": "..", "id": "..", "extension": [..]}`). A reader opened
//! with [`WireShape::Element`] accepts that layout and passes it on to every
//! nested value; a JSON reader rejects it.

use helios_serde_support::{PrimitiveOrElement, SingleOrVec, sidecar_key};
use serde_json::{Map, Value};

use crate::element::Element;
use crate::error::{FhirError, Result};
use crate::primitives::PrimitiveType;

/// An order-preserving JSON object in FHIR JSON shape.
pub type WireObject = Map<String, Value>;

/// A complex FHIR type (data type, backbone element or resource) with a wire form.
pub trait FhirType: Sized {
    /// FHIR type name, used in error messages.
    const TYPE_NAME: &'static str;

    /// Appends this value's wire keys to `out`, omitting empty fields.
    fn write_wire(&self, out: &mut WireObject);

    /// Claims this type's keys from `reader`.
    fn read_wire(reader: &mut WireReader) -> Result<Self>;

    fn to_wire(&self) -> WireObject {
        let mut out = WireObject::new();
        self.write_wire(&mut out);
        out
    }

    fn to_wire_value(&self) -> Value {
        Value::Object(self.to_wire())
    }

    /// Decodes a whole object, failing on any key the type does not declare.
    fn from_wire(object: WireObject) -> Result<Self> {
        Self::decode_wire(WireReader::new(Self::TYPE_NAME, object))
    }

    fn from_wire_value(value: Value) -> Result<Self> {
        decode_nested(WireShape::Json, value)
    }

    /// Decodes an element-shaped object built by the XML reader.
    fn from_element_wire(object: WireObject) -> Result<Self> {
        Self::decode_wire(WireReader::with_shape(Self::TYPE_NAME, object, WireShape::Element))
    }

    /// Runs `read_wire` over a prepared reader and rejects leftover keys.
    fn decode_wire(mut reader: WireReader) -> Result<Self> {
        let value = Self::read_wire(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}

fn decode_nested<T: FhirType>(shape: WireShape, value: Value) -> Result<T> {
    match value {
        Value::Object(object) => T::decode_wire(WireReader::with_shape(T::TYPE_NAME, object, shape)),
        other => Err(FhirError::invalid_value("object", &other)),
    }
}

impl<T: FhirType> FhirType for Box<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn write_wire(&self, out: &mut WireObject) {
        (**self).write_wire(out)
    }

    fn read_wire(reader: &mut WireReader) -> Result<Self> {
        T::read_wire(reader).map(Box::new)
    }
}

/// Layout of primitive elements in the object being decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WireShape {
    /// FHIR JSON: a bare value beside an optional `_field` sidecar object.
    #[default]
    Json,
    /// One object per primitive element, as built by the XML reader.
    Element,
}

/// Hands out the keys of a wire object to the fields that claim them.
#[derive(Debug)]
pub struct WireReader {
    type_name: &'static str,
    object: WireObject,
    shape: WireShape,
}

impl WireReader {
    /// A reader over FHIR JSON.
    pub fn new(type_name: &'static str, object: WireObject) -> Self {
        Self::with_shape(type_name, object, WireShape::Json)
    }

    pub fn with_shape(type_name: &'static str, object: WireObject, shape: WireShape) -> Self {
        Self {
            type_name,
            object,
            shape,
        }
    }

    pub fn shape(&self) -> WireShape {
        self.shape
    }

    /// Name of the type being decoded.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True when `key` is present with a non-null value.
    pub fn contains(&self, key: &str) -> bool {
        self.object.get(key).is_some_and(|value| !value.is_null())
    }

    /// Removes and returns `key`. A `null` value counts as absent.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.object.remove(key).filter(|value| !value.is_null())
    }

    /// Removes and returns everything not yet claimed.
    pub fn take_remaining(&mut self) -> WireObject {
        std::mem::take(&mut self.object)
    }

    /// Claims `resourceType` and checks it against `expected`.
    pub fn expect_resource_type(&mut self, expected: &'static str) -> Result<()> {
        match self.take("resourceType") {
            None => Err(FhirError::MissingResourceType),
            Some(Value::String(found)) if found == expected => Ok(()),
            Some(Value::String(found)) => Err(FhirError::ResourceTypeMismatch { expected, found }),
            Some(other) => Err(FhirError::invalid_value("resource type string", &other)),
        }
    }

    /// Fails on the first unclaimed non-null key.
    pub fn finish(self) -> Result<()> {
        match self.object.iter().find(|(_, value)| !value.is_null()) {
            Some((key, _)) => Err(FhirError::UnknownField {
                type_name: self.type_name,
                field: key.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// A value that occupies one or more keys of its parent's wire object.
///
/// Implementations wrap their own errors with the wire key they read, so a
/// failure deep in a resource reports its full path.
pub trait WireField: Sized {
    fn write_field(&self, name: &str, out: &mut WireObject);

    /// Reads the field; `Ok(None)` when it is absent or empty.
    fn read_field(name: &str, reader: &mut WireReader) -> Result<Option<Self>>;
}

/// Glue between a struct field declaration (always an `Option`) and [`WireField`].
pub trait WireSlot: Sized {
    fn write_slot(&self, name: &str, out: &mut WireObject);
    fn read_slot(name: &str, reader: &mut WireReader) -> Result<Self>;
}

impl<T: WireField> WireSlot for Option<T> {
    fn write_slot(&self, name: &str, out: &mut WireObject) {
        if let Some(value) = self {
            value.write_field(name, out);
        }
    }

    fn read_slot(name: &str, reader: &mut WireReader) -> Result<Self> {
        T::read_field(name, reader)
    }
}

// Primitive elements: `name` + `_name`.

impl<V: PrimitiveType, E: FhirType> WireField for Element<V, E> {
    fn write_field(&self, name: &str, out: &mut WireObject) {
        let (bare, sidecar) = self.split_for_wire();
        if let Some(bare) = bare {
            out.insert(name.to_string(), bare);
        }
        if let Some(sidecar) = sidecar {
            out.insert(sidecar_key(name), sidecar);
        }
    }

    fn read_field(name: &str, reader: &mut WireReader) -> Result<Option<Self>> {
        let bare = reader.take(name);
        let sidecar = reader.take(&sidecar_key(name));
        if bare.is_none() && sidecar.is_none() {
            return Ok(None);
        }
        let element = read_element(reader.shape(), bare, sidecar).map_err(|err| err.within(name))?;
        Ok(Some(element).filter(|element| !element.is_empty()))
    }
}

fn read_element<V: PrimitiveType, E: FhirType>(
    shape: WireShape,
    bare: Option<Value>,
    sidecar: Option<Value>,
) -> Result<Element<V, E>> {
    match bare.map(PrimitiveOrElement::from_value) {
        Some(PrimitiveOrElement::Element(object)) if shape == WireShape::Element => {
            if sidecar.is_some_and(|sidecar| !sidecar.is_null()) {
                return Err(FhirError::InvalidValue {
                    expected: "a bare primitive beside its sidecar",
                    found: "object".to_string(),
                });
            }
            Element::from_element_form(object)
        }
        Some(PrimitiveOrElement::Element(object)) => {
            Err(FhirError::invalid_value(V::TYPE_NAME, &Value::Object(object)))
        }
        Some(PrimitiveOrElement::Primitive(value)) => Element::join_from_wire(Some(value), sidecar),
        None => Element::join_from_wire(None, sidecar),
    }
}

// Repeated primitive elements: `name: [..]` + index-aligned `_name: [..]`.

impl<V: PrimitiveType, E: FhirType> WireField for Vec<Element<V, E>> {
    fn write_field(&self, name: &str, out: &mut WireObject) {
        if self.iter().any(|element| element.value.is_some()) {
            let bare = self
                .iter()
                .map(|element| element.value.as_ref().map_or(Value::Null, PrimitiveType::to_json))
                .collect();
            out.insert(name.to_string(), Value::Array(bare));
        }
        if self.iter().any(Element::has_sidecar) {
            let sidecars = self
                .iter()
                .map(|element| element.split_for_wire().1.unwrap_or(Value::Null))
                .collect();
            out.insert(sidecar_key(name), Value::Array(sidecars));
        }
    }

    fn read_field(name: &str, reader: &mut WireReader) -> Result<Option<Self>> {
        let bare = reader.take(name);
        let sidecar = reader.take(&sidecar_key(name));
        if bare.is_none() && sidecar.is_none() {
            return Ok(None);
        }

        let bare = bare.map(SingleOrVec::from_value).unwrap_or_default().into_vec();
        let sidecars = sidecar.map(SingleOrVec::from_value).unwrap_or_default().into_vec();

        // A sidecar list longer than the value list pads it with annotated nulls.
        let len = bare.len().max(sidecars.len());
        let mut bare = bare.into_iter();
        let mut sidecars = sidecars.into_iter();
        let mut elements = Vec::with_capacity(len);
        for index in 0..len {
            let element = read_element(reader.shape(), bare.next(), sidecars.next())
                .map_err(|err| err.within(format!("[{index}]")).within(name))?;
            elements.push(element);
        }

        if elements.iter().all(Element::is_empty) {
            return Ok(None);
        }
        Ok(Some(elements))
    }
}

// Plain strings: element ids, `Extension.url`, resource ids.

impl WireField for String {
    fn write_field(&self, name: &str, out: &mut WireObject) {
        out.insert(name.to_string(), Value::String(self.clone()));
    }

    fn read_field(name: &str, reader: &mut WireReader) -> Result<Option<Self>> {
        match reader.take(name) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text)),
            // The XML reader hands `<id value="x"/>` over as `{"value": "x"}`.
            Some(Value::Object(mut object))
                if reader.shape() == WireShape::Element && object.len() == 1 =>
            {
                match object.remove("value") {
                Some(Value::String(text)) => Ok(Some(text)),
                _ => Err(FhirError::InvalidValue {
                    expected: "string",
                    found: "object".to_string(),
                }
                .within(name)),
                }
            }
            Some(other) => Err(FhirError::invalid_value("string", &other).within(name)),
        }
    }
}

// Complex values: one object, or a list of objects.

impl<T: FhirType> WireField for T {
    fn write_field(&self, name: &str, out: &mut WireObject) {
        out.insert(name.to_string(), self.to_wire_value());
    }

    fn read_field(name: &str, reader: &mut WireReader) -> Result<Option<Self>> {
        match reader.take(name) {
            None => Ok(None),
            Some(value) => decode_nested(reader.shape(), value)
                .map(Some)
                .map_err(|err| err.within(name)),
        }
    }
}

impl<T: FhirType> WireField for Vec<T> {
    fn write_field(&self, name: &str, out: &mut WireObject) {
        if !self.is_empty() {
            out.insert(
                name.to_string(),
                Value::Array(self.iter().map(FhirType::to_wire_value).collect()),
            );
        }
    }

    fn read_field(name: &str, reader: &mut WireReader) -> Result<Option<Self>> {
        read_complex_list(name, reader)
    }
}

/// Reads a list of complex values, accepting a single object as a one-item list.
pub fn read_complex_list<T: FhirType>(name: &str, reader: &mut WireReader) -> Result<Option<Vec<T>>> {
    let Some(value) = reader.take(name) else {
        return Ok(None);
    };
    let shape = reader.shape();
    let items = SingleOrVec::from_value(value)
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            decode_nested::<T>(shape, item).map_err(|err| err.within(format!("[{index}]")).within(name))
        })
        .collect::<Result<Vec<T>>>()?;
    Ok(Some(items).filter(|items| !items.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> WireObject {
        match value {
            Value::Object(object) => object,
            _ => panic!("fixture is not an object"),
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        text: Option<String>,
    }

    impl FhirType for Note {
        const TYPE_NAME: &'static str = "Note";

        fn write_wire(&self, out: &mut WireObject) {
            self.text.write_slot("text", out);
        }

        fn read_wire(reader: &mut WireReader) -> Result<Self> {
            Ok(Note {
                text: WireSlot::read_slot("text", reader)?,
            })
        }
    }

    type Str = Element<String, Note>;

    #[test]
    fn test_reader_finish_rejects_unclaimed_keys() {
        let mut reader = WireReader::new("Note", object(json!({"text": "a", "bogus": 1, "gone": null})));
        assert!(reader.take("text").is_some());
        let err = reader.finish().unwrap_err();
        assert!(matches!(err, FhirError::UnknownField { field, .. } if field == "bogus"));

        let reader = WireReader::new("Note", object(json!({"ignored": null})));
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_expect_resource_type() {
        let mut reader = WireReader::new("Patient", object(json!({"resourceType": "Patient"})));
        assert!(reader.expect_resource_type("Patient").is_ok());

        let mut reader = WireReader::new("Patient", object(json!({"resourceType": "Observation"})));
        assert!(matches!(
            reader.expect_resource_type("Patient"),
            Err(FhirError::ResourceTypeMismatch { .. })
        ));

        let mut reader = WireReader::new("Patient", WireObject::new());
        assert!(matches!(
            reader.expect_resource_type("Patient"),
            Err(FhirError::MissingResourceType)
        ));
    }

    #[test]
    fn test_repeated_sidecar_alignment() {
        let given = vec![
            Str::new("Ann".to_string()),
            Str::new("Bea".to_string()),
            Str::new("Cy".to_string()).with_id("g3"),
        ];
        let mut out = WireObject::new();
        given.write_field("given", &mut out);
        assert_eq!(
            Value::Object(out.clone()),
            json!({"given": ["Ann", "Bea", "Cy"], "_given": [null, null, {"id": "g3"}]})
        );

        let mut reader = WireReader::new("HumanName", out);
        let decoded = Vec::<Str>::read_field("given", &mut reader).unwrap().unwrap();
        assert_eq!(decoded, given);
        assert_eq!(decoded[2].id.as_deref(), Some("g3"));
        assert!(decoded[..2].iter().all(|element| element.id.is_none()));
    }

    #[test]
    fn test_sidecar_longer_than_values_pads_with_annotated_nulls() {
        let mut reader = WireReader::new(
            "HumanName",
            object(json!({"given": ["Ann"], "_given": [null, {"id": "g2"}]})),
        );
        let decoded = Vec::<Str>::read_field("given", &mut reader).unwrap().unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].value, None);
        assert_eq!(decoded[1].id.as_deref(), Some("g2"));
    }

    #[test]
    fn test_all_empty_repeated_field_is_omitted() {
        let mut out = WireObject::new();
        vec![Str::default(), Str::default()].write_field("given", &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_repeated_error_names_index() {
        let mut reader = WireReader::new("HumanName", object(json!({"given": ["Ann", 7]})));
        let err = Vec::<Str>::read_field("given", &mut reader).unwrap_err();
        assert_eq!(err.path(), Some("given[1]"));
    }

    #[test]
    fn test_single_object_accepted_as_list() {
        let mut reader = WireReader::new("Wrapper", object(json!({"note": {"text": "a"}})));
        let notes = read_complex_list::<Note>("note", &mut reader).unwrap().unwrap();
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_plain_string_accepts_element_form_only_from_xml() {
        let fixture = || object(json!({"id": {"value": "p1"}}));

        let mut reader = WireReader::with_shape("Patient", fixture(), WireShape::Element);
        assert_eq!(String::read_field("id", &mut reader).unwrap().as_deref(), Some("p1"));

        let mut reader = WireReader::new("Patient", fixture());
        assert_eq!(String::read_field("id", &mut reader).unwrap_err().path(), Some("id"));

        let mut reader = WireReader::new("Patient", object(json!({"id": 5})));
        assert_eq!(String::read_field("id", &mut reader).unwrap_err().path(), Some("id"));
    }

    #[test]
    fn test_element_shape_reaches_nested_values() {
        let fixture = || object(json!({"note": [{"text": {"value": "a"}}]}));

        let mut reader = WireReader::with_shape("Wrapper", fixture(), WireShape::Element);
        let notes = read_complex_list::<Note>("note", &mut reader).unwrap().unwrap();
        assert_eq!(notes[0].text.as_deref(), Some("a"));

        let mut reader = WireReader::new("Wrapper", fixture());
        let err = read_complex_list::<Note>("note", &mut reader).unwrap_err();
        assert_eq!(err.path(), Some("note[0].text"));
    }

    #[test]
    fn test_primitive_element_form_rejected_in_json() {
        let mut reader = WireReader::new("Patient", object(json!({"active": {"value": "true"}})));
        let err = Element::<bool, Note>::read_field("active", &mut reader).unwrap_err();
        assert_eq!(err.path(), Some("active"));

        let mut reader = WireReader::with_shape(
            "Patient",
            object(json!({"active": {"value": "true"}})),
            WireShape::Element,
        );
        let active = Element::<bool, Note>::read_field("active", &mut reader).unwrap().unwrap();
        assert_eq!(active.value, Some(true));
    }
}
