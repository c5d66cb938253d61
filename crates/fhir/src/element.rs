//! The primitive element: a bare value plus its element id and extensions.

use helios_serde_support::IdAndExtension;
use serde_json::Value;

use crate::error::{FhirError, Result};
use crate::primitives::PrimitiveType;
use crate::wire::{FhirType, WireObject, WireReader, WireShape, read_complex_list};

/// A FHIR primitive element.
///
/// `value` is the bare scalar; `id` and `extension` are the element metadata
/// that JSON carries in the `_field` sidecar. Any combination may be present:
/// an element with metadata but no value is an "annotated null" and still
/// appears on the wire through its sidecar alone.
///
/// `E` is the extension type of the FHIR release.
#[derive(Clone, Debug, PartialEq)]
pub struct Element<V, E> {
    pub id: Option<String>,
    pub extension: Option<Vec<E>>,
    pub value: Option<V>,
}

impl<V, E> Default for Element<V, E> {
    fn default() -> Self {
        Self {
            id: None,
            extension: None,
            value: None,
        }
    }
}

impl<V, E> Element<V, E> {
    /// An element holding only a value.
    pub fn new(value: V) -> Self {
        Self {
            id: None,
            extension: None,
            value: Some(value),
        }
    }

    /// Sets the element id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Appends an extension.
    pub fn with_extension(mut self, extension: E) -> Self {
        self.extension.get_or_insert_with(Vec::new).push(extension);
        self
    }

    /// True when the element carries an id or at least one extension.
    pub fn has_sidecar(&self) -> bool {
        self.id.is_some() || self.extension.as_ref().is_some_and(|ext| !ext.is_empty())
    }

    /// True when there is no value, no id and no extension. Empty elements
    /// are never written.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && !self.has_sidecar()
    }
}

impl<V: PrimitiveType, E: FhirType> Element<V, E> {
    /// Splits the element into its bare wire value and its sidecar object.
    ///
    /// The bare value is present iff `value` is; the sidecar is present iff
    /// the element has an id or extensions.
    pub fn split_for_wire(&self) -> (Option<Value>, Option<Value>) {
        let bare = self.value.as_ref().map(PrimitiveType::to_json);
        let sidecar = IdAndExtension {
            id: self.id.clone(),
            extension: self
                .extension
                .as_ref()
                .map(|ext| ext.iter().map(FhirType::to_wire_value).collect()),
        }
        .into_value();
        (bare, sidecar)
    }

    /// Rebuilds an element from its bare wire value and sidecar object.
    ///
    /// Both parts are optional; `null` counts as absent. The sidecar must be
    /// an object. An empty extension list decodes as `None`.
    pub fn join_from_wire(bare: Option<Value>, sidecar: Option<Value>) -> Result<Self> {
        let value = match bare.filter(|v| !v.is_null()) {
            Some(bare) => Some(V::from_json(&bare)?),
            None => None,
        };

        let mut element = Self {
            value,
            ..Self::default()
        };

        if let Some(sidecar) = sidecar.filter(|v| !v.is_null()) {
            if !sidecar.is_object() {
                return Err(FhirError::invalid_value("sidecar object", &sidecar));
            }
            let meta: IdAndExtension<Value> = serde_json::from_value(sidecar)?;
            element.id = meta.id;
            if let Some(items) = meta.extension.filter(|items| !items.is_empty()) {
                element.extension = Some(
                    decode_extensions::<E>(items).map_err(|err| err.within("extension"))?,
                );
            }
        }
        Ok(element)
    }

    /// Decodes the element-shaped form `{ "value": "..", "id": "..", "extension": [..] }`
    /// produced by the XML reader. String values are parsed from their lexical form.
    pub fn from_element_form(object: WireObject) -> Result<Self> {
        let mut reader = WireReader::with_shape(V::TYPE_NAME, object, WireShape::Element);

        let value = match reader.take("value") {
            Some(Value::String(text)) => {
                Some(V::from_lexical(&text).map_err(|err| err.within("value"))?)
            }
            Some(other) => Some(V::from_json(&other).map_err(|err| err.within("value"))?),
            None => None,
        };
        let id = match reader.take("id") {
            Some(Value::String(id)) => Some(id),
            Some(other) => {
                return Err(FhirError::invalid_value("string", &other).within("id"));
            }
            None => None,
        };
        let extension = read_complex_list::<E>("extension", &mut reader)?;
        reader.finish()?;

        Ok(Self {
            id,
            extension,
            value,
        })
    }
}

fn decode_extensions<E: FhirType>(items: Vec<Value>) -> Result<Vec<E>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| E::from_wire_value(item).map_err(|err| err.within(format!("[{index}]"))))
        .collect()
}

impl<V, E> From<V> for Element<V, E> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

impl<E> From<&str> for Element<String, E> {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}
