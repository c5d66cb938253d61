//! XML serialization by walking the wire object.
//!
//! The model renders itself into the same order-preserving wire object used
//! for JSON; this module maps that object onto FHIR XML. A primitive field and
//! its `_field` sidecar are merged into one element carrying `id` and `value`
//! attributes plus nested `extension` children.

use std::io::Write;

use helios_fhir::{FhirType, WireObject};
use helios_serde_support::{is_sidecar_key, sidecar_key, strip_sidecar_prefix};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use serde_json::Value;

use crate::error::{Result, SerdeError};
use crate::format::FormatOptions;
use crate::xml::utils;

/// Serialize a FHIR resource to an XML string.
///
/// # Examples
///
/// ```ignore
/// use helios_serde::xml::to_xml_string;
/// use helios_fhir::r4::Patient;
///
/// let patient = Patient::default();
/// let xml = to_xml_string(&patient)?;
/// ```
pub fn to_xml_string<T: FhirType>(value: &T) -> Result<String> {
    to_xml_string_with(value, FormatOptions::default())
}

/// Serialize a FHIR resource to an XML string with explicit options.
pub fn to_xml_string_with<T: FhirType>(value: &T, options: FormatOptions) -> Result<String> {
    let mut buffer = Vec::new();
    to_xml_writer_with(value, &mut buffer, options)?;
    String::from_utf8(buffer).map_err(|e| SerdeError::Custom(e.to_string()))
}

/// Serialize a FHIR resource to an XML byte vector.
pub fn to_xml_vec<T: FhirType>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(value, &mut buffer)?;
    Ok(buffer)
}

/// Serialize a FHIR resource to an XML writer.
pub fn to_xml_writer<T: FhirType, W: Write>(value: &T, writer: W) -> Result<()> {
    to_xml_writer_with(value, writer, FormatOptions::default())
}

/// Serialize a FHIR resource to an XML writer with explicit options.
pub fn to_xml_writer_with<T: FhirType, W: Write>(
    value: &T,
    writer: W,
    options: FormatOptions,
) -> Result<()> {
    let writer = if options.pretty {
        Writer::new_with_indent(writer, b' ', 2)
    } else {
        Writer::new(writer)
    };
    let mut serializer = XmlSerializer { writer };
    if options.xml_declaration {
        serializer
            .writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }
    serializer.write_resource(&value.to_wire())
}

struct XmlSerializer<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlSerializer<W> {
    /// Writes `<Type xmlns="http://hl7.org/fhir">..</Type>`.
    fn write_resource(&mut self, object: &WireObject) -> Result<()> {
        let resource_type = object
            .get("resourceType")
            .and_then(Value::as_str)
            .ok_or_else(|| SerdeError::Structure("resource without resourceType".to_string()))?;

        let mut start = BytesStart::new(resource_type);
        start.push_attribute(("xmlns", utils::FHIR_NAMESPACE));
        self.writer.write_event(Event::Start(start))?;
        self.write_members(object, resource_type, true)?;
        self.writer.write_event(Event::End(BytesEnd::new(resource_type)))?;
        Ok(())
    }

    /// Writes every member of `object` as child elements, in wire order.
    fn write_members(&mut self, object: &WireObject, element: &str, resource: bool) -> Result<()> {
        for (key, value) in object {
            if key == "resourceType" || is_attribute_member(key, element, resource) {
                continue;
            }
            if is_sidecar_key(key) {
                // Merged into the element of its value unless the value is absent.
                let base = strip_sidecar_prefix(key);
                if !object.contains_key(base) {
                    self.write_field(base, &Value::Null, Some(value))?;
                }
                continue;
            }
            self.write_field(key, value, object.get(&sidecar_key(key)))?;
        }
        Ok(())
    }

    /// Writes one field, repeating the element for every list item.
    fn write_field(&mut self, name: &str, value: &Value, sidecar: Option<&Value>) -> Result<()> {
        let values = as_list(value);
        let sidecars = sidecar.map(as_list).unwrap_or_default();
        for index in 0..values.len().max(sidecars.len()) {
            let value = values.get(index).copied().unwrap_or(&Value::Null);
            self.write_single(name, value, sidecars.get(index).copied())?;
        }
        Ok(())
    }

    fn write_single(&mut self, name: &str, value: &Value, sidecar: Option<&Value>) -> Result<()> {
        match value {
            Value::Object(object) if object.contains_key("resourceType") => {
                self.writer.write_event(Event::Start(BytesStart::new(name)))?;
                self.write_resource(object)?;
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
                Ok(())
            }
            Value::Object(object) => self.write_complex(name, object),
            Value::String(xhtml) if utils::is_div_element(name) => self.write_div(xhtml),
            Value::Array(_) => Err(SerdeError::Structure(format!(
                "nested list in field `{name}`"
            ))),
            primitive => self.write_primitive(name, primitive, sidecar),
        }
    }

    fn write_complex(&mut self, name: &str, object: &WireObject) -> Result<()> {
        let mut start = BytesStart::new(name);
        if let Some(Value::String(id)) = object.get("id") {
            start.push_attribute(("id", id.as_str()));
        }
        if utils::is_extension_element(name) {
            if let Some(Value::String(url)) = object.get("url") {
                start.push_attribute(("url", url.as_str()));
            }
        }

        let has_children = object
            .keys()
            .any(|key| !is_attribute_member(key, name, false));
        if !has_children {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(start))?;
        self.write_members(object, name, false)?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// `<name id=".." value="..">` with sidecar extensions as children.
    fn write_primitive(&mut self, name: &str, value: &Value, sidecar: Option<&Value>) -> Result<()> {
        let sidecar = sidecar.and_then(Value::as_object);
        let extension = sidecar.and_then(|sidecar| sidecar.get("extension"));

        let mut start = BytesStart::new(name);
        if let Some(Value::String(id)) = sidecar.and_then(|sidecar| sidecar.get("id")) {
            start.push_attribute(("id", id.as_str()));
        }
        if let Some(text) = primitive_text(value) {
            start.push_attribute(("value", text.as_str()));
        }

        match extension {
            Some(extension) => {
                self.writer.write_event(Event::Start(start))?;
                self.write_field("extension", extension, None)?;
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            None => {
                self.writer.write_event(Event::Empty(start))?;
            }
        }
        Ok(())
    }

    /// Copies the narrative XHTML through as markup.
    ///
    /// The markup is mixed content, so it bypasses the indenting writer and is
    /// reproduced byte for byte; only the line break before `<div>` is added.
    fn write_div(&mut self, xhtml: &str) -> Result<()> {
        let mut reader = Reader::from_str(xhtml);
        reader.config_mut().trim_text(false);
        self.writer.write_indent()?;
        let mut raw = Writer::new(self.writer.get_mut());
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(event) => raw.write_event(event)?,
                Err(e) => {
                    return Err(SerdeError::Custom(format!(
                        "Failed to parse XHTML div content: {e}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Members carried as XML attributes rather than child elements.
fn is_attribute_member(key: &str, element: &str, resource: bool) -> bool {
    !resource && (key == "id" || (key == "url" && utils::is_extension_element(element)))
}

fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn primitive_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(utils::bool_to_string(*b).to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
