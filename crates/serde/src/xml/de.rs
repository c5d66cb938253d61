//! XML deserialization into the wire object the model decodes.
//!
//! The reader walks the document once and rebuilds an element-shaped wire
//! object: attributes become members (`value`, `id`, `url`), child elements
//! become members named after the element, and repeated children collapse into
//! lists. The model decodes that shape with [`WireShape::Element`], so
//! cardinality and primitive typing are resolved there rather than here.
//!
//! [`WireShape::Element`]: helios_fhir::WireShape::Element

use std::io::BufRead;

use helios_fhir::{FhirType, WireObject};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};
use serde_json::Value;
use serde_json::map::Entry;

use crate::error::{Result, SerdeError};
use crate::xml::utils;

/// Deserialize a FHIR resource from an XML string.
///
/// # Examples
///
/// ```ignore
/// use helios_serde::xml::from_xml_str;
/// use helios_fhir::r4::Patient;
///
/// let xml = r#"<?xml version="1.0"?>
/// <Patient xmlns="http://hl7.org/fhir">
///   <id value="example"/>
/// </Patient>"#;
/// let patient: Patient = from_xml_str(xml)?;
/// ```
pub fn from_xml_str<T: FhirType>(xml: &str) -> Result<T> {
    // Whitespace is kept so that narrative markup survives; `next` skips it
    // between elements.
    let reader = NsReader::from_str(xml);
    let object = XmlDeserializer { reader }.read_document()?;
    T::from_element_wire(object).map_err(SerdeError::from)
}

/// Deserialize a FHIR resource from XML bytes.
pub fn from_xml_slice<T: FhirType>(xml: &[u8]) -> Result<T> {
    let xml_str = std::str::from_utf8(xml)
        .map_err(|e| SerdeError::Custom(format!("Invalid UTF-8: {}", e)))?;
    from_xml_str(xml_str)
}

/// Deserialize a FHIR resource from an XML reader.
pub fn from_xml_reader<R: BufRead, T: FhirType>(mut reader: R) -> Result<T> {
    let mut xml = String::new();
    reader.read_to_string(&mut xml)?;
    from_xml_str(&xml)
}

/// What the reader found next inside an element.
enum Next<'i> {
    Element { start: BytesStart<'i>, empty: bool },
    Div { start: BytesStart<'i>, empty: bool },
    End,
    Eof,
}

struct XmlDeserializer<'i> {
    reader: NsReader<&'i [u8]>,
}

impl<'i> XmlDeserializer<'i> {
    /// Reads the root resource element.
    fn read_document(&mut self) -> Result<WireObject> {
        let (start, empty) = match self.next("document")? {
            Next::Element { start, empty } => (start, empty),
            Next::Div { .. } | Next::End | Next::Eof => {
                return Err(SerdeError::Structure("no root element".to_string()));
            }
        };
        let name = element_name(&start);
        if !utils::is_resource_name(&name) {
            return Err(SerdeError::Structure(format!(
                "root element <{name}> is not a resource"
            )));
        }

        let resource = self.read_resource(&start, &name, empty)?;
        match self.next("document")? {
            Next::Eof => Ok(resource),
            _ => Err(SerdeError::Structure(
                "content after the root element".to_string(),
            )),
        }
    }

    /// Reads `<Type xmlns=..>..</Type>` into an object tagged with `resourceType`.
    fn read_resource(&mut self, start: &BytesStart<'i>, name: &str, empty: bool) -> Result<WireObject> {
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| SerdeError::Custom(e.to_string()))?;
            if !utils::is_namespace_declaration(attribute.key.as_ref()) {
                return Err(unexpected_attribute(name, attribute.key.as_ref()));
            }
        }

        let mut object = WireObject::new();
        object.insert("resourceType".to_string(), Value::String(name.to_string()));
        if !empty {
            self.read_children(name, &mut object)?;
        }
        Ok(object)
    }

    /// Reads a non-resource element into its wire value.
    fn read_element(&mut self, start: &BytesStart<'i>, name: &str, empty: bool) -> Result<Value> {
        let mut object = WireObject::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| SerdeError::Custom(e.to_string()))?;
            let key = attribute.key.as_ref();
            if utils::is_namespace_declaration(key) {
                continue;
            }
            let allowed = matches!(key, b"value" | b"id")
                || (key == b"url" && utils::is_extension_element(name));
            if !allowed {
                return Err(unexpected_attribute(name, key));
            }
            let value = attribute
                .unescape_value()
                .map_err(|e| SerdeError::Custom(e.to_string()))?;
            object.insert(
                String::from_utf8_lossy(key).into_owned(),
                Value::String(value.into_owned()),
            );
        }
        if empty {
            return Ok(Value::Object(object));
        }

        // A wrapper around a single resource (`contained`, `entry.resource`).
        match self.next(name)? {
            Next::Element { start: child, empty } if utils::is_resource_name(&element_name(&child)) => {
                if !object.is_empty() {
                    return Err(SerdeError::Structure(format!(
                        "<{name}> wraps a resource and cannot carry attributes"
                    )));
                }
                let child_name = element_name(&child);
                let resource = self.read_resource(&child, &child_name, empty)?;
                match self.next(name)? {
                    Next::End => Ok(Value::Object(resource)),
                    _ => Err(SerdeError::Structure(format!(
                        "<{name}> must contain exactly one resource"
                    ))),
                }
            }
            first => {
                if self.read_child(name, first, &mut object)? {
                    self.read_children(name, &mut object)?;
                }
                Ok(Value::Object(object))
            }
        }
    }

    /// Reads child elements up to the parent's end tag.
    fn read_children(&mut self, parent: &str, object: &mut WireObject) -> Result<()> {
        loop {
            let next = self.next(parent)?;
            if !self.read_child(parent, next, object)? {
                return Ok(());
            }
        }
    }

    /// Merges one child into `object`. Returns `false` at the parent's end tag.
    fn read_child(&mut self, parent: &str, next: Next<'i>, object: &mut WireObject) -> Result<bool> {
        let (name, value) = match next {
            Next::End => return Ok(false),
            Next::Eof => {
                return Err(SerdeError::Structure(format!(
                    "unexpected end of document inside <{parent}>"
                )));
            }
            Next::Element { start, empty } => {
                let name = element_name(&start);
                if utils::is_resource_name(&name) {
                    return Err(SerdeError::Structure(format!(
                        "resource <{name}> must be the only child of <{parent}>"
                    )));
                }
                let value = self.read_element(&start, &name, empty)?;
                (name, value)
            }
            Next::Div { start, empty } => {
                let value = Value::String(self.read_div(start, empty)?);
                ("div".to_string(), value)
            }
        };

        match object.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if !existing.is_array() {
                    let first = existing.take();
                    *existing = Value::Array(vec![first]);
                }
                if let Value::Array(items) = existing {
                    items.push(value);
                }
            }
        }
        Ok(true)
    }

    /// Captures the narrative `<div>` as markup, the way it travels in JSON.
    fn read_div(&mut self, start: BytesStart<'i>, empty: bool) -> Result<String> {
        let mut result = Vec::new();
        let mut writer = Writer::new(&mut result);

        if empty {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            let mut depth = 1;
            while depth > 0 {
                let (_, event) = self.reader.read_resolved_event()?;
                match &event {
                    Event::Start(_) => depth += 1,
                    Event::End(_) => depth -= 1,
                    Event::Eof => {
                        return Err(SerdeError::Structure(
                            "unexpected end of document inside <div>".to_string(),
                        ));
                    }
                    _ => {}
                }
                writer.write_event(event)?;
            }
        }

        String::from_utf8(result)
            .map_err(|e| SerdeError::Custom(format!("Invalid UTF-8 in XML: {}", e)))
    }

    /// Advances to the next element boundary, checking namespaces and text.
    fn next(&mut self, parent: &str) -> Result<Next<'i>> {
        loop {
            let (namespace, event) = self.reader.read_resolved_event()?;
            let namespace = match namespace {
                ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
                ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
            };

            let (start, empty) = match event {
                Event::Start(start) => (start, false),
                Event::Empty(start) => (start, true),
                Event::End(_) => return Ok(Next::End),
                Event::Eof => return Ok(Next::Eof),
                Event::Text(text) => {
                    let text = String::from_utf8_lossy(&text).trim().to_string();
                    if text.is_empty() {
                        continue;
                    }
                    return Err(unexpected_text(parent, text));
                }
                Event::CData(text) => {
                    return Err(unexpected_text(
                        parent,
                        String::from_utf8_lossy(&text).into_owned(),
                    ));
                }
                Event::GeneralRef(reference) => {
                    return Err(unexpected_text(
                        parent,
                        format!("&{};", String::from_utf8_lossy(&reference)),
                    ));
                }
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => continue,
            };

            let name = element_name(&start);
            match namespace.as_deref() {
                Some(utils::FHIR_NAMESPACE) => return Ok(Next::Element { start, empty }),
                Some(utils::XHTML_NAMESPACE) if utils::is_div_element(&name) => {
                    return Ok(Next::Div { start, empty });
                }
                found => {
                    tracing::debug!(element = %name, namespace = ?found, "rejecting element outside the FHIR namespace");
                    return Err(SerdeError::Namespace {
                        element: name,
                        found: found.unwrap_or("(none)").to_string(),
                    });
                }
            }
        }
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn unexpected_attribute(element: &str, attribute: &[u8]) -> SerdeError {
    SerdeError::UnexpectedAttribute {
        element: element.to_string(),
        attribute: String::from_utf8_lossy(attribute).into_owned(),
    }
}

fn unexpected_text(element: &str, text: String) -> SerdeError {
    SerdeError::UnexpectedText {
        element: element.to_string(),
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(xml: &str) -> Result<WireObject> {
        let reader = NsReader::from_str(xml);
        XmlDeserializer { reader }.read_document()
    }

    #[test]
    fn test_builds_element_shaped_wire_object() {
        let object = wire(
            r#"<Patient xmlns="http://hl7.org/fhir">
                 <id value="p1"/>
                 <name><given value="A"/><given id="g1"/></name>
               </Patient>"#,
        )
        .unwrap();
        assert_eq!(
            Value::Object(object),
            json!({
                "resourceType": "Patient",
                "id": {"value": "p1"},
                "name": {"given": [{"value": "A"}, {"id": "g1"}]}
            })
        );
    }

    #[test]
    fn test_wrapped_resource_becomes_the_member() {
        let object = wire(
            r#"<Patient xmlns="http://hl7.org/fhir">
                 <contained><Patient xmlns="http://hl7.org/fhir"><id value="c1"/></Patient></contained>
               </Patient>"#,
        )
        .unwrap();
        assert_eq!(
            object["contained"],
            json!({"resourceType": "Patient", "id": {"value": "c1"}})
        );
    }

    #[test]
    fn test_div_is_captured_as_markup() {
        let object = wire(
            r#"<Patient xmlns="http://hl7.org/fhir"><text><status value="generated"/><div xmlns="http://www.w3.org/1999/xhtml"><p>Hello <b>there</b></p></div></text></Patient>"#,
        )
        .unwrap();
        assert_eq!(
            object["text"]["div"],
            json!(r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>Hello <b>there</b></p></div>"#)
        );
    }

    #[test]
    fn test_missing_namespace_is_rejected() {
        let err = wire(r#"<Patient><id value="p1"/></Patient>"#).unwrap_err();
        assert!(matches!(err, SerdeError::Namespace { ref element, ref found } if element == "Patient" && found == "(none)"));
    }

    #[test]
    fn test_foreign_child_namespace_is_rejected() {
        let err = wire(
            r#"<Patient xmlns="http://hl7.org/fhir"><x:active xmlns:x="urn:other" value="true"/></Patient>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SerdeError::Namespace { ref element, .. } if element == "active"));
    }

    #[test]
    fn test_unexpected_attribute_is_rejected() {
        let err = wire(r#"<Patient xmlns="http://hl7.org/fhir"><active value="true" foo="1"/></Patient>"#)
            .unwrap_err();
        assert!(matches!(err, SerdeError::UnexpectedAttribute { ref attribute, .. } if attribute == "foo"));

        let err = wire(r#"<Patient xmlns="http://hl7.org/fhir"><gender url="x" value="male"/></Patient>"#)
            .unwrap_err();
        assert!(matches!(err, SerdeError::UnexpectedAttribute { ref attribute, .. } if attribute == "url"));

        let err = wire(r#"<Patient xmlns="http://hl7.org/fhir" id="p1"/>"#).unwrap_err();
        assert!(matches!(err, SerdeError::UnexpectedAttribute { ref element, .. } if element == "Patient"));
    }

    #[test]
    fn test_text_content_is_rejected() {
        let err = wire(r#"<Patient xmlns="http://hl7.org/fhir"><active>true</active></Patient>"#)
            .unwrap_err();
        assert!(matches!(err, SerdeError::UnexpectedText { ref element, ref text } if element == "active" && text == "true"));
    }

    #[test]
    fn test_root_must_be_a_resource() {
        let err = wire(r#"<active xmlns="http://hl7.org/fhir" value="true"/>"#).unwrap_err();
        assert!(matches!(err, SerdeError::Structure(_)));
    }
}
