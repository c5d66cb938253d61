//! Wire format selection and format-dispatched encode/decode.

use std::fmt;

use helios_fhir::{AnyResource, FhirType};

use crate::error::{Result, SerdeError};
use crate::{json, ndjson};

/// Supported FHIR content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FhirFormat {
    /// JSON format (application/fhir+json)
    Json,
    /// XML format (application/fhir+xml)
    Xml,
    /// NDJSON format (application/fhir+ndjson) - for bulk operations
    NdJson,
}

impl FhirFormat {
    /// Returns the MIME type string for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            FhirFormat::Json => "application/fhir+json",
            FhirFormat::Xml => "application/fhir+xml",
            FhirFormat::NdJson => "application/fhir+ndjson",
        }
    }

    /// Parses a `_format` value or a media type into a FhirFormat.
    ///
    /// Accepts the short `_format` forms (`json`, `xml`, `ndjson`) and media
    /// types with or without parameters (`application/fhir+json; fhirVersion=4.0`).
    pub fn parse(media_type: &str) -> Option<Self> {
        let ct = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match ct.as_str() {
            "json" => return Some(FhirFormat::Json),
            "xml" => return Some(FhirFormat::Xml),
            "ndjson" => return Some(FhirFormat::NdJson),
            _ => {}
        }

        if ct.contains("fhir+ndjson") || ct.contains("application/ndjson") {
            Some(FhirFormat::NdJson)
        } else if ct.contains("fhir+json") || ct.contains("application/json") {
            Some(FhirFormat::Json)
        } else if ct.contains("fhir+xml") || ct.contains("application/xml") || ct == "text/xml" {
            Some(FhirFormat::Xml)
        } else {
            None
        }
    }

    /// Picks the format from a `_format` parameter, then an Accept header,
    /// defaulting to JSON.
    pub fn negotiate(format_param: Option<&str>, accept: Option<&str>) -> Self {
        format_param
            .and_then(Self::parse)
            .or_else(|| accept.and_then(|accept| accept.split(',').find_map(Self::parse)))
            .unwrap_or(FhirFormat::Json)
    }
}

impl fmt::Display for FhirFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Output options shared by the encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Indent the output.
    pub pretty: bool,
    /// Start XML documents with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub xml_declaration: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            xml_declaration: true,
        }
    }
}

impl FormatOptions {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn xml_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }
}

/// Encodes a resource in the given format.
///
/// NDJSON writes the resource as a single line.
pub fn encode<T: FhirType>(value: &T, format: FhirFormat, options: FormatOptions) -> Result<Vec<u8>> {
    match format {
        FhirFormat::Json if options.pretty => Ok(json::to_json_string_pretty(value)?.into_bytes()),
        FhirFormat::Json => json::to_json_vec(value),
        FhirFormat::NdJson => {
            let mut line = json::to_json_vec(value)?;
            line.push(b'\n');
            Ok(line)
        }
        #[cfg(feature = "xml")]
        FhirFormat::Xml => Ok(crate::xml::to_xml_string_with(value, options)?.into_bytes()),
        #[cfg(not(feature = "xml"))]
        FhirFormat::Xml => Err(xml_disabled()),
    }
}

/// Decodes a single resource of any registered type.
///
/// NDJSON input must hold exactly one resource.
pub fn decode(bytes: &[u8], format: FhirFormat) -> Result<AnyResource> {
    match format {
        FhirFormat::Json => json::from_json_slice(bytes),
        FhirFormat::NdJson => {
            let text = std::str::from_utf8(bytes).map_err(|e| SerdeError::Custom(e.to_string()))?;
            let mut resources = ndjson::from_ndjson_str(text)?;
            match resources.len() {
                1 => Ok(resources.remove(0)),
                n => Err(SerdeError::Structure(format!(
                    "expected one NDJSON resource, found {n}"
                ))),
            }
        }
        #[cfg(feature = "xml")]
        FhirFormat::Xml => crate::xml::from_xml_slice(bytes),
        #[cfg(not(feature = "xml"))]
        FhirFormat::Xml => Err(xml_disabled()),
    }
}

#[cfg(not(feature = "xml"))]
fn xml_disabled() -> SerdeError {
    SerdeError::Custom("XML support requires the `xml` feature".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_media_forms() {
        assert_eq!(FhirFormat::parse("json"), Some(FhirFormat::Json));
        assert_eq!(FhirFormat::parse("XML"), Some(FhirFormat::Xml));
        assert_eq!(FhirFormat::parse("ndjson"), Some(FhirFormat::NdJson));
        assert_eq!(
            FhirFormat::parse("application/fhir+json; fhirVersion=4.0"),
            Some(FhirFormat::Json)
        );
        assert_eq!(FhirFormat::parse("application/fhir+xml"), Some(FhirFormat::Xml));
        assert_eq!(FhirFormat::parse("application/fhir+ndjson"), Some(FhirFormat::NdJson));
        assert_eq!(FhirFormat::parse("application/ndjson"), Some(FhirFormat::NdJson));
        assert_eq!(FhirFormat::parse("text/html"), None);
    }

    #[test]
    fn test_negotiate_precedence() {
        assert_eq!(
            FhirFormat::negotiate(Some("xml"), Some("application/fhir+json")),
            FhirFormat::Xml
        );
        assert_eq!(
            FhirFormat::negotiate(Some("bogus"), Some("text/html, application/fhir+xml")),
            FhirFormat::Xml
        );
        assert_eq!(FhirFormat::negotiate(None, None), FhirFormat::Json);
    }

    #[test]
    fn test_mime_type_display() {
        assert_eq!(FhirFormat::NdJson.to_string(), "application/fhir+ndjson");
    }

    #[test]
    fn test_options_builder() {
        let options = FormatOptions::default().pretty(true).xml_declaration(false);
        assert!(options.pretty);
        assert!(!options.xml_declaration);
    }
}
