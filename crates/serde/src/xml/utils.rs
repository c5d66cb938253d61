//! Names and namespaces shared by the XML reader and writer.

/// FHIR namespace URI.
///
/// Every FHIR element lives in this namespace; the writer declares it on each
/// resource element.
pub const FHIR_NAMESPACE: &str = "http://hl7.org/fhir";

/// XHTML namespace URI, used by the narrative `<div>`.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Checks if an element name represents a FHIR resource.
///
/// FHIR resources are identified by having an uppercase first letter.
pub fn is_resource_name(name: &str) -> bool {
    name.chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

/// Checks if an element name is the special XHTML div element.
pub fn is_div_element(name: &str) -> bool {
    name == "div"
}

/// Extension elements carry their `url` as an attribute.
pub fn is_extension_element(name: &str) -> bool {
    name == "extension" || name == "modifierExtension"
}

/// Namespace declarations (`xmlns`, `xmlns:x`) are allowed on any element.
pub fn is_namespace_declaration(attribute: &[u8]) -> bool {
    attribute == b"xmlns" || attribute.starts_with(b"xmlns:")
}

/// Converts a Rust boolean to its string representation for XML.
pub fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}
