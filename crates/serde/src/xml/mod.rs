//! FHIR XML encoding and decoding.
//!
//! Both directions go through the same wire object the JSON codec uses, so the
//! model's field order, choice handling and sidecar rules apply unchanged.
//!
//! ## FHIR JSON ↔ XML Mapping
//!
//! | JSON Pattern | XML Pattern |
//! |--------------|-------------|
//! | `{"active": true}` | `<active value="true"/>` |
//! | `{"birthDate": "1974-12-25", "_birthDate": {"id": "123"}}` | `<birthDate id="123" value="1974-12-25"/>` |
//! | `{"given": ["John", "Doe"]}` | `<given value="John"/><given value="Doe"/>` |
//! | `{"given": ["A", null], "_given": [null, {"id": "123"}]}` | `<given value="A"/><given id="123"/>` |
//! | `{"extension": [{"url": "u", "valueCode": "x"}]}` | `<extension url="u"><valueCode value="x"/></extension>` |
//! | `{"contained": [{"resourceType": "Patient"}]}` | `<contained><Patient xmlns="http://hl7.org/fhir"/></contained>` |
//!
//! ## Special Attributes
//!
//! - **`value`**: the primitive value of an element
//! - **`id`**: element identifier (from `_field` in JSON for primitives)
//! - **`url`**: the extension URL, only on `extension` and `modifierExtension`
//!
//! Anything else, text content, or an element outside `http://hl7.org/fhir`
//! (other than the XHTML narrative `<div>`) is rejected while decoding.
//!
//! ## Examples
//!
//! ```ignore
//! use helios_serde::xml::{to_xml_string, from_xml_str};
//! use helios_fhir::r4::Patient;
//!
//! let patient = Patient {
//!     id: Some("example".to_string()),
//!     active: Some(true.into()),
//!     ..Default::default()
//! };
//! let xml = to_xml_string(&patient)?;
//! let patient: Patient = from_xml_str(&xml)?;
//! ```

pub mod de;
pub mod ser;
pub mod utils;

pub use de::{from_xml_reader, from_xml_slice, from_xml_str};
pub use ser::{to_xml_string, to_xml_string_with, to_xml_vec, to_xml_writer, to_xml_writer_with};
pub use utils::{FHIR_NAMESPACE, XHTML_NAMESPACE};
