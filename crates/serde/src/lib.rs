//! # Helios FHIR Serialization
//!
//! Codecs for FHIR resources built on the model's wire object.
//!
//! - **JSON**: thin wrappers around `serde_json`.
//! - **NDJSON**: one resource per line, for bulk data.
//! - **XML** (feature `xml`): element and attribute mapping over `quick-xml`.
//! - **Formats**: [`FhirFormat`] parses content types and `_format` values and
//!   drives [`encode`] / [`decode`].
//!
//! Decoding failures keep the model's [`FhirError`](helios_fhir::FhirError)
//! intact inside [`SerdeError::Fhir`], including the field path.
//!
//! ## Examples
//!
//! ```ignore
//! use helios_serde::{decode, encode, FhirFormat, FormatOptions};
//! use helios_fhir::r4::Patient;
//!
//! let bytes = encode(&Patient::default(), FhirFormat::Json, FormatOptions::default())?;
//! let resource = decode(&bytes, FhirFormat::Json)?;
//! assert_eq!(resource.resource_type(), "Patient");
//! ```

pub mod error;
pub mod format;
pub mod json;
pub mod ndjson;

#[cfg(feature = "xml")]
pub mod xml;

pub use error::{Result, SerdeError};
pub use format::{FhirFormat, FormatOptions, decode, encode};

pub use json::{
    from_json_slice, from_json_str, from_json_value, to_json_string, to_json_string_pretty,
    to_json_value, to_json_vec, to_json_writer,
};
pub use ndjson::{from_ndjson_reader, from_ndjson_str, to_ndjson_string, to_ndjson_writer};

#[cfg(feature = "xml")]
pub use xml::{from_xml_slice, from_xml_str, to_xml_string, to_xml_vec};
