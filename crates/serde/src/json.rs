//! JSON serialization wrapper functions for FHIR resources.
//!
//! Input is parsed by `serde_json` into a value first and then decoded by the
//! model, so a malformed document fails with [`SerdeError::Json`] while a
//! well-formed document that is not valid FHIR fails with
//! [`SerdeError::Fhir`] naming the offending field path.
use helios_fhir::FhirType;
use serde_json::Value;

use crate::error::{Result, SerdeError};

/// Deserialize a FHIR resource from a JSON string.
///
/// # Examples
///
/// ```ignore
/// use helios_serde::json::from_json_str;
/// use helios_fhir::r4::Patient;
///
/// let json = r#"{"resourceType": "Patient", "id": "example"}"#;
/// let patient: Patient = from_json_str(json)?;
/// ```
pub fn from_json_str<T: FhirType>(s: &str) -> Result<T> {
    from_json_value(serde_json::from_str(s)?)
}

/// Deserialize a FHIR resource from a JSON byte slice.
pub fn from_json_slice<T: FhirType>(v: &[u8]) -> Result<T> {
    from_json_value(serde_json::from_slice(v)?)
}

/// Deserialize a FHIR resource from a `serde_json::Value`.
///
/// # Examples
///
/// ```ignore
/// use helios_serde::json::from_json_value;
/// use helios_fhir::r4::Patient;
/// use serde_json::json;
///
/// let json_value = json!({"resourceType": "Patient", "id": "example"});
/// let patient: Patient = from_json_value(json_value)?;
/// ```
pub fn from_json_value<T: FhirType>(value: Value) -> Result<T> {
    T::from_wire_value(value).map_err(SerdeError::from)
}

/// Serialize a FHIR resource to a JSON string.
///
/// # Examples
///
/// ```ignore
/// use helios_serde::json::to_json_string;
/// use helios_fhir::r4::Patient;
///
/// let patient = Patient::default();
/// let json = to_json_string(&patient)?;
/// ```
pub fn to_json_string<T: FhirType>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(&value.to_wire())?)
}

/// Serialize a FHIR resource to a pretty-printed JSON string.
pub fn to_json_string_pretty<T: FhirType>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(&value.to_wire())?)
}

/// Serialize a FHIR resource to a JSON byte vector.
pub fn to_json_vec<T: FhirType>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&value.to_wire())?)
}

/// Serialize a FHIR resource to a `serde_json::Value`.
pub fn to_json_value<T: FhirType>(value: &T) -> Value {
    value.to_wire_value()
}

/// Serialize a FHIR resource as JSON into `writer`.
pub fn to_json_writer<T: FhirType, W: std::io::Write>(value: &T, writer: W) -> Result<()> {
    Ok(serde_json::to_writer(writer, &value.to_wire())?)
}
