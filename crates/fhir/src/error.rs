//! Error types for decoding FHIR wire objects into the typed model.
//!
//! Every decode failure aborts the enclosing resource: there is no partial
//! result. Nested failures are wrapped in [`FhirError::At`] so the message
//! names the field path (`contained[0].valueQuantity.value`).

use serde_json::Value;
use thiserror::Error;

/// The error type for all model decode operations.
#[derive(Error, Debug)]
pub enum FhirError {
    /// More than one branch of a choice field is populated.
    #[error(
        "multiple values for choice field `{field}[x]` of {type_name}: {}",
        .keys.join(", ")
    )]
    MultipleChoiceValues {
        type_name: &'static str,
        field: String,
        keys: Vec<String>,
    },

    /// A `resourceType` that no registered resource claims.
    #[error("unknown resource type `{0}`")]
    UnknownResourceType(String),

    /// A resource object without a `resourceType` key.
    #[error("missing `resourceType`")]
    MissingResourceType,

    /// A concrete resource decoder was handed another resource type.
    #[error("expected resource type `{expected}`, found `{found}`")]
    ResourceTypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// A wire key that the target type does not declare.
    #[error("unknown field `{field}` in {type_name}")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    /// The wire value has the wrong JSON shape.
    #[error("expected {expected}, found {found}")]
    InvalidValue {
        expected: &'static str,
        found: String,
    },

    /// A primitive whose lexical form does not parse.
    #[error("invalid {type_name} value `{text}`")]
    InvalidPrimitive {
        type_name: &'static str,
        text: String,
    },

    /// A failure below a named field.
    #[error("at `{path}`: {source}")]
    At {
        path: String,
        #[source]
        source: Box<FhirError>,
    },

    /// Malformed JSON or sidecar shape reported by `serde_json`.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FhirError {
    /// Builds an [`FhirError::InvalidValue`] describing the offending wire value.
    pub fn invalid_value(expected: &'static str, found: &Value) -> Self {
        FhirError::InvalidValue {
            expected,
            found: describe(found),
        }
    }

    /// Builds an [`FhirError::InvalidPrimitive`].
    pub fn invalid_primitive(type_name: &'static str, text: impl Into<String>) -> Self {
        FhirError::InvalidPrimitive {
            type_name,
            text: text.into(),
        }
    }

    /// Prefixes the error path with a field name or `[index]` segment.
    pub fn within(self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        match self {
            FhirError::At { path, source } => {
                let path = if path.starts_with('[') {
                    format!("{segment}{path}")
                } else {
                    format!("{segment}.{path}")
                };
                FhirError::At { path, source }
            }
            other => FhirError::At {
                path: segment,
                source: Box::new(other),
            },
        }
    }

    /// The field path of a nested failure, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            FhirError::At { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The innermost cause with any path wrapping removed.
    pub fn root(&self) -> &FhirError {
        match self {
            FhirError::At { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Short human description of a wire value for error messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, FhirError>;
