//! Error types for FHIR serialization and deserialization.

use helios_fhir::FhirError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerdeError {
    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed input that does not decode into the model
    #[error(transparent)]
    Fhir(#[from] FhirError),

    /// Malformed XML
    #[cfg(feature = "xml")]
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error during serialization/deserialization
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An XML element outside the FHIR namespace.
    #[error("element <{element}> is in namespace {found}, expected http://hl7.org/fhir")]
    Namespace { element: String, found: String },

    /// An XML attribute FHIR does not allow on this element.
    #[error("unexpected attribute `{attribute}` on <{element}>")]
    UnexpectedAttribute { element: String, attribute: String },

    /// Character data where FHIR XML only allows elements.
    #[error("unexpected text {text:?} in <{element}>")]
    UnexpectedText { element: String, text: String },

    /// A document whose element structure is not a FHIR resource.
    #[error("invalid document structure: {0}")]
    Structure(String),

    /// A failure on one line of an NDJSON stream.
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<SerdeError>,
    },

    /// Custom error message
    #[error("{0}")]
    Custom(String),
}

impl SerdeError {
    /// The model error behind this failure, if any.
    pub fn as_fhir(&self) -> Option<&FhirError> {
        match self {
            SerdeError::Fhir(err) => Some(err),
            SerdeError::Line { source, .. } => source.as_fhir(),
            _ => None,
        }
    }
}

impl From<String> for SerdeError {
    fn from(msg: String) -> Self {
        SerdeError::Custom(msg)
    }
}

impl From<&str> for SerdeError {
    fn from(msg: &str) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}

/// Result type alias for FHIR serialization operations
pub type Result<T> = std::result::Result<T, SerdeError>;
