//! # helios-fhir
//!
//! The FHIR resource data model.
//!
//! Resources and data types are plain Rust structs whose fields are all
//! optional. Three shapes recur across the whole catalogue and are
//! implemented once here:
//!
//! - **Primitive elements** ([`Element`]): a bare value plus an element `id`
//!   and extensions, carried in JSON by the `_field` sidecar.
//! - **Choice fields** ([`ChoiceType`]): closed enums such as
//!   `Observation.value[x]`, written as one type-suffixed key and rejected on
//!   decode when more than one key is populated.
//! - **Any-resource fields** ([`AnyResource`]): `contained` and bundle entries,
//!   resolved through the [`registry`] by `resourceType`.
//!
//! Every type converts to and from a [`WireObject`](wire::WireObject), the
//! FHIR JSON object shape. The `helios-serde` crate renders wire objects as
//! JSON, NDJSON or XML.
//!
//! ```ignore
//! use helios_fhir::r4::{Patient, HumanName};
//!
//! let patient: Patient = serde_json::from_str(r#"{
//!     "resourceType": "Patient",
//!     "birthDate": "1974-12",
//!     "_birthDate": {"id": "bd"}
//! }"#)?;
//! assert_eq!(patient.birth_date.unwrap().id.as_deref(), Some("bd"));
//! ```
//!
//! ## Features
//!
//! - `R4` (default): the R4 catalogue in [`r4`].

#![cfg_attr(docsrs, feature(doc_cfg))]

mod macros;

pub mod choice;
pub mod element;
pub mod error;
pub mod primitives;
pub mod registry;
pub mod resource;
pub mod serde_helpers;
pub mod wire;

#[cfg(feature = "R4")]
#[cfg_attr(docsrs, doc(cfg(feature = "R4")))]
pub mod r4;

pub use choice::ChoiceType;
pub use element::Element;
pub use error::{FhirError, Result};
pub use primitives::{
    PrecisionDate, PrecisionDateTime, PrecisionInstant, PrecisionTime, PrimitiveType,
};
pub use registry::{RegistryError, ResourceRegistry, install_registry, registry};
pub use resource::{AnyResource, FhirResource, ResourceType};
pub use wire::{FhirType, WireField, WireObject, WireShape};

/// Re-exports used by the declaration macros.
#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
    pub use tracing;
}
