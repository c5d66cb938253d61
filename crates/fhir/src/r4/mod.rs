//! FHIR R4 (4.0.1) data types and resources.
//!
//! Primitive types are aliases of [`Element`](crate::Element) over their
//! value type (`Date = Element<PrecisionDate, Extension>`); complex types,
//! backbone elements and resources are declared with the catalogue macros.

mod datatypes;
mod resources;

pub use datatypes::*;
pub use resources::*;

use crate::registry::ResourceRegistry;

/// FHIR version implemented by this module.
pub const FHIR_VERSION: &str = "4.0.1";

impl ResourceRegistry {
    /// A registry holding every R4 resource in this crate.
    pub fn with_r4() -> Self {
        let mut registry = Self::new();
        registry
            .register::<Appointment>()
            .register::<Bundle>()
            .register::<Measure>()
            .register::<Observation>()
            .register::<Patient>()
            .register::<SearchParameter>()
            .register::<TestReport>();
        registry
    }
}
