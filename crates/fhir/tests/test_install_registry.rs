//! Replacing the process-wide registry. Lives in its own test binary because
//! the registry can only be installed once per process.

use helios_fhir::r4::{Observation, Patient};
use helios_fhir::{
    AnyResource, FhirError, RegistryError, ResourceRegistry, install_registry, registry,
};

#[test]
fn test_installed_registry_governs_contained_resources() {
    let mut custom = ResourceRegistry::new();
    custom.register::<Patient>().register::<Observation>();
    install_registry(custom).unwrap();

    assert_eq!(registry().resource_types(), vec!["Observation", "Patient"]);
    assert_eq!(
        install_registry(ResourceRegistry::with_r4()),
        Err(RegistryError::AlreadyInstalled)
    );

    let patient: AnyResource =
        serde_json::from_str(r#"{"resourceType": "Patient", "id": "p1"}"#).unwrap();
    assert!(patient.is::<Patient>());

    let bundle = serde_json::json!({"resourceType": "Bundle"});
    let serde_json::Value::Object(object) = bundle else {
        unreachable!()
    };
    let err = registry().decode(object).unwrap_err();
    assert!(matches!(err, FhirError::UnknownResourceType(tag) if tag == "Bundle"));
}
