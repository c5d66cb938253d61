use helios_fhir::r4::{Extension, ExtensionValue, HumanName, Patient, SearchParameter};
use helios_fhir::{Element, FhirError, FhirType, PrecisionDate};
use serde_json::{Value, json};

fn given(values: &[Option<&str>]) -> Vec<helios_fhir::r4::String> {
    values
        .iter()
        .map(|value| Element {
            value: value.map(str::to_string),
            ..Element::default()
        })
        .collect()
}

#[test]
fn test_annotated_null_emits_only_sidecar() {
    let patient = Patient {
        birth_date: Some(Element {
            extension: Some(vec![Extension::new(
                "http://hl7.org/fhir/StructureDefinition/data-absent-reason",
                ExtensionValue::Code(Element::new("unknown".to_string())),
            )]),
            ..Element::default()
        }),
        ..Patient::default()
    };

    let wire = serde_json::to_value(&patient).unwrap();
    assert!(wire.get("birthDate").is_none());
    assert_eq!(
        wire["_birthDate"],
        json!({"extension": [{
            "url": "http://hl7.org/fhir/StructureDefinition/data-absent-reason",
            "valueCode": "unknown"
        }]})
    );

    let back: Patient = serde_json::from_value(wire).unwrap();
    assert_eq!(back, patient);
}

#[test]
fn test_empty_primitive_is_never_written() {
    let patient = Patient {
        active: Some(Element::default()),
        gender: Some(Element {
            extension: Some(Vec::new()),
            ..Element::default()
        }),
        ..Patient::default()
    };
    let wire = patient.to_wire();
    assert_eq!(Value::Object(wire), json!({"resourceType": "Patient"}));
}

#[test]
fn test_single_sidecar_in_repeated_field_is_aligned() {
    let mut names = given(&[Some("Ann"), Some("Bea"), Some("Cy"), Some("Dee")]);
    names[2].id = Some("g3".to_string());
    let name = HumanName {
        given: Some(names.clone()),
        ..HumanName::default()
    };

    let wire = serde_json::to_value(&name).unwrap();
    assert_eq!(wire["given"], json!(["Ann", "Bea", "Cy", "Dee"]));
    assert_eq!(wire["_given"], json!([null, null, {"id": "g3"}, null]));

    let back: HumanName = serde_json::from_value(wire).unwrap();
    let decoded = back.given.unwrap();
    assert_eq!(decoded, names);
    for (index, element) in decoded.iter().enumerate() {
        assert_eq!(element.id.is_some(), index == 2);
    }
}

#[test]
fn test_short_sidecar_array_is_accepted() {
    let name: HumanName = serde_json::from_value(json!({
        "given": ["Ann", "Bea", "Cy"],
        "_given": [null, {"id": "g2"}]
    }))
    .unwrap();
    let given = name.given.unwrap();
    assert_eq!(given.len(), 3);
    assert_eq!(given[1].id.as_deref(), Some("g2"));
    assert_eq!(given[2].value.as_deref(), Some("Cy"));
}

#[test]
fn test_annotated_null_in_the_middle_of_a_list() {
    let wire = json!({
        "given": ["Ann", null, "Cy"],
        "_given": [null, {"extension": [{"url": "http://example.org/masked"}]}, null]
    });
    let name: HumanName = serde_json::from_value(wire.clone()).unwrap();
    let given = name.given.as_ref().unwrap();
    assert_eq!(given[1].value, None);
    assert!(given[1].extension.is_some());

    assert_eq!(serde_json::to_value(&name).unwrap(), wire);
}

#[test]
fn test_sidecars_only_list_pads_values() {
    let parameter: SearchParameter = serde_json::from_value(json!({
        "resourceType": "SearchParameter",
        "_base": [{"id": "b1"}, {"id": "b2"}]
    }))
    .unwrap();
    let base = parameter.base.unwrap();
    assert_eq!(base.len(), 2);
    assert!(base.iter().all(|code| code.value.is_none()));
    assert_eq!(base[1].id.as_deref(), Some("b2"));
}

#[test]
fn test_sidecar_shape_is_checked() {
    let err = Patient::from_wire_value(json!({
        "resourceType": "Patient",
        "birthDate": "1970",
        "_birthDate": {"id": "bd", "value": "1970"}
    }))
    .unwrap_err();
    assert_eq!(err.path(), Some("birthDate"));
    assert!(matches!(err.root(), FhirError::Json(_)));
}

#[test]
fn test_primitive_type_is_checked() {
    let err = Patient::from_wire_value(json!({
        "resourceType": "Patient",
        "birthDate": "1970-02-31"
    }))
    .unwrap_err();
    assert_eq!(err.path(), Some("birthDate"));
    assert!(matches!(err.root(), FhirError::InvalidPrimitive { type_name: "date", .. }));

    let err = Patient::from_wire_value(json!({"resourceType": "Patient", "active": "yes"})).unwrap_err();
    assert!(matches!(err.root(), FhirError::InvalidValue { expected: "boolean", .. }));
}

fn element_shaped_patient() -> Value {
    json!({
        "resourceType": "Patient",
        "id": {"value": "p1"},
        "active": {"value": "true"},
        "birthDate": {"id": "bd", "value": "1974-12"},
        "name": {"given": [{"value": "Ann"}, {"id": "g2"}]}
    })
}

#[test]
fn test_element_shaped_primitives() {
    let Value::Object(object) = element_shaped_patient() else {
        unreachable!()
    };
    let patient = Patient::from_element_wire(object).unwrap();
    assert_eq!(patient.id.as_deref(), Some("p1"));
    assert_eq!(patient.active.and_then(|active| active.value), Some(true));

    let birth_date = patient.birth_date.unwrap();
    assert_eq!(birth_date.value, Some(PrecisionDate::YearMonth(1974, 12)));
    assert_eq!(birth_date.id.as_deref(), Some("bd"));

    let given = patient.name.unwrap().remove(0).given.unwrap();
    assert_eq!(given[0].value.as_deref(), Some("Ann"));
    assert_eq!(given[1].id.as_deref(), Some("g2"));
}

#[test]
fn test_json_rejects_element_shaped_primitives() {
    assert!(Patient::from_wire_value(element_shaped_patient()).is_err());

    let err = Patient::from_wire_value(json!({
        "resourceType": "Patient",
        "active": {"value": "true"}
    }))
    .unwrap_err();
    assert_eq!(err.path(), Some("active"));
    assert!(matches!(err.root(), FhirError::InvalidValue { expected: "boolean", .. }));

    let err = Patient::from_wire_value(json!({"resourceType": "Patient", "id": {"value": "p1"}}))
        .unwrap_err();
    assert_eq!(err.path(), Some("id"));

    let err = Patient::from_wire_value(json!({
        "resourceType": "Patient",
        "name": [{"given": [{"value": "Ann"}]}]
    }))
    .unwrap_err();
    assert_eq!(err.path(), Some("name[0].given[0]"));
}

#[test]
fn test_json_sidecar_must_be_an_object() {
    let err = Patient::from_wire_value(json!({"resourceType": "Patient", "_active": ["x1"]}))
        .unwrap_err();
    assert_eq!(err.path(), Some("active"));
    assert!(matches!(
        err.root(),
        FhirError::InvalidValue { expected: "sidecar object", .. }
    ));

    let err = Patient::from_wire_value(json!({
        "resourceType": "Patient",
        "active": true,
        "_active": "x1"
    }))
    .unwrap_err();
    assert!(matches!(
        err.root(),
        FhirError::InvalidValue { expected: "sidecar object", .. }
    ));

    let err = Patient::from_wire_value(json!({
        "resourceType": "Patient",
        "name": [{"given": ["Ann"], "_given": ["g1"]}]
    }))
    .unwrap_err();
    assert_eq!(err.path(), Some("name[0].given[0]"));
}

#[test]
fn test_null_means_absent() {
    let patient: Patient = serde_json::from_value(json!({
        "resourceType": "Patient",
        "active": null,
        "_active": null,
        "name": null
    }))
    .unwrap();
    assert_eq!(patient, Patient::default());
}
