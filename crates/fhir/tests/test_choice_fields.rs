use helios_fhir::r4::{
    Annotation, AnnotationAuthor, Extension, ExtensionValue, Measure, MeasureSubject, Observation,
    ObservationEffective, ObservationValue, Patient, PatientDeceased, PatientMultipleBirth,
    Period, Reference,
};
use helios_fhir::{Element, FhirError, FhirType, PrecisionDate, PrecisionDateTime};
use serde_json::{Value, json};

fn object(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(object) => object,
        other => panic!("expected object, got {other}"),
    }
}

fn date_time(text: &str) -> PrecisionDateTime {
    PrecisionDateTime::parse(text).unwrap()
}

#[test]
fn test_date_choice_with_element_id_round_trips() {
    let extension = Extension::new(
        "http://example.org/when",
        ExtensionValue::Date(Element::new(PrecisionDate::parse("2020-01-01").unwrap()).with_id("x1")),
    );

    let wire = serde_json::to_value(&extension).unwrap();
    assert_eq!(
        wire,
        json!({
            "url": "http://example.org/when",
            "valueDate": "2020-01-01",
            "_valueDate": {"id": "x1"}
        })
    );
    assert!(wire.get("valuePeriod").is_none());

    let back: Extension = serde_json::from_value(wire).unwrap();
    assert_eq!(back, extension);
    match back.value {
        Some(ExtensionValue::Date(date)) => assert_eq!(date.id.as_deref(), Some("x1")),
        other => panic!("expected a Date value, got {other:?}"),
    }
}

#[test]
fn test_date_and_period_together_are_rejected() {
    let wire = json!({
        "url": "http://example.org/when",
        "valueDate": "2020-01-01",
        "valuePeriod": {"start": "2020-01-01"}
    });
    let err = Extension::from_wire_value(wire).unwrap_err();
    match err {
        FhirError::MultipleChoiceValues {
            type_name,
            field,
            keys,
        } => {
            assert_eq!(type_name, "Extension");
            assert_eq!(field, "value");
            assert_eq!(keys, vec!["valueDate", "valuePeriod"]);
        }
        other => panic!("expected MultipleChoiceValues, got {other:?}"),
    }
}

#[test]
fn test_no_branch_yields_absent_field() {
    let observation = Observation::from_wire(object(json!({
        "resourceType": "Observation",
        "status": "final"
    })))
    .unwrap();
    assert_eq!(observation.value, None);
    assert_eq!(observation.effective, None);
}

#[test]
fn test_sidecar_only_branch_counts_against_exclusivity() {
    let err = Patient::from_wire(object(json!({
        "resourceType": "Patient",
        "_deceasedBoolean": {"extension": [{"url": "http://example.org/unknown"}]},
        "deceasedDateTime": "2020-02-02"
    })))
    .unwrap_err();
    assert!(matches!(err, FhirError::MultipleChoiceValues { .. }));

    let patient = Patient::from_wire(object(json!({
        "resourceType": "Patient",
        "_deceasedBoolean": {"extension": [{"url": "http://example.org/unknown"}]}
    })))
    .unwrap();
    match patient.deceased {
        Some(PatientDeceased::Boolean(flag)) => {
            assert_eq!(flag.value, None);
            assert_eq!(flag.extension.map(|ext| ext.len()), Some(1));
        }
        other => panic!("expected annotated null boolean, got {other:?}"),
    }
}

#[test]
fn test_each_choice_emits_exactly_one_key() {
    let patient = Patient {
        deceased: Some(PatientDeceased::DateTime(Element::new(date_time(
            "2021-03-04T05:06:07Z",
        )))),
        multiple_birth: Some(PatientMultipleBirth::Integer(Element::new(2))),
        ..Patient::default()
    };
    let wire = patient.to_wire();
    let keys: Vec<&str> = wire.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["resourceType", "deceasedDateTime", "multipleBirthInteger"]
    );
}

#[test]
fn test_complex_variants() {
    let observation = Observation {
        effective: Some(ObservationEffective::Period(Period {
            start: Some(Element::new(date_time("2020-01-01"))),
            ..Period::default()
        })),
        value: Some(ObservationValue::String(Element::new("positive".to_string()))),
        note: Some(vec![Annotation {
            author: Some(AnnotationAuthor::Reference(Reference::to("Practitioner/1"))),
            ..Annotation::default()
        }]),
        ..Observation::default()
    };
    let wire = serde_json::to_value(&observation).unwrap();
    assert_eq!(wire["effectivePeriod"], json!({"start": "2020-01-01"}));
    assert_eq!(wire["valueString"], json!("positive"));
    assert_eq!(
        wire["note"],
        json!([{"authorReference": {"reference": "Practitioner/1"}}])
    );

    let back: Observation = serde_json::from_value(wire).unwrap();
    assert_eq!(back, observation);
}

#[test]
fn test_measure_subject_rejects_two_branches() {
    let err = serde_json::from_value::<Measure>(json!({
        "resourceType": "Measure",
        "subjectCodeableConcept": {"text": "Patient"},
        "subjectReference": {"reference": "Group/1"}
    }))
    .unwrap_err();
    assert!(err.to_string().contains("subject[x]"));

    let measure: Measure = serde_json::from_value(json!({
        "resourceType": "Measure",
        "subjectReference": {"reference": "Group/1"}
    }))
    .unwrap();
    assert!(matches!(measure.subject, Some(MeasureSubject::Reference(_))));
}

#[test]
fn test_undeclared_suffix_is_unknown_field() {
    let err = Observation::from_wire(object(json!({
        "resourceType": "Observation",
        "valueAttachment": {"url": "http://example.org"}
    })))
    .unwrap_err();
    assert!(
        matches!(err, FhirError::UnknownField { type_name: "Observation", ref field } if field == "valueAttachment")
    );
}
