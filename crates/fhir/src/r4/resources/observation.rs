use crate::r4::datatypes::*;
use crate::{AnyResource, fhir_choice, fhir_resource, fhir_type};

fhir_resource! {
    /// Measurements and simple assertions made about a patient, device or other subject.
    pub struct Observation: "Observation" {
        pub id: Option<std::string::String> = "id",
        pub meta: Option<Meta> = "meta",
        pub implicit_rules: Option<Uri> = "implicitRules",
        pub language: Option<Code> = "language",
        pub text: Option<Narrative> = "text",
        pub contained: Option<Vec<AnyResource>> = "contained",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub identifier: Option<Vec<Identifier>> = "identifier",
        pub based_on: Option<Vec<Reference>> = "basedOn",
        pub part_of: Option<Vec<Reference>> = "partOf",
        /// registered | preliminary | final | amended +
        pub status: Option<Code> = "status",
        pub category: Option<Vec<CodeableConcept>> = "category",
        pub code: Option<CodeableConcept> = "code",
        pub subject: Option<Reference> = "subject",
        pub focus: Option<Vec<Reference>> = "focus",
        pub encounter: Option<Reference> = "encounter",
        /// Clinically relevant time/time-period for observation
        pub effective: Option<ObservationEffective> = "effective",
        pub issued: Option<Instant> = "issued",
        pub performer: Option<Vec<Reference>> = "performer",
        pub value: Option<ObservationValue> = "value",
        pub data_absent_reason: Option<CodeableConcept> = "dataAbsentReason",
        pub interpretation: Option<Vec<CodeableConcept>> = "interpretation",
        pub note: Option<Vec<Annotation>> = "note",
        pub body_site: Option<CodeableConcept> = "bodySite",
        pub method: Option<CodeableConcept> = "method",
        pub specimen: Option<Reference> = "specimen",
        pub device: Option<Reference> = "device",
        pub reference_range: Option<Vec<ObservationReferenceRange>> = "referenceRange",
        pub has_member: Option<Vec<Reference>> = "hasMember",
        pub derived_from: Option<Vec<Reference>> = "derivedFrom",
        pub component: Option<Vec<ObservationComponent>> = "component",
    }
}

fhir_choice! {
    /// Choice of types for `Observation.effective[x]`.
    pub enum ObservationEffective {
        DateTime(DateTime) = "DateTime",
        Period(Period) = "Period",
        Instant(Instant) = "Instant",
    }
}

fhir_choice! {
    /// Choice of types for `Observation.value[x]` and `Observation.component.value[x]`.
    pub enum ObservationValue {
        Quantity(Quantity) = "Quantity",
        CodeableConcept(CodeableConcept) = "CodeableConcept",
        String(String) = "String",
        Boolean(Boolean) = "Boolean",
        Integer(Integer) = "Integer",
        Range(Range) = "Range",
        Time(Time) = "Time",
        DateTime(DateTime) = "DateTime",
        Period(Period) = "Period",
    }
}

fhir_type! {
    /// Provides guide for interpretation.
    pub struct ObservationReferenceRange {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub low: Option<Quantity> = "low",
        pub high: Option<Quantity> = "high",
        pub r#type: Option<CodeableConcept> = "type",
        pub applies_to: Option<Vec<CodeableConcept>> = "appliesTo",
        pub age: Option<Range> = "age",
        pub text: Option<String> = "text",
    }
}

fhir_type! {
    /// Component results.
    pub struct ObservationComponent {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub code: Option<CodeableConcept> = "code",
        pub value: Option<ObservationValue> = "value",
        pub data_absent_reason: Option<CodeableConcept> = "dataAbsentReason",
        pub interpretation: Option<Vec<CodeableConcept>> = "interpretation",
        pub reference_range: Option<Vec<ObservationReferenceRange>> = "referenceRange",
    }
}
