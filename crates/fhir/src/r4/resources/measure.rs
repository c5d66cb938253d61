use crate::r4::datatypes::*;
use crate::{AnyResource, fhir_choice, fhir_resource, fhir_type};

fhir_resource! {
    /// A quality measure definition.
    pub struct Measure: "Measure" {
        pub id: Option<std::string::String> = "id",
        pub meta: Option<Meta> = "meta",
        pub implicit_rules: Option<Uri> = "implicitRules",
        pub language: Option<Code> = "language",
        pub text: Option<Narrative> = "text",
        pub contained: Option<Vec<AnyResource>> = "contained",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        /// Canonical identifier for this measure, represented as a URI (globally unique)
        pub url: Option<Uri> = "url",
        pub identifier: Option<Vec<Identifier>> = "identifier",
        pub version: Option<String> = "version",
        pub name: Option<String> = "name",
        pub title: Option<String> = "title",
        pub subtitle: Option<String> = "subtitle",
        /// draft | active | retired | unknown
        pub status: Option<Code> = "status",
        pub experimental: Option<Boolean> = "experimental",
        pub subject: Option<MeasureSubject> = "subject",
        pub date: Option<DateTime> = "date",
        pub publisher: Option<String> = "publisher",
        pub description: Option<Markdown> = "description",
        pub purpose: Option<Markdown> = "purpose",
        pub usage: Option<String> = "usage",
        pub approval_date: Option<Date> = "approvalDate",
        pub last_review_date: Option<Date> = "lastReviewDate",
        pub effective_period: Option<Period> = "effectivePeriod",
        pub library: Option<Vec<Canonical>> = "library",
        pub scoring: Option<CodeableConcept> = "scoring",
        pub composite_scoring: Option<CodeableConcept> = "compositeScoring",
        pub r#type: Option<Vec<CodeableConcept>> = "type",
        pub improvement_notation: Option<CodeableConcept> = "improvementNotation",
        pub definition: Option<Vec<Markdown>> = "definition",
        pub guidance: Option<Markdown> = "guidance",
        pub group: Option<Vec<MeasureGroup>> = "group",
        pub supplemental_data: Option<Vec<MeasureSupplementalData>> = "supplementalData",
    }
}

fhir_choice! {
    /// Choice of types for `Measure.subject[x]`.
    pub enum MeasureSubject {
        CodeableConcept(CodeableConcept) = "CodeableConcept",
        Reference(Reference) = "Reference",
    }
}

fhir_type! {
    /// Population criteria group.
    pub struct MeasureGroup {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub code: Option<CodeableConcept> = "code",
        pub description: Option<String> = "description",
        pub population: Option<Vec<MeasureGroupPopulation>> = "population",
        pub stratifier: Option<Vec<MeasureGroupStratifier>> = "stratifier",
    }
}

fhir_type! {
    /// Population criteria.
    pub struct MeasureGroupPopulation {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        /// initial-population | numerator | numerator-exclusion | denominator | ...
        pub code: Option<CodeableConcept> = "code",
        pub description: Option<String> = "description",
        pub criteria: Option<Expression> = "criteria",
    }
}

fhir_type! {
    /// Stratifier criteria for the measure.
    pub struct MeasureGroupStratifier {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub code: Option<CodeableConcept> = "code",
        pub description: Option<String> = "description",
        pub criteria: Option<Expression> = "criteria",
    }
}

fhir_type! {
    /// What other data should be reported with the measure.
    pub struct MeasureSupplementalData {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub code: Option<CodeableConcept> = "code",
        pub usage: Option<Vec<CodeableConcept>> = "usage",
        pub description: Option<String> = "description",
        pub criteria: Option<Expression> = "criteria",
    }
}
