use crate::r4::datatypes::*;
use crate::{AnyResource, fhir_choice, fhir_resource};

fhir_resource! {
    /// Information about an individual or animal receiving health care services.
    pub struct Patient: "Patient" {
        pub id: Option<std::string::String> = "id",
        pub meta: Option<Meta> = "meta",
        pub implicit_rules: Option<Uri> = "implicitRules",
        pub language: Option<Code> = "language",
        pub text: Option<Narrative> = "text",
        pub contained: Option<Vec<AnyResource>> = "contained",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub identifier: Option<Vec<Identifier>> = "identifier",
        /// Whether this patient's record is in active use
        pub active: Option<Boolean> = "active",
        pub name: Option<Vec<HumanName>> = "name",
        pub telecom: Option<Vec<ContactPoint>> = "telecom",
        /// male | female | other | unknown
        pub gender: Option<Code> = "gender",
        pub birth_date: Option<Date> = "birthDate",
        pub deceased: Option<PatientDeceased> = "deceased",
        pub multiple_birth: Option<PatientMultipleBirth> = "multipleBirth",
        pub general_practitioner: Option<Vec<Reference>> = "generalPractitioner",
        pub managing_organization: Option<Reference> = "managingOrganization",
    }
}

fhir_choice! {
    /// Choice of types for `Patient.deceased[x]`.
    pub enum PatientDeceased {
        Boolean(Boolean) = "Boolean",
        DateTime(DateTime) = "DateTime",
    }
}

fhir_choice! {
    /// Choice of types for `Patient.multipleBirth[x]`.
    pub enum PatientMultipleBirth {
        Boolean(Boolean) = "Boolean",
        Integer(Integer) = "Integer",
    }
}
