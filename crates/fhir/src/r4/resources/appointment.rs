use crate::r4::datatypes::*;
use crate::{AnyResource, fhir_resource, fhir_type};

fhir_resource! {
    /// A booking of a healthcare event among patient(s), practitioner(s), related person(s)
    /// and/or device(s) for a specific date/time.
    pub struct Appointment: "Appointment" {
        pub id: Option<std::string::String> = "id",
        pub meta: Option<Meta> = "meta",
        pub implicit_rules: Option<Uri> = "implicitRules",
        pub language: Option<Code> = "language",
        pub text: Option<Narrative> = "text",
        pub contained: Option<Vec<AnyResource>> = "contained",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub identifier: Option<Vec<Identifier>> = "identifier",
        /// proposed | pending | booked | arrived | fulfilled | cancelled | noshow |
        /// entered-in-error | checked-in | waitlist
        pub status: Option<Code> = "status",
        pub cancelation_reason: Option<CodeableConcept> = "cancelationReason",
        pub service_category: Option<Vec<CodeableConcept>> = "serviceCategory",
        pub service_type: Option<Vec<CodeableConcept>> = "serviceType",
        pub specialty: Option<Vec<CodeableConcept>> = "specialty",
        pub appointment_type: Option<CodeableConcept> = "appointmentType",
        pub reason_code: Option<Vec<CodeableConcept>> = "reasonCode",
        pub reason_reference: Option<Vec<Reference>> = "reasonReference",
        pub priority: Option<UnsignedInt> = "priority",
        pub description: Option<String> = "description",
        pub supporting_information: Option<Vec<Reference>> = "supportingInformation",
        pub start: Option<Instant> = "start",
        pub end: Option<Instant> = "end",
        pub minutes_duration: Option<PositiveInt> = "minutesDuration",
        pub slot: Option<Vec<Reference>> = "slot",
        pub created: Option<DateTime> = "created",
        pub comment: Option<String> = "comment",
        pub patient_instruction: Option<String> = "patientInstruction",
        pub based_on: Option<Vec<Reference>> = "basedOn",
        pub participant: Option<Vec<AppointmentParticipant>> = "participant",
        pub requested_period: Option<Vec<Period>> = "requestedPeriod",
    }
}

fhir_type! {
    /// Participants involved in appointment.
    pub struct AppointmentParticipant {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub r#type: Option<Vec<CodeableConcept>> = "type",
        pub actor: Option<Reference> = "actor",
        /// required | optional | information-only
        pub required: Option<Code> = "required",
        /// accepted | declined | tentative | needs-action
        pub status: Option<Code> = "status",
        pub period: Option<Period> = "period",
    }
}
