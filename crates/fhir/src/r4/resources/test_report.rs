use crate::r4::datatypes::*;
use crate::{AnyResource, fhir_resource, fhir_type};

fhir_resource! {
    /// Describes the results of a TestScript execution.
    pub struct TestReport: "TestReport" {
        pub id: Option<std::string::String> = "id",
        pub meta: Option<Meta> = "meta",
        pub implicit_rules: Option<Uri> = "implicitRules",
        pub language: Option<Code> = "language",
        pub text: Option<Narrative> = "text",
        pub contained: Option<Vec<AnyResource>> = "contained",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub identifier: Option<Identifier> = "identifier",
        pub name: Option<String> = "name",
        /// completed | in-progress | waiting | stopped | entered-in-error
        pub status: Option<Code> = "status",
        pub test_script: Option<Reference> = "testScript",
        /// pass | fail | pending
        pub result: Option<Code> = "result",
        pub score: Option<Decimal> = "score",
        pub tester: Option<String> = "tester",
        pub issued: Option<DateTime> = "issued",
        pub participant: Option<Vec<TestReportParticipant>> = "participant",
        pub setup: Option<TestReportSetup> = "setup",
        pub test: Option<Vec<TestReportTest>> = "test",
        pub teardown: Option<TestReportTeardown> = "teardown",
    }
}

fhir_type! {
    /// A participant in the test execution, either the execution engine, a client, or a server.
    pub struct TestReportParticipant {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        /// test-engine | client | server
        pub r#type: Option<Code> = "type",
        pub uri: Option<Uri> = "uri",
        pub display: Option<String> = "display",
    }
}

fhir_type! {
    /// The results of the series of required setup operations before the tests were executed.
    pub struct TestReportSetup {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub action: Option<Vec<TestReportSetupAction>> = "action",
    }
}

fhir_type! {
    /// A setup operation or assert that was executed. Also used for `TestReport.test.action`.
    pub struct TestReportSetupAction {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub operation: Option<TestReportOperation> = "operation",
        pub assert: Option<TestReportAssert> = "assert",
    }
}

fhir_type! {
    /// The operation to perform.
    pub struct TestReportOperation {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        /// pass | skip | fail | warning | error
        pub result: Option<Code> = "result",
        pub message: Option<Markdown> = "message",
        pub detail: Option<Uri> = "detail",
    }
}

fhir_type! {
    /// The assertion to perform.
    pub struct TestReportAssert {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub result: Option<Code> = "result",
        pub message: Option<Markdown> = "message",
        pub detail: Option<String> = "detail",
    }
}

fhir_type! {
    /// A test executed from the test script.
    pub struct TestReportTest {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub name: Option<String> = "name",
        pub description: Option<String> = "description",
        pub action: Option<Vec<TestReportSetupAction>> = "action",
    }
}

fhir_type! {
    /// The results of running the series of required clean up steps.
    pub struct TestReportTeardown {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub action: Option<Vec<TestReportTeardownAction>> = "action",
    }
}

fhir_type! {
    /// One or more teardown operations performed.
    pub struct TestReportTeardownAction {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub operation: Option<TestReportOperation> = "operation",
    }
}
