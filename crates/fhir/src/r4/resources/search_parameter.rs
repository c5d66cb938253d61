use crate::r4::datatypes::*;
use crate::{AnyResource, fhir_resource, fhir_type};

fhir_resource! {
    /// Search parameter for a resource.
    pub struct SearchParameter: "SearchParameter" {
        pub id: Option<std::string::String> = "id",
        pub meta: Option<Meta> = "meta",
        pub implicit_rules: Option<Uri> = "implicitRules",
        pub language: Option<Code> = "language",
        pub text: Option<Narrative> = "text",
        pub contained: Option<Vec<AnyResource>> = "contained",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub url: Option<Uri> = "url",
        pub version: Option<String> = "version",
        pub name: Option<String> = "name",
        pub derived_from: Option<Canonical> = "derivedFrom",
        /// draft | active | retired | unknown
        pub status: Option<Code> = "status",
        pub experimental: Option<Boolean> = "experimental",
        pub date: Option<DateTime> = "date",
        pub publisher: Option<String> = "publisher",
        pub description: Option<Markdown> = "description",
        pub purpose: Option<Markdown> = "purpose",
        /// Code used in URL
        pub code: Option<Code> = "code",
        /// The resource type(s) this search parameter applies to
        pub base: Option<Vec<Code>> = "base",
        /// number | date | string | token | reference | composite | quantity | uri | special
        pub r#type: Option<Code> = "type",
        pub expression: Option<String> = "expression",
        pub xpath: Option<String> = "xpath",
        pub xpath_usage: Option<Code> = "xpathUsage",
        pub target: Option<Vec<Code>> = "target",
        pub multiple_or: Option<Boolean> = "multipleOr",
        pub multiple_and: Option<Boolean> = "multipleAnd",
        pub comparator: Option<Vec<Code>> = "comparator",
        pub modifier: Option<Vec<Code>> = "modifier",
        pub chain: Option<Vec<String>> = "chain",
        pub component: Option<Vec<SearchParameterComponent>> = "component",
    }
}

fhir_type! {
    /// For Composite resources to define the parts.
    pub struct SearchParameterComponent {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub definition: Option<Canonical> = "definition",
        pub expression: Option<String> = "expression",
    }
}
