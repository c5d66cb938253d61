use crate::r4::datatypes::*;
use crate::{AnyResource, fhir_resource, fhir_type};

fhir_resource! {
    /// Contains a collection of resources.
    pub struct Bundle: "Bundle" {
        pub id: Option<std::string::String> = "id",
        pub meta: Option<Meta> = "meta",
        pub implicit_rules: Option<Uri> = "implicitRules",
        pub language: Option<Code> = "language",
        pub identifier: Option<Identifier> = "identifier",
        /// document | message | transaction | transaction-response | batch |
        /// batch-response | history | searchset | collection
        pub r#type: Option<Code> = "type",
        pub timestamp: Option<Instant> = "timestamp",
        pub total: Option<UnsignedInt> = "total",
        pub link: Option<Vec<BundleLink>> = "link",
        pub entry: Option<Vec<BundleEntry>> = "entry",
    }
}

fhir_type! {
    /// Links related to this Bundle.
    pub struct BundleLink {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub relation: Option<String> = "relation",
        pub url: Option<Uri> = "url",
    }
}

fhir_type! {
    /// Entry in the bundle - will have a resource or information.
    pub struct BundleEntry {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub link: Option<Vec<BundleLink>> = "link",
        pub full_url: Option<Uri> = "fullUrl",
        /// A resource in the bundle
        pub resource: Option<AnyResource> = "resource",
        pub search: Option<BundleEntrySearch> = "search",
        pub request: Option<BundleEntryRequest> = "request",
        pub response: Option<BundleEntryResponse> = "response",
    }
}

fhir_type! {
    /// Search related information.
    pub struct BundleEntrySearch {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        /// match | include | outcome - why this is in the result set
        pub mode: Option<Code> = "mode",
        pub score: Option<Decimal> = "score",
    }
}

fhir_type! {
    /// Additional execution information (transaction/batch/history).
    pub struct BundleEntryRequest {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        /// GET | HEAD | POST | PUT | DELETE | PATCH
        pub method: Option<Code> = "method",
        pub url: Option<Uri> = "url",
        pub if_none_match: Option<String> = "ifNoneMatch",
        pub if_modified_since: Option<Instant> = "ifModifiedSince",
        pub if_match: Option<String> = "ifMatch",
        pub if_none_exist: Option<String> = "ifNoneExist",
    }
}

fhir_type! {
    /// Results of execution (transaction/batch/history).
    pub struct BundleEntryResponse {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub modifier_extension: Option<Vec<Extension>> = "modifierExtension",
        pub status: Option<String> = "status",
        pub location: Option<Uri> = "location",
        pub etag: Option<String> = "etag",
        pub last_modified: Option<Instant> = "lastModified",
        /// OperationOutcome with hints and warnings (for batch/transaction)
        pub outcome: Option<AnyResource> = "outcome",
    }
}

impl Bundle {
    /// The entry resources, in order, skipping entries without one.
    pub fn resources(&self) -> impl Iterator<Item = &AnyResource> {
        self.entry
            .iter()
            .flatten()
            .filter_map(|entry| entry.resource.as_ref())
    }
}
