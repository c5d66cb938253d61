//! R4 primitive aliases and general-purpose data types.

use crate::primitives::{PrecisionDate, PrecisionDateTime, PrecisionInstant, PrecisionTime};
use crate::{Element, fhir_choice, fhir_type};

/// Value of "true" or "false"
pub type Boolean = Element<bool, Extension>;
/// A whole number in the range -2,147,483,648..2,147,483,647
pub type Integer = Element<i32, Extension>;
/// Any positive integer (1..2,147,483,647)
pub type PositiveInt = Element<u32, Extension>;
/// Any non-negative integer (0..2,147,483,647)
pub type UnsignedInt = Element<u32, Extension>;
/// A rational number with implicit precision
pub type Decimal = Element<rust_decimal::Decimal, Extension>;
/// A sequence of Unicode characters
pub type String = Element<std::string::String, Extension>;
/// A string which has at least one character and no leading or trailing whitespace
pub type Code = Element<std::string::String, Extension>;
pub type Id = Element<std::string::String, Extension>;
pub type Markdown = Element<std::string::String, Extension>;
pub type Uri = Element<std::string::String, Extension>;
pub type Url = Element<std::string::String, Extension>;
pub type Canonical = Element<std::string::String, Extension>;
pub type Oid = Element<std::string::String, Extension>;
pub type Uuid = Element<std::string::String, Extension>;
pub type Base64Binary = Element<std::string::String, Extension>;
/// A date or partial date (e.g. just year or year + month)
pub type Date = Element<PrecisionDate, Extension>;
/// A date, date-time or partial date as used in human communication
pub type DateTime = Element<PrecisionDateTime, Extension>;
/// An instant in time, known at least to the second, with a time zone
pub type Instant = Element<PrecisionInstant, Extension>;
/// A time during the day, with no date specified
pub type Time = Element<PrecisionTime, Extension>;

fhir_type! {
    /// Optional Extension Element - found in all resources.
    pub struct Extension {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        /// identifies the meaning of the extension
        pub url: Option<std::string::String> = "url",
        pub value: Option<ExtensionValue> = "value",
    }
}

impl Extension {
    /// An extension with a url and a value.
    pub fn new(url: impl Into<std::string::String>, value: ExtensionValue) -> Self {
        Self {
            url: Some(url.into()),
            value: Some(value),
            ..Self::default()
        }
    }
}

fhir_choice! {
    /// Choice of types for `Extension.value[x]`.
    pub enum ExtensionValue {
        Base64Binary(Base64Binary) = "Base64Binary",
        Boolean(Boolean) = "Boolean",
        Canonical(Canonical) = "Canonical",
        Code(Code) = "Code",
        Date(Date) = "Date",
        DateTime(DateTime) = "DateTime",
        Decimal(Decimal) = "Decimal",
        Id(Id) = "Id",
        Instant(Instant) = "Instant",
        Integer(Integer) = "Integer",
        Markdown(Markdown) = "Markdown",
        Oid(Oid) = "Oid",
        PositiveInt(PositiveInt) = "PositiveInt",
        String(String) = "String",
        Time(Time) = "Time",
        UnsignedInt(UnsignedInt) = "UnsignedInt",
        Uri(Uri) = "Uri",
        Url(Url) = "Url",
        Uuid(Uuid) = "Uuid",
        Annotation(Annotation) = "Annotation",
        Attachment(Attachment) = "Attachment",
        CodeableConcept(CodeableConcept) = "CodeableConcept",
        Coding(Coding) = "Coding",
        ContactPoint(ContactPoint) = "ContactPoint",
        Expression(Expression) = "Expression",
        HumanName(HumanName) = "HumanName",
        Identifier(Identifier) = "Identifier",
        Meta(Meta) = "Meta",
        Period(Period) = "Period",
        Quantity(Quantity) = "Quantity",
        Range(Range) = "Range",
        Reference(Reference) = "Reference",
    }
}

fhir_type! {
    /// A reference to a code defined by a terminology system.
    pub struct Coding {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub system: Option<Uri> = "system",
        pub version: Option<String> = "version",
        pub code: Option<Code> = "code",
        pub display: Option<String> = "display",
        pub user_selected: Option<Boolean> = "userSelected",
    }
}

fhir_type! {
    /// Concept - reference to a terminology or just text.
    pub struct CodeableConcept {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub coding: Option<Vec<Coding>> = "coding",
        pub text: Option<String> = "text",
    }
}

fhir_type! {
    /// An identifier intended for computation.
    pub struct Identifier {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        /// usual | official | temp | secondary | old (If known)
        pub r#use: Option<Code> = "use",
        pub r#type: Option<CodeableConcept> = "type",
        pub system: Option<Uri> = "system",
        pub value: Option<String> = "value",
        pub period: Option<Period> = "period",
        pub assigner: Option<Box<Reference>> = "assigner",
    }
}

fhir_type! {
    /// Time range defined by start and end date/time.
    pub struct Period {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub start: Option<DateTime> = "start",
        pub end: Option<DateTime> = "end",
    }
}

fhir_type! {
    /// A measured or measurable amount.
    pub struct Quantity {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub value: Option<Decimal> = "value",
        /// < | <= | >= | > - how to understand the value
        pub comparator: Option<Code> = "comparator",
        pub unit: Option<String> = "unit",
        pub system: Option<Uri> = "system",
        pub code: Option<Code> = "code",
    }
}

fhir_type! {
    /// Set of values bounded by low and high.
    pub struct Range {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub low: Option<Quantity> = "low",
        pub high: Option<Quantity> = "high",
    }
}

fhir_type! {
    /// A reference from one resource to another.
    pub struct Reference {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        /// Literal reference, Relative, internal or absolute URL
        pub reference: Option<String> = "reference",
        pub r#type: Option<Uri> = "type",
        pub identifier: Option<Identifier> = "identifier",
        pub display: Option<String> = "display",
    }
}

impl Reference {
    /// A literal reference such as `Patient/123` or `#contained-id`.
    pub fn to(reference: impl Into<std::string::String>) -> Self {
        Self {
            reference: Some(Element::new(reference.into())),
            ..Self::default()
        }
    }
}

fhir_type! {
    /// Metadata about a resource.
    pub struct Meta {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub version_id: Option<Id> = "versionId",
        pub last_updated: Option<Instant> = "lastUpdated",
        pub source: Option<Uri> = "source",
        pub profile: Option<Vec<Canonical>> = "profile",
        pub security: Option<Vec<Coding>> = "security",
        pub tag: Option<Vec<Coding>> = "tag",
    }
}

fhir_type! {
    /// Name of a human - parts and usage.
    pub struct HumanName {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub r#use: Option<Code> = "use",
        pub text: Option<String> = "text",
        pub family: Option<String> = "family",
        /// Given names (not always 'first'). Includes middle names
        pub given: Option<Vec<String>> = "given",
        pub prefix: Option<Vec<String>> = "prefix",
        pub suffix: Option<Vec<String>> = "suffix",
        pub period: Option<Period> = "period",
    }
}

fhir_type! {
    /// Details of a Technology mediated contact point (phone, fax, email, etc.).
    pub struct ContactPoint {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub system: Option<Code> = "system",
        pub value: Option<String> = "value",
        pub r#use: Option<Code> = "use",
        pub rank: Option<PositiveInt> = "rank",
        pub period: Option<Period> = "period",
    }
}

fhir_type! {
    /// Text node with attribution.
    pub struct Annotation {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub author: Option<AnnotationAuthor> = "author",
        pub time: Option<DateTime> = "time",
        pub text: Option<Markdown> = "text",
    }
}

fhir_choice! {
    /// Choice of types for `Annotation.author[x]`.
    pub enum AnnotationAuthor {
        Reference(Reference) = "Reference",
        String(String) = "String",
    }
}

fhir_type! {
    /// Content in a format defined elsewhere.
    pub struct Attachment {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub content_type: Option<Code> = "contentType",
        pub language: Option<Code> = "language",
        pub data: Option<Base64Binary> = "data",
        pub url: Option<Url> = "url",
        pub size: Option<UnsignedInt> = "size",
        pub hash: Option<Base64Binary> = "hash",
        pub title: Option<String> = "title",
        pub creation: Option<DateTime> = "creation",
    }
}

fhir_type! {
    /// An expression that can be used to generate a value.
    pub struct Expression {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        pub description: Option<String> = "description",
        pub name: Option<Id> = "name",
        /// text/cql | text/fhirpath | application/x-fhir-query | etc.
        pub language: Option<Code> = "language",
        pub expression: Option<String> = "expression",
        pub reference: Option<Uri> = "reference",
    }
}

fhir_type! {
    /// Human-readable summary of the resource.
    pub struct Narrative {
        pub id: Option<std::string::String> = "id",
        pub extension: Option<Vec<Extension>> = "extension",
        /// generated | extensions | additional | empty
        pub status: Option<Code> = "status",
        /// Limited xhtml content
        pub div: Option<std::string::String> = "div",
    }
}
