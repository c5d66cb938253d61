//! Primitive value types and their JSON/lexical conversions.
//!
//! A [`PrimitiveType`] is the bare value inside an [`Element`](crate::Element).
//! JSON carries it as a native scalar (`true`, `12`, `1.50`, `"2020-01-01"`),
//! while element-shaped input (XML) carries it as its lexical string.
//!
//! The date and time types keep their lexical form: a partial date stays
//! partial, and a date-time keeps its exact offset spelling and fractional
//! digits, so values round-trip byte for byte.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime};
use serde_json::{Number, Value};

use crate::error::{FhirError, Result};

/// A scalar that can sit inside a primitive element.
pub trait PrimitiveType: Clone + fmt::Debug + PartialEq + Sized {
    /// FHIR name of the primitive, used in error messages.
    const TYPE_NAME: &'static str;

    /// The bare JSON value.
    fn to_json(&self) -> Value;

    /// Parses the bare JSON value.
    fn from_json(value: &Value) -> Result<Self>;

    /// Parses the lexical (string) form used by element-shaped input.
    fn from_lexical(text: &str) -> Result<Self>;
}

impl PrimitiveType for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| FhirError::invalid_value("boolean", value))
    }

    fn from_lexical(text: &str) -> Result<Self> {
        match text {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(FhirError::invalid_primitive(Self::TYPE_NAME, text)),
        }
    }
}

impl PrimitiveType for i32 {
    const TYPE_NAME: &'static str = "integer";

    fn to_json(&self) -> Value {
        Value::Number(Number::from(*self))
    }

    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| FhirError::invalid_value("integer", value))
    }

    fn from_lexical(text: &str) -> Result<Self> {
        text.parse()
            .map_err(|_| FhirError::invalid_primitive(Self::TYPE_NAME, text))
    }
}

impl PrimitiveType for u32 {
    const TYPE_NAME: &'static str = "unsignedInt";

    fn to_json(&self) -> Value {
        Value::Number(Number::from(*self))
    }

    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| FhirError::invalid_value("unsigned integer", value))
    }

    fn from_lexical(text: &str) -> Result<Self> {
        text.parse()
            .map_err(|_| FhirError::invalid_primitive(Self::TYPE_NAME, text))
    }
}

impl PrimitiveType for rust_decimal::Decimal {
    const TYPE_NAME: &'static str = "decimal";

    fn to_json(&self) -> Value {
        // Arbitrary-precision numbers keep the decimal's scale on the wire.
        let text = self.to_string();
        match Number::from_str(&text) {
            Ok(number) => Value::Number(number),
            Err(_) => Value::String(text),
        }
    }

    fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Number(number) => parse_decimal(&number.to_string()),
            other => Err(FhirError::invalid_value("decimal number", other)),
        }
    }

    fn from_lexical(text: &str) -> Result<Self> {
        parse_decimal(text)
    }
}

fn parse_decimal(text: &str) -> Result<rust_decimal::Decimal> {
    rust_decimal::Decimal::from_str_exact(text)
        .or_else(|_| rust_decimal::Decimal::from_scientific(text))
        .map_err(|_| FhirError::invalid_primitive("decimal", text))
}

impl PrimitiveType for String {
    const TYPE_NAME: &'static str = "string";

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| FhirError::invalid_value("string", value))
    }

    fn from_lexical(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

/// Implements [`PrimitiveType`] for a type that travels as a JSON string.
macro_rules! string_primitive {
    ($ty:ty, $name:literal) => {
        impl PrimitiveType for $ty {
            const TYPE_NAME: &'static str = $name;

            fn to_json(&self) -> Value {
                Value::String(self.to_string())
            }

            fn from_json(value: &Value) -> Result<Self> {
                match value {
                    Value::String(text) => Self::from_lexical(text),
                    other => Err(FhirError::invalid_value($name, other)),
                }
            }

            fn from_lexical(text: &str) -> Result<Self> {
                text.parse()
            }
        }
    };
}

string_primitive!(PrecisionDate, "date");
string_primitive!(PrecisionDateTime, "dateTime");
string_primitive!(PrecisionInstant, "instant");
string_primitive!(PrecisionTime, "time");

/// A FHIR `date`: a year, a year and month, or a full calendar date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrecisionDate {
    /// `YYYY`
    Year(i32),
    /// `YYYY-MM`
    YearMonth(i32, u32),
    /// `YYYY-MM-DD`
    Date(NaiveDate),
}

impl PrecisionDate {
    /// Parses `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || FhirError::invalid_primitive("date", text);
        let digits = |part: &str, len: usize| -> Result<u32> {
            if part.len() == len && part.bytes().all(|b| b.is_ascii_digit()) {
                part.parse().map_err(|_| invalid())
            } else {
                Err(invalid())
            }
        };

        let parts: Vec<&str> = text.split('-').collect();
        match parts.as_slice() {
            [year] => Ok(PrecisionDate::Year(digits(year, 4)? as i32)),
            [year, month] => {
                let month = digits(month, 2)?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
                Ok(PrecisionDate::YearMonth(digits(year, 4)? as i32, month))
            }
            [year, month, day] => {
                NaiveDate::from_ymd_opt(digits(year, 4)? as i32, digits(month, 2)?, digits(day, 2)?)
                    .map(PrecisionDate::Date)
                    .ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }

    /// The year component.
    pub fn year(&self) -> i32 {
        match self {
            PrecisionDate::Year(year) | PrecisionDate::YearMonth(year, _) => *year,
            PrecisionDate::Date(date) => date.year(),
        }
    }
}

impl FromStr for PrecisionDate {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PrecisionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecisionDate::Year(year) => write!(f, "{year:04}"),
            PrecisionDate::YearMonth(year, month) => write!(f, "{year:04}-{month:02}"),
            PrecisionDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// A FHIR `dateTime`: a partial date, or a full date-time with offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrecisionDateTime {
    /// A date without a time part.
    Date(PrecisionDate),
    /// A full date-time; `text` is the lexical form it was parsed from.
    DateTime {
        value: DateTime<FixedOffset>,
        text: String,
    },
}

impl PrecisionDateTime {
    /// Parses a date (`2020`, `2020-01`, `2020-01-01`) or an RFC 3339 date-time.
    pub fn parse(text: &str) -> Result<Self> {
        if text.contains('T') {
            DateTime::parse_from_rfc3339(text)
                .map(|value| PrecisionDateTime::DateTime {
                    value,
                    text: text.to_string(),
                })
                .map_err(|_| FhirError::invalid_primitive("dateTime", text))
        } else {
            PrecisionDate::parse(text)
                .map(PrecisionDateTime::Date)
                .map_err(|_| FhirError::invalid_primitive("dateTime", text))
        }
    }

    /// The instant in time, when the value carries a time part.
    pub fn date_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            PrecisionDateTime::DateTime { value, .. } => Some(value),
            PrecisionDateTime::Date(_) => None,
        }
    }
}

impl FromStr for PrecisionDateTime {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PrecisionDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecisionDateTime::Date(date) => date.fmt(f),
            PrecisionDateTime::DateTime { text, .. } => f.write_str(text),
        }
    }
}

/// A FHIR `instant`: always a full date-time with offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecisionInstant {
    value: DateTime<FixedOffset>,
    text: String,
}

impl PrecisionInstant {
    /// Parses an RFC 3339 date-time.
    pub fn parse(text: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(text)
            .map(|value| PrecisionInstant {
                value,
                text: text.to_string(),
            })
            .map_err(|_| FhirError::invalid_primitive("instant", text))
    }

    pub fn value(&self) -> &DateTime<FixedOffset> {
        &self.value
    }
}

impl FromStr for PrecisionInstant {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PrecisionInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A FHIR `time` of day (`HH:MM:SS` with optional fraction).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecisionTime {
    value: NaiveTime,
    text: String,
}

impl PrecisionTime {
    pub fn parse(text: &str) -> Result<Self> {
        NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
            .map(|value| PrecisionTime {
                value,
                text: text.to_string(),
            })
            .map_err(|_| FhirError::invalid_primitive("time", text))
    }

    pub fn value(&self) -> &NaiveTime {
        &self.value
    }
}

impl FromStr for PrecisionTime {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PrecisionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
