//! Choice fields (`value[x]`): a closed set of typed variants sharing one
//! logical field name.
//!
//! On the wire each variant owns the key `field + Suffix` (`valueQuantity`,
//! `effectiveDateTime`), and primitive variants also own the matching
//! `_field + Suffix` sidecar. A decoded choice field is populated by at most
//! one variant: input that sets keys for two variants is rejected instead of
//! one being picked.
//!
//! Concrete choice types are declared with [`fhir_choice!`](crate::fhir_choice).

use helios_serde_support::sidecar_key;

use crate::error::{FhirError, Result};
use crate::wire::{WireObject, WireReader};

/// A closed sum type over the variants of one choice field.
pub trait ChoiceType: Sized {
    /// Name of the Rust enum, for diagnostics.
    const TYPE_NAME: &'static str;

    /// The wire suffix of every variant, in declaration order.
    const SUFFIXES: &'static [&'static str];

    /// Suffix of the populated variant.
    fn suffix(&self) -> &'static str;

    /// Writes the populated variant under `key` (and its sidecar, if primitive).
    fn write_variant(&self, key: &str, out: &mut WireObject);

    /// Reads the variant registered for `suffix` from `key`.
    fn read_variant(suffix: &str, key: &str, reader: &mut WireReader) -> Result<Option<Self>>;
}

/// The wire key of one variant: `choice_key("value", "Quantity") == "valueQuantity"`.
pub fn choice_key(field: &str, suffix: &str) -> String {
    let mut key = String::with_capacity(field.len() + suffix.len());
    key.push_str(field);
    key.push_str(suffix);
    key
}

/// Emits exactly one `{field}{Suffix}` key for the populated variant.
pub fn write_choice<C: ChoiceType>(value: &C, field: &str, out: &mut WireObject) {
    let key = choice_key(field, value.suffix());
    value.write_variant(&key, out);
}

/// Scans every declared variant key of `field` and reconstructs the choice.
///
/// A variant counts as present when either its value key or its sidecar key
/// is non-null, so an annotated null still populates the choice.
pub fn read_choice<C: ChoiceType>(field: &str, reader: &mut WireReader) -> Result<Option<C>> {
    let present: Vec<(&'static str, String)> = C::SUFFIXES
        .iter()
        .map(|suffix| (*suffix, choice_key(field, suffix)))
        .filter(|(_, key)| reader.contains(key) || reader.contains(&sidecar_key(key)))
        .collect();

    match present.as_slice() {
        [] => Ok(None),
        [(suffix, key)] => C::read_variant(suffix, key, reader),
        _ => {
            let keys: Vec<String> = present.iter().map(|(_, key)| key.clone()).collect();
            tracing::debug!(
                type_name = reader.type_name(),
                field,
                keys = ?keys,
                "rejecting choice field with multiple values"
            );
            Err(FhirError::MultipleChoiceValues {
                type_name: reader.type_name(),
                field: field.to_string(),
                keys,
            })
        }
    }
}

/// Declares a choice type: a closed enum with one variant per wire suffix.
///
/// ```ignore
/// fhir_choice! {
///     /// Choice of types for `Observation.effective[x]`.
///     pub enum ObservationEffective {
///         DateTime(DateTime) = "DateTime",
///         Period(Period) = "Period",
///     }
/// }
/// ```
#[macro_export]
macro_rules! fhir_choice {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident($ty:ty) = $suffix:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant($ty), )*
        }

        impl $crate::choice::ChoiceType for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const SUFFIXES: &'static [&'static str] = &[$($suffix),*];

            fn suffix(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => $suffix, )*
                }
            }

            fn write_variant(&self, key: &str, out: &mut $crate::wire::WireObject) {
                match self {
                    $( Self::$variant(inner) => $crate::wire::WireField::write_field(inner, key, out), )*
                }
            }

            fn read_variant(
                suffix: &str,
                key: &str,
                reader: &mut $crate::wire::WireReader,
            ) -> $crate::Result<::core::option::Option<Self>> {
                $(
                    if suffix == $suffix {
                        let value = <$ty as $crate::wire::WireField>::read_field(key, reader)?;
                        return ::core::result::Result::Ok(value.map(Self::$variant));
                    }
                )*
                ::core::result::Result::Ok(::core::option::Option::None)
            }
        }

        impl $crate::wire::WireField for $name {
            fn write_field(&self, name: &str, out: &mut $crate::wire::WireObject) {
                $crate::choice::write_choice(self, name, out)
            }

            fn read_field(
                name: &str,
                reader: &mut $crate::wire::WireReader,
            ) -> $crate::Result<::core::option::Option<Self>> {
                $crate::choice::read_choice(name, reader)
            }
        }
    };
}
