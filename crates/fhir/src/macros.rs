//! Declaration macros for the model catalogue.
//!
//! Each field is declared with its Rust type and its wire name; the macros
//! derive the struct and wire the fields through [`WireSlot`](crate::wire::WireSlot)
//! in declaration order, so every data type, backbone element and resource
//! shares the same split/join and choice logic instead of hand-written
//! per-field code.

/// Declares a complex data type or backbone element.
///
/// ```ignore
/// fhir_type! {
///     pub struct Period {
///         pub id: Option<std::string::String> = "id",
///         pub extension: Option<Vec<Extension>> = "extension",
///         pub start: Option<DateTime> = "start",
///         pub end: Option<DateTime> = "end",
///     }
/// }
/// ```
#[macro_export]
macro_rules! fhir_type {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty = $wire:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $fty, )*
        }

        impl $crate::wire::FhirType for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn write_wire(&self, out: &mut $crate::wire::WireObject) {
                $( $crate::wire::WireSlot::write_slot(&self.$field, $wire, out); )*
            }

            fn read_wire(reader: &mut $crate::wire::WireReader) -> $crate::Result<Self> {
                ::core::result::Result::Ok(Self {
                    $( $field: $crate::wire::WireSlot::read_slot($wire, reader)?, )*
                })
            }
        }

        $crate::__fhir_wire_impls!($name);
    };
}

/// Declares a resource. The literal after the name is its `resourceType`.
///
/// Every resource must declare `id: Option<std::string::String>`.
#[macro_export]
macro_rules! fhir_resource {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $resource_type:literal {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty = $wire:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $fty, )*
        }

        impl $crate::wire::FhirType for $name {
            const TYPE_NAME: &'static str = $resource_type;

            fn write_wire(&self, out: &mut $crate::wire::WireObject) {
                out.insert(
                    ::std::string::String::from("resourceType"),
                    $crate::__private::serde_json::Value::String(
                        ::std::string::String::from($resource_type),
                    ),
                );
                $( $crate::wire::WireSlot::write_slot(&self.$field, $wire, out); )*
            }

            fn read_wire(reader: &mut $crate::wire::WireReader) -> $crate::Result<Self> {
                reader.expect_resource_type($resource_type)?;
                $crate::__private::tracing::trace!(resource_type = $resource_type, "decoding resource");
                ::core::result::Result::Ok(Self {
                    $( $field: $crate::wire::WireSlot::read_slot($wire, reader)?, )*
                })
            }
        }

        impl $crate::resource::ResourceType for $name {
            const RESOURCE_TYPE: &'static str = $resource_type;

            fn resource_id(&self) -> ::core::option::Option<&str> {
                self.id.as_deref()
            }
        }

        $crate::__fhir_wire_impls!($name);
    };
}

/// serde and `Display` impls shared by every declared type.
#[doc(hidden)]
#[macro_export]
macro_rules! __fhir_wire_impls {
    ($name:ty) => {
        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::serde_helpers::serialize_wire(self, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                $crate::serde_helpers::deserialize_wire(deserializer)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $crate::serde_helpers::write_debug_dump(self, f)
            }
        }
    };
}
