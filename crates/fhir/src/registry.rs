//! Resource type registry.
//!
//! Maps a `resourceType` discriminator to the decoder of its concrete type so
//! that "any resource" fields can be decoded without a central match over the
//! catalogue. The process-wide registry is built once, on first use or by an
//! explicit [`install_registry`] call, and is read-only afterwards; concurrent
//! decodes share it without locking.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::error::{FhirError, Result};
use crate::resource::{AnyResource, ResourceType};
use crate::wire::{WireObject, WireReader, WireShape};

/// Decodes a wire object (including its `resourceType`) into a boxed resource.
pub type DecodeFn = fn(WireObject, WireShape) -> Result<AnyResource>;

/// Registry configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("resource type `{0}` is already registered")]
    DuplicateResourceType(&'static str),

    #[error("the resource registry is already installed")]
    AlreadyInstalled,
}

/// A set of resource decoders keyed by discriminator.
#[derive(Clone, Default)]
pub struct ResourceRegistry {
    decoders: HashMap<&'static str, DecodeFn>,
}

fn decode_as<T: ResourceType>(object: WireObject, shape: WireShape) -> Result<AnyResource> {
    T::decode_wire(WireReader::with_shape(T::TYPE_NAME, object, shape)).map(AnyResource::new)
}

impl ResourceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under its discriminator.
    pub fn try_register<T: ResourceType>(&mut self) -> std::result::Result<&mut Self, RegistryError> {
        if self.decoders.contains_key(T::RESOURCE_TYPE) {
            return Err(RegistryError::DuplicateResourceType(T::RESOURCE_TYPE));
        }
        self.decoders.insert(T::RESOURCE_TYPE, decode_as::<T>);
        Ok(self)
    }

    /// Registers `T` under its discriminator.
    ///
    /// # Panics
    ///
    /// Panics if the discriminator is already registered. Two types claiming
    /// one discriminator is a build configuration error, not a data error.
    pub fn register<T: ResourceType>(&mut self) -> &mut Self {
        if let Err(err) = self.try_register::<T>() {
            panic!("{err}");
        }
        self
    }

    /// Looks up the decoder for a discriminator.
    pub fn resolve(&self, resource_type: &str) -> Result<DecodeFn> {
        self.decoders.get(resource_type).copied().ok_or_else(|| {
            debug!(resource_type, "unknown resource type");
            FhirError::UnknownResourceType(resource_type.to_string())
        })
    }

    pub fn contains(&self, resource_type: &str) -> bool {
        self.decoders.contains_key(resource_type)
    }

    /// Registered discriminators, sorted.
    pub fn resource_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.decoders.keys().copied().collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Decodes a FHIR JSON resource object by its `resourceType`.
    pub fn decode(&self, object: WireObject) -> Result<AnyResource> {
        self.decode_shaped(object, WireShape::Json)
    }

    /// Decodes a resource object whose primitives are laid out as `shape`.
    pub fn decode_shaped(&self, object: WireObject, shape: WireShape) -> Result<AnyResource> {
        let decode = match object.get("resourceType") {
            Some(Value::String(resource_type)) => self.resolve(resource_type)?,
            None | Some(Value::Null) => {
                debug!("resource object without resourceType");
                return Err(FhirError::MissingResourceType);
            }
            Some(other) => return Err(FhirError::invalid_value("resource type string", other)),
        };
        decode(object, shape)
    }
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("resource_types", &self.resource_types())
            .finish()
    }
}

static REGISTRY: OnceLock<ResourceRegistry> = OnceLock::new();

/// The process-wide registry, built with the default catalogue on first use.
pub fn registry() -> &'static ResourceRegistry {
    REGISTRY.get_or_init(|| {
        let registry = default_registry();
        debug!(resource_types = registry.len(), "resource registry frozen");
        registry
    })
}

/// Installs `registry` as the process-wide registry.
///
/// Must run before the first decode that needs a registry lookup; once the
/// registry is in use it cannot be replaced.
pub fn install_registry(registry: ResourceRegistry) -> std::result::Result<(), RegistryError> {
    let count = registry.len();
    REGISTRY
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)?;
    debug!(resource_types = count, "resource registry installed");
    Ok(())
}

fn default_registry() -> ResourceRegistry {
    #[cfg(feature = "R4")]
    {
        ResourceRegistry::with_r4()
    }
    #[cfg(not(feature = "R4"))]
    {
        ResourceRegistry::new()
    }
}
