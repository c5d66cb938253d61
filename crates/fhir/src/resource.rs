//! Resources and the "any resource" container.
//!
//! A concrete resource implements [`ResourceType`] (generated by
//! [`fhir_resource!`](crate::fhir_resource)) and, through a blanket impl, the
//! object-safe [`FhirResource`] capability. [`AnyResource`] owns a boxed
//! `dyn FhirResource`, which is how `contained`, `Bundle.entry.resource` and
//! other "any resource" fields hold values of the open catalogue. Encoding asks
//! the value for its own `resourceType`; decoding resolves it through the
//! [registry](crate::registry).

use std::any::Any;
use std::fmt;

use crate::error::Result;
use crate::registry::registry;
use crate::wire::{FhirType, WireObject, WireReader};

/// A concrete resource type with a fixed discriminator.
pub trait ResourceType: FhirType + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The `resourceType` literal, e.g. `"Patient"`.
    const RESOURCE_TYPE: &'static str;

    /// The logical id of the resource.
    fn resource_id(&self) -> Option<&str>;
}

/// Object-safe view of a resource.
pub trait FhirResource: Any + fmt::Debug + Send + Sync {
    fn resource_type(&self) -> &'static str;
    fn id(&self) -> Option<&str>;
    /// The wire object, starting with `resourceType`.
    fn encode_resource(&self) -> WireObject;
    fn clone_resource(&self) -> Box<dyn FhirResource>;
    fn eq_resource(&self, other: &dyn FhirResource) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: ResourceType> FhirResource for T {
    fn resource_type(&self) -> &'static str {
        T::RESOURCE_TYPE
    }

    fn id(&self) -> Option<&str> {
        self.resource_id()
    }

    fn encode_resource(&self) -> WireObject {
        self.to_wire()
    }

    fn clone_resource(&self) -> Box<dyn FhirResource> {
        Box::new(self.clone())
    }

    fn eq_resource(&self, other: &dyn FhirResource) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A resource of any registered type.
pub struct AnyResource(Box<dyn FhirResource>);

impl AnyResource {
    pub fn new<T: ResourceType>(resource: T) -> Self {
        AnyResource(Box::new(resource))
    }

    /// The discriminator of the held resource.
    pub fn resource_type(&self) -> &'static str {
        self.0.resource_type()
    }

    pub fn id(&self) -> Option<&str> {
        self.0.id()
    }

    /// True when the held resource is a `T`.
    pub fn is<T: ResourceType>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    pub fn downcast_ref<T: ResourceType>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Takes the held resource out as a `T`, or `None` if it is another type.
    pub fn into_inner<T: ResourceType>(self) -> Option<T> {
        self.0.into_any().downcast::<T>().ok().map(|resource| *resource)
    }

    pub fn as_resource(&self) -> &dyn FhirResource {
        self.0.as_ref()
    }
}

impl Clone for AnyResource {
    fn clone(&self) -> Self {
        AnyResource(self.0.clone_resource())
    }
}

impl PartialEq for AnyResource {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_resource(other.0.as_ref())
    }
}

impl fmt::Debug for AnyResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<T: ResourceType> From<T> for AnyResource {
    fn from(resource: T) -> Self {
        AnyResource::new(resource)
    }
}

impl FhirType for AnyResource {
    const TYPE_NAME: &'static str = "Resource";

    fn write_wire(&self, out: &mut WireObject) {
        out.extend(self.0.encode_resource());
    }

    fn read_wire(reader: &mut WireReader) -> Result<Self> {
        let shape = reader.shape();
        registry().decode_shaped(reader.take_remaining(), shape)
    }
}

crate::__fhir_wire_impls!(AnyResource);
