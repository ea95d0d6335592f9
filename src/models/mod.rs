//! Domain models for discovered mappers and generated output.

mod mapper;
mod registry;
mod unit;

pub use mapper::{ConversionMethodDescriptor, MapperDeclaration, MapperKind};
pub use registry::{MapImpl, RegistryEntry, WrapperConstruction};
pub use unit::GeneratedUnit;
