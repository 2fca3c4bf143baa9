//! Field registries: the ordered list of field descriptors of a record.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod cell;
mod field_info;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use attributes::{Attributes, Ignore, Required, SkipFlat};
pub use cell::{GenericRegistryCell, NonGenericRegistryCell};
pub use field_info::{FieldAccess, FieldInfo};
pub use registry::{Registry, RegistryBuilder};
