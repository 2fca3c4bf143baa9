//! Loading records from trees and flat text, with required-field tracking.

// -----------------------------------------------------------------------------
// Modules

mod flat_loader;
mod input;
mod required;
mod tree_loader;

// -----------------------------------------------------------------------------
// Exports

pub use flat_loader::FlatLoader;
pub use input::{FieldInput, TextInput, TreeInput};
pub use required::RequiredTracker;
pub use tree_loader::TreeLoader;
