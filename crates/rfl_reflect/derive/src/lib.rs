//! Derive macros for `rfl_reflect`:
//!
//! - [`Record`]
//! - [`Enumerated`]
//! - [`SumType`]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static RECORD_ATTRIBUTE_NAME: &str = "record";

// -----------------------------------------------------------------------------
// Modules

mod enumerated;
mod field_attributes;
mod path;
mod record;
mod sum_type;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// Implements `Record` and `Codec` for a struct with named fields (or a unit
/// struct).
///
/// Every field becomes an entry of the record's registry, in declaration
/// order, and must implement `Codec`. Generic parameters get `'static`
/// bounds and every field type a `Codec` bound.
///
/// ## Field options
///
/// ```rust, ignore
/// #[derive(Record)]
/// struct Sensor {
///     #[record(base)]          // inherit the fields of `Device`, ahead of own fields
///     device: Device,
///     #[record(required)]      // tracked by `RequiredTracker`
///     id: u32,
///     #[record(ignore)]        // neither encoded nor decoded
///     cache: Vec<u8>,
///     #[record(skip_flat)]     // not reachable from flat text
///     calibration: [f32; 4],
///     #[record(rename = "fan-mode")]
///     fan_mode: u8,
///     #[record(@Decimals(2))]  // any `Send + Sync` value as a custom attribute
///     reading: f64,
/// }
/// ```
///
/// Options can be combined in one attribute: `#[record(required, rename = "x")]`.
/// A `base` field takes no other option, there can be only one, and its type
/// must implement `Record`.
///
/// Two fields with the same name are a compile error; a clash with an
/// inherited name panics when the registry is first built.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    record::impl_record(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `Enumerated` and `Codec` for a fieldless enum.
///
/// The representation is taken from `#[repr(..)]` and defaults to `isize`.
#[proc_macro_derive(Enumerated)]
pub fn derive_enumerated(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    enumerated::impl_enumerated(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `SumType` and `Codec` for an enum whose variants are units or
/// hold exactly one value.
///
/// Alternatives are numbered in declaration order. Payload types must
/// implement `Codec` and `Default`.
#[proc_macro_derive(SumType)]
pub fn derive_sum_type(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    sum_type::impl_sum_type(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
