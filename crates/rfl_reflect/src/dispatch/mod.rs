//! Field-name dispatch.
//!
//! A [`DispatchTable`] lists the normalized names of a record's fields in
//! byte order. A [`NameMatcher`] narrows the table one query byte at a time
//! and succeeds only when exactly one name equals the whole query.
//! Normalization maps `-` to `_` on both sides, so `fan-mode` finds
//! `fan_mode`.
//!
//! Which fields a table holds is chosen by an [`Exclusion`] set; tables are
//! built lazily and cached per record type and exclusion set, see
//! [`Registry::find`](crate::info::Registry::find).

// -----------------------------------------------------------------------------
// Modules

mod exclusion;
mod matcher;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use exclusion::Exclusion;
pub use matcher::NameMatcher;
pub use table::DispatchTable;

/// Exclusion set used for tree input.
pub type TreeExclusion = (crate::info::Ignore,);

/// Exclusion set used for flat text input.
pub type FlatExclusion = (crate::info::Ignore, crate::info::SkipFlat);

#[inline]
pub(crate) const fn normalize(byte: u8) -> u8 {
    if byte == b'-' { b'_' } else { byte }
}
