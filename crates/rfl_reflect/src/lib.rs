#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate through `::rfl_reflect`, which has to
// resolve inside the crate as well (unit tests, doc tests, `Empty`).
extern crate self as rfl_reflect;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod record;
mod reflection;
mod shape;

pub mod codec;
pub mod dispatch;
pub mod info;
pub mod load;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use codec::{Codec, Enumerated, SumType};
pub use error::DecodeError;
pub use record::{Empty, Record, count, enumerate};
pub use reflection::Reflect;
pub use shape::{Shape, Tree, TreeKind};

pub use rfl_reflect_derive as derive;
pub use rfl_reflect_derive::{Enumerated, Record, SumType};
