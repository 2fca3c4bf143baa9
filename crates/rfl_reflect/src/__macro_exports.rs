//! Paths used by `rfl_reflect_derive` output. Not a public API.

pub use crate::info::{Attributes, NonGenericRegistryCell, GenericRegistryCell, Registry};
pub use crate::load::TreeLoader;
pub use crate::record::{
    assign_record_path, decode_record, decode_record_with, encode_record, parse_record_text,
};
pub use crate::{Codec, DecodeError, Enumerated, Record, Shape, SumType, Tree};

pub mod enumerated {
    pub use crate::codec::enumerated::{decode, encode, parse_text};
}

pub mod sum {
    pub use crate::codec::sum::{decode, encode};
}
