#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use rfl_reflect as reflect;
pub use rfl_utils as utils;
