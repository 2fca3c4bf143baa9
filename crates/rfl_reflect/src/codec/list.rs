use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeSet, LinkedList, VecDeque};

use crate::codec::{Codec, decode_new_with, expect_array, parse_new};
use crate::load::TreeLoader;
use crate::{DecodeError, Shape, Tree};

// -----------------------------------------------------------------------------
// Sequences

// Decoding clears the sequence and appends every element in tree order.
// Flat text appends a single element, so a repeated option accumulates.
macro_rules! impl_codec_for_sequence {
    ($ty:ident, $push:ident) => {
        impl<T: Codec + Default> Codec for $ty<T> {
            const SHAPE: Shape = Shape::Sequence;

            fn encode(&self) -> Tree {
                Tree::Array(self.iter().map(Codec::encode).collect())
            }

            fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
                self.decode_with(tree, &TreeLoader::new())
            }

            fn decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError> {
                let items = expect_array(tree, Self::SHAPE)?;
                self.clear();
                for item in items {
                    self.$push(decode_new_with(item, loader)?);
                }
                Ok(())
            }

            fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
                self.$push(parse_new(text)?);
                Ok(())
            }
        }
    };
}

impl_codec_for_sequence!(Vec, push);
impl_codec_for_sequence!(VecDeque, push_back);
impl_codec_for_sequence!(LinkedList, push_back);

// -----------------------------------------------------------------------------
// Sets

// Same as sequences, with duplicates collapsing on insert.
macro_rules! impl_codec_for_set {
    ($ty:path, [$($bound:tt)*] $(, $state:ident)?) => {
        impl<T $(, $state)?> Codec for $ty
        where
            T: Codec + Default + $($bound)*,
            $($state: BuildHasher + Default + 'static,)?
        {
            const SHAPE: Shape = Shape::Set;

            fn encode(&self) -> Tree {
                Tree::Array(self.iter().map(Codec::encode).collect())
            }

            fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
                self.decode_with(tree, &TreeLoader::new())
            }

            fn decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError> {
                let items = expect_array(tree, Self::SHAPE)?;
                self.clear();
                for item in items {
                    self.insert(decode_new_with(item, loader)?);
                }
                Ok(())
            }

            fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
                self.insert(parse_new(text)?);
                Ok(())
            }
        }
    };
}

impl_codec_for_set!(BTreeSet<T>, [Ord]);
impl_codec_for_set!(std::collections::HashSet<T, S>, [Eq + Hash], S);
impl_codec_for_set!(rfl_utils::hash::HashSet<T, S>, [Eq + Hash], S);

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};

    use serde_json::json;

    use crate::{Codec, DecodeError};

    #[test]
    fn decode_replaces_content() {
        let mut v = vec![9u8, 9, 9];
        v.decode(&json!([1, 2])).unwrap();
        assert_eq!(v, [1, 2]);

        let mut q = VecDeque::from([5i32]);
        q.decode(&json!([])).unwrap();
        assert!(q.is_empty());

        let mut l: LinkedList<String> = LinkedList::new();
        l.decode(&json!(["a", "b"])).unwrap();
        assert_eq!(l.encode(), json!(["a", "b"]));
    }

    #[test]
    fn text_appends() {
        let mut v: Vec<u16> = Vec::new();
        v.parse_text("3").unwrap();
        v.parse_text("4").unwrap();
        assert_eq!(v, [3, 4]);
        assert!(matches!(v.parse_text("x"), Err(DecodeError::Parse { .. })));
        assert_eq!(v, [3, 4]);
    }

    #[test]
    fn sets_collapse_duplicates() {
        let mut s: BTreeSet<i32> = BTreeSet::new();
        s.decode(&json!([3, 1, 3, 2])).unwrap();
        assert_eq!(s.encode(), json!([1, 2, 3]));

        let mut h: HashSet<String> = HashSet::new();
        h.decode(&json!(["x", "x"])).unwrap();
        assert_eq!(h.len(), 1);

        let mut fast: rfl_utils::hash::HashSet<u8> = Default::default();
        fast.parse_text("7").unwrap();
        fast.parse_text("7").unwrap();
        assert_eq!(fast.len(), 1);
    }

    #[test]
    fn element_failure_propagates() {
        let mut v: Vec<u8> = Vec::new();
        assert!(v.decode(&json!([1, "two"])).is_err());
    }
}
