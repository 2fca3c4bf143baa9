use core::hash::{BuildHasher, Hash};
use std::collections::BTreeMap;

use crate::codec::{Codec, decode_new_with, expect_array};
use crate::load::TreeLoader;
use crate::{DecodeError, Shape, Tree};

/// Decodes one `[key, value]` element.
fn decode_entry<K, V>(entry: &Tree, loader: &TreeLoader) -> Result<(K, V), DecodeError>
where
    K: Codec + Default,
    V: Codec + Default,
{
    match entry {
        Tree::Array(pair) => match pair.as_slice() {
            [key, value] => Ok((decode_new_with(key, loader)?, decode_new_with(value, loader)?)),
            _ => Err(DecodeError::MalformedEntry),
        },
        _ => Err(DecodeError::MalformedEntry),
    }
}

// Maps are arrays of `[key, value]` arrays, so keys are not limited to
// strings. Decoding clears the map and re-inserts every entry; later
// duplicates win.
macro_rules! impl_codec_for_map {
    ($ty:path, [$($bound:tt)*] $(, $state:ident)?) => {
        impl<K, V $(, $state)?> Codec for $ty
        where
            K: Codec + Default + $($bound)*,
            V: Codec + Default,
            $($state: BuildHasher + Default + 'static,)?
        {
            const SHAPE: Shape = Shape::Map;

            fn encode(&self) -> Tree {
                Tree::Array(
                    self.iter()
                        .map(|(key, value)| Tree::Array(vec![key.encode(), value.encode()]))
                        .collect(),
                )
            }

            fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
                self.decode_with(tree, &TreeLoader::new())
            }

            fn decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError> {
                let entries = expect_array(tree, Self::SHAPE)?;
                self.clear();
                for entry in entries {
                    let (key, value) = decode_entry(entry, loader)?;
                    self.insert(key, value);
                }
                Ok(())
            }
        }
    };
}

impl_codec_for_map!(BTreeMap<K, V>, [Ord]);
impl_codec_for_map!(std::collections::HashMap<K, V, S>, [Eq + Hash], S);
impl_codec_for_map!(rfl_utils::hash::HashMap<K, V, S>, [Eq + Hash], S);

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use serde_json::json;

    use crate::{Codec, DecodeError};

    #[test]
    fn pairs_of_key_and_value() {
        let map = BTreeMap::from([(1u8, "x".to_owned()), (2, "y".to_owned())]);
        assert_eq!(map.encode(), json!([[1, "x"], [2, "y"]]));

        let mut back = BTreeMap::new();
        back.decode(&json!([[2, "y"], [1, "x"]])).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn decode_clears_first() {
        let mut map = HashMap::from([("stale".to_owned(), 0u32)]);
        map.decode(&json!([["fresh", 1]])).unwrap();
        assert_eq!(map, HashMap::from([("fresh".to_owned(), 1)]));
    }

    #[test]
    fn malformed_entries() {
        let mut map: rfl_utils::hash::HashMap<u8, u8> = Default::default();
        assert_eq!(map.decode(&json!([[1]])), Err(DecodeError::MalformedEntry));
        assert_eq!(map.decode(&json!([3])), Err(DecodeError::MalformedEntry));
        assert!(matches!(map.decode(&json!({"1": 2})), Err(DecodeError::ShapeMismatch { .. })));
        assert!(map.parse_text("1").is_err());
    }
}
