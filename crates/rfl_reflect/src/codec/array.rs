use crate::codec::{Codec, expect_exact};
use crate::load::TreeLoader;
use crate::{DecodeError, Shape, Tree};

/// Elements are decoded in place; the tree must hold exactly `N` of them.
impl<T: Codec, const N: usize> Codec for [T; N] {
    const SHAPE: Shape = Shape::FixedSequence;

    fn encode(&self) -> Tree {
        Tree::Array(self.iter().map(Codec::encode).collect())
    }

    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        self.decode_with(tree, &TreeLoader::new())
    }

    fn decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError> {
        let items = expect_exact(tree, Self::SHAPE, N)?;
        self.iter_mut()
            .zip(items)
            .try_for_each(|(slot, item)| slot.decode_with(item, loader))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Codec, DecodeError};

    #[test]
    fn exact_length() {
        let mut v = [0u8; 3];
        v.decode(&json!([1, 2, 3])).unwrap();
        assert_eq!(v, [1, 2, 3]);
        assert_eq!(v.encode(), json!([1, 2, 3]));

        assert_eq!(
            v.decode(&json!([1, 2])),
            Err(DecodeError::LengthMismatch { expected: 3, found: 2 })
        );
        assert!(v.parse_text("1").is_err());
    }
}
