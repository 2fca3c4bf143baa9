use crate::codec::Codec;
use crate::load::TreeLoader;
use crate::{DecodeError, Shape, Tree};

impl<T: Codec> Codec for Box<T> {
    const SHAPE: Shape = T::SHAPE;

    #[inline]
    fn encode(&self) -> Tree {
        (**self).encode()
    }

    #[inline]
    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        (**self).decode(tree)
    }

    #[inline]
    fn decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError> {
        (**self).decode_with(tree, loader)
    }

    #[inline]
    fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        (**self).parse_text(text)
    }

    #[inline]
    fn assign_path(&mut self, path: &str, text: &str) -> Result<(), DecodeError> {
        (**self).assign_path(path, text)
    }
}
