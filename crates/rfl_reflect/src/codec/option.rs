use crate::codec::{Codec, decode_new_with, parse_new};
use crate::load::TreeLoader;
use crate::{DecodeError, Shape, Tree};

/// `None` is `null`. Any other tree decodes into a fresh `T::default()`,
/// so a partial record object does not inherit the previous content.
impl<T: Codec + Default> Codec for Option<T> {
    const SHAPE: Shape = Shape::Optional;

    fn encode(&self) -> Tree {
        match self {
            Some(value) => value.encode(),
            None => Tree::Null,
        }
    }

    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        self.decode_with(tree, &TreeLoader::new())
    }

    fn decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError> {
        *self = match tree {
            Tree::Null => None,
            tree => Some(decode_new_with(tree, loader)?),
        };
        Ok(())
    }

    fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        *self = Some(parse_new(text)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::Codec;

    #[test]
    fn null_clears() {
        let mut v = Some(4u16);
        assert_eq!(v.encode(), json!(4));

        v.decode(&json!(null)).unwrap();
        assert_eq!(v, None);
        assert_eq!(v.encode(), json!(null));

        v.decode(&json!(9)).unwrap();
        assert_eq!(v, Some(9));
    }

    #[test]
    fn failed_decode_keeps_value() {
        let mut v = Some(4u16);
        assert!(v.decode(&json!("x")).is_err());
        assert_eq!(v, Some(4));
    }

    #[test]
    fn text_sets_some() {
        let mut v: Option<String> = None;
        v.parse_text("").unwrap();
        assert_eq!(v.as_deref(), Some(""));
    }
}
