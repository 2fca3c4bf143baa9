use crate::codec::{Codec, expect_exact};
use crate::load::TreeLoader;
use crate::{DecodeError, Reflect, Shape, Tree};

macro_rules! impl_codec_for_tuple {
    ($($ty:ident $var:ident),*) => {
        impl<$($ty: Codec),*> Codec for ($($ty,)*) {
            const SHAPE: Shape = Shape::Tuple;

            fn encode(&self) -> Tree {
                let ($($var,)*) = self;
                Tree::Array(vec![$($var.encode()),*])
            }

            fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
                self.decode_with(tree, &TreeLoader::new())
            }

            fn decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError> {
                let ($($var,)*) = self;
                let slots: &mut [&mut dyn Reflect] = &mut [$($var),*];
                let items = expect_exact(tree, Self::SHAPE, slots.len())?;
                slots
                    .iter_mut()
                    .zip(items)
                    .try_for_each(|(slot, item)| slot.reflect_decode_with(item, loader))
            }
        }
    };
}

rfl_utils::range_invoke!(
    impl_codec_for_tuple,
    [
        T0 t0, T1 t1, T2 t2, T3 t3, T4 t4, T5 t5,
        T6 t6, T7 t7, T8 t8, T9 t9, T10 t10, T11 t11
    ]
);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Codec, DecodeError};

    #[test]
    fn unit_is_empty_array() {
        let mut unit = ();
        assert_eq!(unit.encode(), json!([]));
        unit.decode(&json!([])).unwrap();
        assert!(unit.decode(&json!([1])).is_err());
    }

    #[test]
    fn arity_is_checked() {
        let mut t = (0u8, false, String::new());
        t.decode(&json!([1, true, "s"])).unwrap();
        assert_eq!(t, (1, true, "s".to_owned()));
        assert_eq!(
            t.decode(&json!([1, true])),
            Err(DecodeError::LengthMismatch { expected: 3, found: 2 })
        );
    }
}
