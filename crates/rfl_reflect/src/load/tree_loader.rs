use core::any::type_name;

use crate::dispatch::TreeExclusion;
use crate::load::{FieldInput, RequiredTracker, TreeInput};
use crate::{DecodeError, Record, Shape, Tree};

/// Loads records from tree objects.
///
/// Each key of the object is resolved through the record's dispatch table
/// (fields tagged [`Ignore`](crate::info::Ignore) are unreachable) and its
/// value decoded into the field. Keys that are absent leave their fields
/// untouched, so `{}` always loads. Unknown keys are skipped unless
/// [`deny_unknown_keys`](Self::deny_unknown_keys) is set.
///
/// The settings also apply to nested records, including records held in
/// `Option`, `Box`, collections, maps and tuples (see
/// [`Codec::decode_with`](crate::Codec::decode_with)).
///
/// Loading is not transactional: when a field fails, fields loaded before it
/// keep their new values.
///
/// # Examples
///
/// ```
/// use rfl_reflect::{DecodeError, Record, load::TreeLoader};
/// use serde_json::json;
///
/// #[derive(Record, Default)]
/// struct Point { x: i32, y: i32 }
///
/// let mut p = Point::default();
/// TreeLoader::new().load(&mut p, &json!({ "y": 2, "z": 3 })).unwrap();
/// assert_eq!((p.x, p.y), (0, 2));
///
/// let strict = TreeLoader::new().deny_unknown_keys(true);
/// let err = strict.load(&mut p, &json!({ "z": 3 })).unwrap_err();
/// assert_eq!(err, DecodeError::UnknownField { name: "z".into() });
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeLoader {
    deny_unknown_keys: bool,
}

impl TreeLoader {
    #[inline]
    pub const fn new() -> Self {
        Self {
            deny_unknown_keys: false,
        }
    }

    /// Fail with [`DecodeError::UnknownField`] on keys that name no
    /// reachable field.
    #[inline]
    pub const fn deny_unknown_keys(mut self, deny: bool) -> Self {
        self.deny_unknown_keys = deny;
        self
    }

    /// Loads `tree` into `record`.
    pub fn load<R: Record>(&self, record: &mut R, tree: &Tree) -> Result<(), DecodeError> {
        self.load_with(record, tree, None)
    }

    /// Loads `tree` into `record`, reporting populated required fields to
    /// `tracker`.
    pub fn load_tracked<R: Record>(
        &self,
        record: &mut R,
        tree: &Tree,
        tracker: &mut RequiredTracker<R>,
    ) -> Result<(), DecodeError> {
        self.load_with(record, tree, Some(tracker))
    }

    fn load_with<R: Record>(
        &self,
        record: &mut R,
        tree: &Tree,
        mut tracker: Option<&mut RequiredTracker<R>>,
    ) -> Result<(), DecodeError> {
        let Tree::Object(object) = tree else {
            return Err(DecodeError::shape_mismatch(Shape::Record, tree));
        };

        let registry = R::registry();
        for (key, value) in object {
            let Some(field) = registry.find::<TreeExclusion>(key) else {
                if self.deny_unknown_keys {
                    return Err(DecodeError::UnknownField { name: key.clone() });
                }
                log::trace!("skipping unknown key `{key}` for {}", type_name::<R>());
                continue;
            };

            let input = TreeInput { tree: value, loader: self };
            match tracker.as_deref_mut() {
                Some(tracker) => tracker.handle(field, record, input)?,
                None => input.apply_to(field.name(), field.get_mut(record))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::load::TreeLoader;
    use crate::{Codec, DecodeError, Record, Shape, TreeKind};

    #[derive(Record, Default, Debug, PartialEq)]
    struct Knobs {
        level: u8,
        #[record(ignore)]
        scratch: u8,
        #[record(skip_flat)]
        label: String,
    }

    #[test]
    fn ignored_fields_are_invisible() {
        let mut knobs = Knobs {
            scratch: 5,
            ..Knobs::default()
        };
        assert_eq!(knobs.encode(), json!({ "level": 0, "label": "" }));

        TreeLoader::new()
            .load(&mut knobs, &json!({ "scratch": 9, "label": "x" }))
            .unwrap();
        assert_eq!(knobs.scratch, 5);
        assert_eq!(knobs.label, "x");

        let strict = TreeLoader::new().deny_unknown_keys(true);
        assert!(strict.load(&mut knobs, &json!({ "scratch": 9 })).is_err());
    }

    #[derive(Record, Default, Debug)]
    struct Panel {
        knobs: Knobs,
        spare: Option<Box<Knobs>>,
        banks: Vec<Knobs>,
    }

    #[test]
    fn strictness_reaches_nested_records() {
        let strict = TreeLoader::new().deny_unknown_keys(true);
        let mut panel = Panel::default();

        let err = strict
            .load(&mut panel, &json!({ "knobs": { "bogus": 1 } }))
            .unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("knobs"));
        assert_eq!(err.root(), &DecodeError::UnknownField { name: "bogus".into() });

        assert!(strict.load(&mut panel, &json!({ "spare": { "bogus": 1 } })).is_err());
        assert!(
            strict
                .load(&mut panel, &json!({ "banks": [{ "level": 1 }, { "bogus": 1 }] }))
                .is_err()
        );

        TreeLoader::new()
            .load(&mut panel, &json!({ "knobs": { "bogus": 1, "level": 3 } }))
            .unwrap();
        assert_eq!(panel.knobs.level, 3);
    }

    #[test]
    fn non_object_is_rejected() {
        let mut knobs = Knobs::default();
        assert_eq!(
            knobs.decode(&json!([1])),
            Err(DecodeError::ShapeMismatch {
                expected: Shape::Record,
                found: TreeKind::Array,
            })
        );
        assert!(knobs.decode(&json!(null)).is_err());
    }

    #[test]
    fn no_rollback() {
        let mut knobs = Knobs::default();
        let err = knobs
            .decode(&json!({ "label": "kept", "level": 300 }))
            .unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("level"));
        assert!(matches!(err.root(), DecodeError::OutOfRange { .. }));
        assert_eq!(knobs.label, "kept");
    }

    #[test]
    fn dashed_keys_resolve() {
        #[derive(Record, Default)]
        struct Fan {
            fan_mode: u8,
        }

        let mut fan = Fan::default();
        fan.decode(&json!({ "fan-mode": 2 })).unwrap();
        assert_eq!(fan.fan_mode, 2);
    }
}
