use crate::dispatch::FlatExclusion;
use crate::load::{FieldInput, RequiredTracker, TextInput};
use crate::{DecodeError, Record};

/// Loads records from flat `key = value` text, as produced by command-line
/// or environment parsing.
///
/// Keys are dotted paths: every segment but the last must name a nested
/// record field, the last one the field receiving the text. Fields tagged
/// [`Ignore`](crate::info::Ignore) or [`SkipFlat`](crate::info::SkipFlat) are
/// unreachable. How the text is parsed depends on the field's shape:
///
/// - integers in base 10, with the whole text consumed and the range checked
/// - floats in the standard float syntax
/// - `bool` and enums through their integer representation (`0`/`1`)
/// - strings and paths verbatim
/// - `Option<T>` parses `T` and sets `Some`
/// - sequences and sets parse and append one element
/// - time values as integer microseconds
/// - a record consumes `member.value` from the text itself
///
/// # Examples
///
/// ```
/// use rfl_reflect::{Record, load::FlatLoader};
///
/// #[derive(Record, Default)]
/// struct Setpoint { fan_mode: u8, target: f64 }
///
/// #[derive(Record, Default)]
/// struct Thermostat { setpoint: Setpoint, zones: Vec<String> }
///
/// let mut t = Thermostat::default();
/// FlatLoader::assign(&mut t, "setpoint.fan-mode", "1").unwrap();
/// FlatLoader::assign(&mut t, "setpoint", "target.20.5").unwrap();
/// FlatLoader::load_dotted(&mut t, "zones.hall").unwrap();
/// FlatLoader::assign(&mut t, "zones", "attic").unwrap();
///
/// assert_eq!(t.setpoint.fan_mode, 1);
/// assert_eq!(t.setpoint.target, 20.5);
/// assert_eq!(t.zones, ["hall", "attic"]);
///
/// assert!(FlatLoader::assign(&mut t, "setpoint.fan_mode.x", "1").is_err());
/// assert!(FlatLoader::assign(&mut t, "setpoint", "1").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatLoader;

impl FlatLoader {
    /// Loads `text` into the field of `record` at the dotted `path`.
    pub fn assign<R: Record>(record: &mut R, path: &str, text: &str) -> Result<(), DecodeError> {
        Self::assign_with(record, path, text, None)
    }

    /// Like [`assign`](Self::assign), reporting a populated top-level
    /// required field to `tracker`.
    pub fn assign_tracked<R: Record>(
        record: &mut R,
        path: &str,
        text: &str,
        tracker: &mut RequiredTracker<R>,
    ) -> Result<(), DecodeError> {
        Self::assign_with(record, path, text, Some(tracker))
    }

    /// Loads the combined form `path.value`, e.g. `setpoint.fan_mode.1`.
    ///
    /// The first segment names a field of `record`; each record reached
    /// consumes one more segment, and the remainder is the value.
    pub fn load_dotted<R: Record>(record: &mut R, input: &str) -> Result<(), DecodeError> {
        record.parse_text(input)
    }

    fn assign_with<R: Record>(
        record: &mut R,
        path: &str,
        text: &str,
        tracker: Option<&mut RequiredTracker<R>>,
    ) -> Result<(), DecodeError> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        let field = R::registry()
            .find::<FlatExclusion>(head)
            .ok_or_else(|| DecodeError::UnknownField {
                name: head.to_owned(),
            })?;

        let input = TextInput { path: rest, text };
        match tracker {
            Some(tracker) => tracker.handle(field, record, input),
            None => input.apply_to(field.name(), field.get_mut(record)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::load::{FlatLoader, RequiredTracker};
    use crate::{DecodeError, Record};

    #[derive(Record, Default)]
    struct Inner {
        #[record(required)]
        depth: u32,
        #[record(skip_flat)]
        secret: String,
    }

    #[derive(Record, Default)]
    struct Outer {
        inner: Inner,
        #[record(required)]
        verbose: bool,
        retries: Option<u8>,
    }

    #[test]
    fn leaf_and_nested_paths() {
        let mut outer = Outer::default();
        FlatLoader::assign(&mut outer, "verbose", "1").unwrap();
        FlatLoader::assign(&mut outer, "inner.depth", "12").unwrap();
        FlatLoader::assign(&mut outer, "retries", "3").unwrap();
        assert!(outer.verbose);
        assert_eq!(outer.inner.depth, 12);
        assert_eq!(outer.retries, Some(3));
    }

    #[test]
    fn unreachable_and_malformed_paths() {
        let mut outer = Outer::default();
        assert_eq!(
            FlatLoader::assign(&mut outer, "nope", "1"),
            Err(DecodeError::UnknownField { name: "nope".into() })
        );
        assert_eq!(
            FlatLoader::assign(&mut outer, "verbose.x", "1"),
            Err(DecodeError::NotARecord { field: "verbose" })
        );
        assert_eq!(
            FlatLoader::assign(&mut outer, "inner", "7"),
            Err(DecodeError::MissingSegment { field: "inner" })
        );

        let err = FlatLoader::assign(&mut outer, "inner.secret", "x").unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("inner"));
        assert!(matches!(err.root(), DecodeError::UnknownField { name } if name == "secret"));
    }

    #[test]
    fn combined_form() {
        let mut outer = Outer::default();
        FlatLoader::load_dotted(&mut outer, "inner.depth.4").unwrap();
        FlatLoader::assign(&mut outer, "inner", "depth.5").unwrap();
        assert_eq!(outer.inner.depth, 5);
        assert!(matches!(
            FlatLoader::load_dotted(&mut outer, "verbose"),
            Err(DecodeError::Parse { .. })
        ));
    }

    #[test]
    fn tracker_sees_top_level_required() {
        let mut outer = Outer::default();
        let mut tracker = RequiredTracker::new();
        FlatLoader::assign_tracked(&mut outer, "inner.depth", "1", &mut tracker).unwrap();
        assert!(!tracker.seen_all());
        FlatLoader::assign_tracked(&mut outer, "verbose", "0", &mut tracker).unwrap();
        assert!(tracker.seen_all());
        assert!(FlatLoader::assign_tracked(&mut outer, "verbose", "2", &mut tracker).is_err());
    }
}
