use core::fmt;
use core::marker::PhantomData;

use fixedbitset::FixedBitSet;

use crate::info::FieldInfo;
use crate::load::FieldInput;
use crate::{DecodeError, Record};

/// Records which required fields of `R` a load has populated.
///
/// A tracker belongs to one load session. It can be threaded through several
/// loads of the same instance, a tree load followed by flat overrides for
/// example, before the final [`check`](Self::check).
///
/// # Examples
///
/// ```
/// use rfl_reflect::{Record, load::{RequiredTracker, TreeLoader}};
/// use serde_json::json;
///
/// #[derive(Record, Default)]
/// struct Conn {
///     #[record(required)]
///     host: String,
///     #[record(required)]
///     port: u16,
///     timeout: u32,
/// }
///
/// let mut conn = Conn::default();
/// let mut tracker = RequiredTracker::new();
///
/// TreeLoader::new()
///     .load_tracked(&mut conn, &json!({ "host": "db", "timeout": 5 }), &mut tracker)
///     .unwrap();
/// assert!(!tracker.seen_all());
/// assert_eq!(tracker.check().unwrap_err().to_string(), "missing required fields: port");
///
/// TreeLoader::new()
///     .load_tracked(&mut conn, &json!({ "port": 5432 }), &mut tracker)
///     .unwrap();
/// assert!(tracker.seen_all());
/// ```
pub struct RequiredTracker<R> {
    seen: FixedBitSet,
    seen_count: usize,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> RequiredTracker<R> {
    /// Creates a tracker sized to the fields of `R`, nothing seen yet.
    pub fn new() -> Self {
        Self {
            seen: FixedBitSet::with_capacity(R::registry().len()),
            seen_count: 0,
            _marker: PhantomData,
        }
    }

    /// Loads `input` into `field` of `record` and, on success, marks the
    /// field as seen if it is required.
    ///
    /// The load result is returned unchanged; a failed load marks nothing.
    pub fn handle(
        &mut self,
        field: &FieldInfo<R>,
        record: &mut R,
        input: impl FieldInput,
    ) -> Result<(), DecodeError> {
        input.apply_to(field.name(), field.get_mut(record))?;
        if field.is_required() && !self.seen.put(field.ordinal()) {
            self.seen_count += 1;
        }
        Ok(())
    }

    /// Number of distinct required fields seen.
    #[inline]
    pub fn seen_count(&self) -> usize {
        self.seen_count
    }

    /// Returns `true` once every required field has been seen.
    #[inline]
    pub fn seen_all(&self) -> bool {
        self.seen_count == R::registry().required_count()
    }

    /// Returns `true` if the field at `ordinal` is required and was seen.
    #[inline]
    pub fn is_seen(&self, ordinal: usize) -> bool {
        self.seen.contains(ordinal)
    }

    /// Required fields not seen yet, in ordinal order.
    pub fn missing(&self) -> impl Iterator<Item = &'static FieldInfo<R>> + '_ {
        R::registry()
            .iter()
            .filter(|field| field.is_required() && !self.seen.contains(field.ordinal()))
    }

    /// Fails with [`DecodeError::MissingRequired`] unless every required
    /// field was seen.
    pub fn check(&self) -> Result<(), DecodeError> {
        if self.seen_all() {
            return Ok(());
        }
        Err(DecodeError::MissingRequired {
            fields: self.missing().map(FieldInfo::name).collect(),
        })
    }

    /// Forgets everything seen so far.
    pub fn reset(&mut self) {
        self.seen.clear();
        self.seen_count = 0;
    }
}

impl<R: Record> Default for RequiredTracker<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for RequiredTracker<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequiredTracker")
            .field("seen", &self.seen.ones().collect::<Vec<_>>())
            .field("seen_count", &self.seen_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::load::{RequiredTracker, TextInput};
    use crate::{DecodeError, Record};

    #[derive(Record, Default)]
    struct Limits {
        #[record(required)]
        low: i32,
        high: i32,
    }

    #[test]
    fn counted_once() {
        let registry = Limits::registry();
        let low = registry.field("low").unwrap();
        let mut limits = Limits::default();
        let mut tracker = RequiredTracker::new();

        assert!(!tracker.seen_all());
        tracker.handle(low, &mut limits, &json!(1)).unwrap();
        tracker.handle(low, &mut limits, TextInput::new("2")).unwrap();
        assert_eq!(tracker.seen_count(), 1);
        assert!(tracker.seen_all());
        assert_eq!(limits.low, 2);
    }

    #[test]
    fn failures_and_optional_fields_mark_nothing() {
        let registry = Limits::registry();
        let mut limits = Limits::default();
        let mut tracker = RequiredTracker::new();

        let err = tracker
            .handle(registry.field("low").unwrap(), &mut limits, &json!("x"))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Field { field: "low", .. }));

        tracker
            .handle(registry.field("high").unwrap(), &mut limits, &json!(9))
            .unwrap();
        assert_eq!(tracker.seen_count(), 0);
        assert_eq!(
            tracker.check(),
            Err(DecodeError::MissingRequired { fields: vec!["low"] })
        );
    }

    #[test]
    fn reset_forgets() {
        let registry = Limits::registry();
        let mut limits = Limits::default();
        let mut tracker = RequiredTracker::new();
        tracker
            .handle(registry.field("low").unwrap(), &mut limits, &json!(1))
            .unwrap();
        tracker.reset();
        assert!(!tracker.seen_all());
        assert!(!tracker.is_seen(0));
    }
}
