//! Time points and durations as signed 64-bit microseconds.
//!
//! Time points count from the Unix epoch. Sub-microsecond precision is
//! truncated toward zero, values beyond the `i64` range saturate on encode.

use core::any::type_name;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::codec::Codec;
use crate::{DecodeError, Shape, Tree};

fn out_of_range<T>() -> DecodeError {
    DecodeError::OutOfRange {
        type_name: type_name::<T>(),
    }
}

fn saturating_micros(duration: Duration) -> i64 {
    i64::try_from(duration.as_micros()).unwrap_or(i64::MAX)
}

fn micros_from_tree(tree: &Tree) -> Result<i64, DecodeError> {
    let mut micros = 0i64;
    micros.decode(tree)?;
    Ok(micros)
}

fn micros_from_text(text: &str) -> Result<i64, DecodeError> {
    let mut micros = 0i64;
    micros.parse_text(text)?;
    Ok(micros)
}

// Implements `decode` and `parse_text` through `from_micros`.
macro_rules! impl_micros_loaders {
    ($ty:ty, $from_micros:path) => {
        fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
            *self = $from_micros(micros_from_tree(tree)?).ok_or_else(out_of_range::<$ty>)?;
            Ok(())
        }

        fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
            *self = $from_micros(micros_from_text(text)?).ok_or_else(out_of_range::<$ty>)?;
            Ok(())
        }
    };
}

// -----------------------------------------------------------------------------
// std

fn system_time_from_micros(micros: i64) -> Option<SystemTime> {
    let offset = Duration::from_micros(micros.unsigned_abs());
    if micros >= 0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    }
}

/// Negative values encode instants before the epoch.
impl Codec for SystemTime {
    const SHAPE: Shape = Shape::Time;

    fn encode(&self) -> Tree {
        let micros = match self.duration_since(UNIX_EPOCH) {
            Ok(after) => saturating_micros(after),
            Err(before) => saturating_micros(before.duration()).saturating_neg(),
        };
        Tree::from(micros)
    }

    impl_micros_loaders!(SystemTime, system_time_from_micros);
}

fn duration_from_micros(micros: i64) -> Option<Duration> {
    u64::try_from(micros).ok().map(Duration::from_micros)
}

/// Negative values fail to decode.
impl Codec for Duration {
    const SHAPE: Shape = Shape::Time;

    fn encode(&self) -> Tree {
        Tree::from(saturating_micros(*self))
    }

    impl_micros_loaders!(Duration, duration_from_micros);
}

// -----------------------------------------------------------------------------
// chrono

#[cfg(feature = "chrono")]
mod chrono_impls {
    use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

    use super::{micros_from_text, micros_from_tree, out_of_range};
    use crate::codec::Codec;
    use crate::{DecodeError, Shape, Tree};

    fn naive_from_micros(micros: i64) -> Option<NaiveDateTime> {
        DateTime::from_timestamp_micros(micros).map(|utc| utc.naive_utc())
    }

    fn delta_from_micros(micros: i64) -> Option<TimeDelta> {
        Some(TimeDelta::microseconds(micros))
    }

    // `num_microseconds` truncates toward zero, `timestamp_micros` floors.
    fn saturating_delta_micros(delta: TimeDelta) -> i64 {
        delta.num_microseconds().unwrap_or(if delta < TimeDelta::zero() {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    fn utc_micros(at: DateTime<Utc>) -> i64 {
        saturating_delta_micros(at.signed_duration_since(DateTime::UNIX_EPOCH))
    }

    impl Codec for DateTime<Utc> {
        const SHAPE: Shape = Shape::Time;

        fn encode(&self) -> Tree {
            Tree::from(utc_micros(*self))
        }

        impl_micros_loaders!(DateTime<Utc>, DateTime::from_timestamp_micros);
    }

    /// Interpreted as UTC.
    impl Codec for NaiveDateTime {
        const SHAPE: Shape = Shape::Time;

        fn encode(&self) -> Tree {
            Tree::from(utc_micros(self.and_utc()))
        }

        impl_micros_loaders!(NaiveDateTime, naive_from_micros);
    }

    impl Codec for TimeDelta {
        const SHAPE: Shape = Shape::Time;

        fn encode(&self) -> Tree {
            Tree::from(saturating_delta_micros(*self))
        }

        impl_micros_loaders!(TimeDelta, delta_from_micros);
    }

    #[cfg(test)]
    mod tests {
        use std::time::{Duration, UNIX_EPOCH};

        use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
        use serde_json::json;

        use crate::Codec;

        #[test]
        fn chrono_micros() {
            let at = NaiveDate::from_ymd_opt(2001, 9, 9)
                .unwrap()
                .and_hms_micro_opt(1, 46, 40, 5)
                .unwrap();
            assert_eq!(at.encode(), json!(1_000_000_000_000_005i64));

            let mut utc = DateTime::<Utc>::UNIX_EPOCH;
            utc.decode(&json!(1_000_000_000_000_005i64)).unwrap();
            assert_eq!(utc.naive_utc(), at);

            let mut delta = TimeDelta::zero();
            delta.parse_text("-1500").unwrap();
            assert_eq!(delta, TimeDelta::microseconds(-1500));
            assert_eq!(delta.encode(), json!(-1500));
        }

        #[test]
        fn chrono_truncates_like_system_time() {
            let before = DateTime::<Utc>::UNIX_EPOCH - TimeDelta::nanoseconds(1_999);
            let std_before = UNIX_EPOCH - Duration::from_nanos(1_999);
            assert_eq!(before.encode(), json!(-1));
            assert_eq!(before.encode(), std_before.encode());
            assert_eq!(before.naive_utc().encode(), json!(-1));

            let after = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::nanoseconds(1_999);
            assert_eq!(after.encode(), json!(1));
            assert_eq!(TimeDelta::nanoseconds(-1_999).encode(), json!(-1));
        }
    }
}
