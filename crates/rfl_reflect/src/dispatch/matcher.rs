use core::ops::Range;

use crate::dispatch::{DispatchTable, normalize};

/// An incremental, narrowing match of one query against a [`DispatchTable`].
///
/// The matcher keeps the contiguous range of rows whose names start with the
/// bytes pushed so far. Each [`push`](Self::push) binary-searches inside that
/// range only, so the range never grows. [`finish`](Self::finish) matches the
/// implicit terminator.
///
/// # Examples
///
/// ```
/// use rfl_reflect::dispatch::DispatchTable;
///
/// let table = DispatchTable::new([("fan_mode", 0), ("fan_speed", 1), ("target", 2)]);
/// let mut matcher = table.matcher();
///
/// assert!(matcher.push(b'f'));
/// assert_eq!(matcher.remaining(), 2);
/// for byte in *b"an-mode" {
///     matcher.push(byte);
/// }
/// assert_eq!(matcher.finish(), Some(0));
///
/// matcher.reset();
/// assert!(!matcher.push(b'x'));
/// assert_eq!(matcher.finish(), None);
/// ```
#[derive(Debug, Clone)]
pub struct NameMatcher<'a> {
    table: &'a DispatchTable,
    rows: Range<usize>,
    depth: usize,
}

impl<'a> NameMatcher<'a> {
    #[inline]
    pub fn new(table: &'a DispatchTable) -> Self {
        Self {
            table,
            rows: 0..table.len(),
            depth: 0,
        }
    }

    /// Starts over with the whole table.
    #[inline]
    pub fn reset(&mut self) {
        self.rows = 0..self.table.len();
        self.depth = 0;
    }

    /// Number of rows still matching.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    /// Narrows to the rows whose next byte is `byte` (after normalization).
    ///
    /// Returns `false` once no row is left. A NUL byte never matches.
    pub fn push(&mut self, byte: u8) -> bool {
        if byte == 0 {
            self.rows = self.rows.start..self.rows.start;
        } else {
            self.narrow(normalize(byte));
        }
        self.depth += 1;
        !self.rows.is_empty()
    }

    /// Matches the terminator: the query is found iff exactly one remaining
    /// row ends here. Returns that row's ordinal.
    pub fn finish(&self) -> Option<usize> {
        let mut end = self.clone();
        end.narrow(0);
        match end.rows.len() {
            1 => Some(self.table.ordinal_at(end.rows.start)),
            _ => None,
        }
    }

    // Rows in range share their first `depth` bytes and are sorted, so their
    // bytes at `depth` are sorted too. A name that ends reads as 0 and sorts
    // before any longer name.
    fn narrow(&mut self, byte: u8) {
        let Range { start, end } = self.rows;
        let depth = self.depth;
        let key = |(name, _): &(Box<[u8]>, usize)| name.get(depth).copied().unwrap_or(0);

        let rows = &self.table.entries()[start..end];
        let lo = rows.partition_point(|row| key(row) < byte);
        let hi = rows.partition_point(|row| key(row) <= byte);
        self.rows = start + lo..start + hi;
    }
}

#[cfg(test)]
mod tests {
    use crate::dispatch::DispatchTable;

    #[test]
    fn prefix_is_not_a_match() {
        let table = DispatchTable::new([("a", 0), ("ab", 1)]);
        assert_eq!(table.lookup("a"), Some(0));
        assert_eq!(table.lookup("ab"), Some(1));
        assert_eq!(table.lookup("abc"), None);
        assert_eq!(table.lookup("c"), None);
    }

    #[test]
    fn dashes_match_underscores() {
        let table = DispatchTable::new([("fan_mode", 4), ("fan-speed", 7)]);
        assert_eq!(table.lookup("fan-mode"), Some(4));
        assert_eq!(table.lookup("fan_speed"), Some(7));
    }

    #[test]
    fn range_only_shrinks() {
        let table = DispatchTable::new([("b", 0), ("ba", 1), ("bb", 2), ("c", 3)]);
        let mut matcher = table.matcher();
        let mut last = matcher.remaining();
        for byte in *b"bab" {
            matcher.push(byte);
            assert!(matcher.remaining() <= last);
            last = matcher.remaining();
        }
        assert_eq!(last, 0);
        assert_eq!(matcher.finish(), None);
    }

    #[test]
    fn narrows_inside_the_current_range() {
        let names = ["a", "ba", "bab", "bac", "bb", "bba", "c", "ca"];
        let table = DispatchTable::new(names.iter().copied().zip(0..));
        for (ordinal, name) in names.iter().enumerate() {
            assert_eq!(table.lookup(name), Some(ordinal));
        }

        let mut matcher = table.matcher();
        matcher.push(b'b');
        assert_eq!(matcher.remaining(), 5);
        matcher.push(b'a');
        assert_eq!(matcher.remaining(), 3);
        assert_eq!(matcher.finish(), Some(1));
        matcher.push(b'c');
        assert_eq!(matcher.finish(), Some(3));
    }

    #[test]
    fn nul_and_empty_never_match() {
        let table = DispatchTable::new([("a", 0)]);
        assert_eq!(table.lookup("a\0"), None);
        assert_eq!(table.lookup(""), None);
        assert_eq!(DispatchTable::new([]).lookup("a"), None);
    }

    #[test]
    fn colliding_names_are_ambiguous() {
        let table = DispatchTable::new([("a_b", 0), ("a-b", 1), ("c", 2)]);
        assert_eq!(table.lookup("a_b"), None);
        assert_eq!(table.lookup("c"), Some(2));
    }
}
