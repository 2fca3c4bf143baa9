use core::fmt;

use crate::dispatch::{NameMatcher, normalize};

/// Normalized field names sorted by byte value, each with its ordinal.
pub struct DispatchTable {
    entries: Box<[(Box<[u8]>, usize)]>,
}

impl DispatchTable {
    /// Builds a table from `(name, ordinal)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if a name contains a NUL byte, which the matcher reserves as
    /// the terminator.
    pub fn new<'a>(names: impl IntoIterator<Item = (&'a str, usize)>) -> Self {
        let mut entries: Vec<(Box<[u8]>, usize)> = names
            .into_iter()
            .map(|(name, ordinal)| {
                assert!(!name.contains('\0'), "field name `{name:?}` contains a NUL byte");
                (name.bytes().map(normalize).collect(), ordinal)
            })
            .collect();

        entries.sort_unstable();

        for pair in entries.windows(2) {
            if pair[0].0 == pair[1].0 {
                log::warn!(
                    "fields {} and {} share the normalized name `{}` and cannot be matched by name",
                    pair[0].1,
                    pair[1].1,
                    String::from_utf8_lossy(&pair[0].0),
                );
            }
        }

        Self {
            entries: entries.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Starts an incremental match over the whole table.
    #[inline]
    pub fn matcher(&self) -> NameMatcher<'_> {
        NameMatcher::new(self)
    }

    /// Resolves `query` to the ordinal of the only name equal to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfl_reflect::dispatch::DispatchTable;
    ///
    /// let table = DispatchTable::new([("a", 0), ("ab", 1), ("a_b", 2)]);
    ///
    /// assert_eq!(table.lookup("a"), Some(0));
    /// assert_eq!(table.lookup("ab"), Some(1));
    /// assert_eq!(table.lookup("a-b"), table.lookup("a_b"));
    /// assert_eq!(table.lookup("c"), None);
    /// assert_eq!(table.lookup(""), None);
    /// ```
    pub fn lookup(&self, query: &str) -> Option<usize> {
        let mut matcher = self.matcher();
        for byte in query.bytes() {
            if !matcher.push(byte) {
                return None;
            }
        }
        matcher.finish()
    }

    /// Normalized names and their ordinals, sorted by name.
    #[inline]
    pub(crate) fn entries(&self) -> &[(Box<[u8]>, usize)] {
        &self.entries
    }

    #[inline]
    pub(crate) fn ordinal_at(&self, row: usize) -> usize {
        self.entries[row].1
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(name, ordinal)| (String::from_utf8_lossy(name), ordinal)),
            )
            .finish()
    }
}
