//! String interner for identifier and string-literal storage.
//!
//! Provides O(1) interning and lookup. Interned strings live for the
//! process lifetime, which lets lookups hand out plain `&str` without a
//! guard. One interner is created per run and threaded through the
//! pipeline explicitly.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

struct Inner {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<&'static str>,
}

/// String interner.
///
/// Interning the same text twice returns the same [`Name`]. Lookup is an
/// index into the string table.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            inner: RwLock::new(Inner {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&idx) = self.inner.read().map.get(s) {
            return Name::from_raw(idx);
        }

        let mut inner = self.inner.write();
        // Re-check under the write lock: another caller may have interned
        // the string between the read and write acquisitions.
        if let Some(&idx) = inner.map.get(s) {
            return Name::from_raw(idx);
        }

        let idx = u32::try_from(inner.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded {} strings", u32::MAX));
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        inner.map.insert(leaked, idx);
        inner.strings.push(leaked);
        Name::from_raw(idx)
    }

    /// Look up the text of an interned name.
    ///
    /// # Panics
    /// Panics if `name` did not come from this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.inner.read().strings[name.index()]
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Whether the interner holds only the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedup() {
        let interner = StringInterner::new();
        let a = interner.intern("person");
        let b = interner.intern("person");
        let c = interner.intern("car");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_lookup_roundtrip() {
        let interner = StringInterner::new();
        let name = interner.intern("do_work");
        assert_eq!(interner.lookup(name), "do_work");
    }

    #[test]
    fn test_empty_pre_interned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }
}
