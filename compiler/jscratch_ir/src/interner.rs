//! String interner shared between the front end and the interpreter.
//!
//! The resolver interns every identifier it annotates; the interpreter only
//! looks names up (for error messages, property names and host dispatch).

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Backing storage guarded by the interner lock.
struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw()`.
    strings: Vec<&'static str>,
}

/// String interner with O(1) lookup in both directions.
///
/// Interned strings are leaked to get a `'static` lifetime; an interner lives
/// as long as the editing session that owns it.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

/// Interner shared by reference count.
pub type SharedInterner = Arc<StringInterner>;

impl StringInterner {
    /// Create an interner with the reserved names pre-interned.
    pub fn new() -> Self {
        let mut table = InternTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        for (index, &s) in Name::RESERVED.iter().enumerate() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "reserved table has three entries"
            )]
            let index = index as u32;
            table.map.insert(s, index);
            table.strings.push(s);
        }
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// Create a shared interner.
    pub fn shared() -> SharedInterner {
        Arc::new(Self::new())
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&index) = self.table.read().map.get(s) {
            return Name::from_raw(index);
        }

        let mut table = self.table.write();
        // Another writer may have won the race.
        if let Some(&index) = table.map.get(s) {
            return Name::from_raw(index);
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let index = u32::try_from(table.strings.len())
            .unwrap_or_else(|_| panic!("string interner exceeded u32::MAX entries"));
        table.strings.push(leaked);
        table.map.insert(leaked, index);
        Name::from_raw(index)
    }

    /// Look up the string for a Name.
    ///
    /// Unknown names (from a different interner) resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the reserved ones.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Always false: reserved names are interned on construction.
    pub fn is_empty(&self) -> bool {
        false
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
    fn reserved_names_are_preinterned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern("this"), Name::THIS);
        assert_eq!(interner.intern("length"), Name::LENGTH);
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::THIS), "this");
    }

    #[test]
    fn intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("counter");
        let b = interner.intern("counter");
        assert_eq!(a, b);
        assert_eq!(interner.lookup(a), "counter");
        assert_eq!(interner.len(), Name::RESERVED.len() + 1);
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        assert_ne!(interner.intern("x"), interner.intern("y"));
    }

    #[test]
    fn foreign_name_resolves_to_empty() {
        let interner = StringInterner::new();
        assert_eq!(interner.lookup(Name::from_raw(9_999)), "");
    }
}
