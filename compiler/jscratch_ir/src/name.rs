//! Interned identifier handle.

use std::fmt;

/// Interned string identifier.
///
/// A `Name` is only meaningful together with the [`StringInterner`](crate::StringInterner)
/// that produced it. Equality is a single `u32` compare.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Pre-interned `this`.
    pub const THIS: Name = Name(1);

    /// Pre-interned `length` (array length pseudo-field).
    pub const LENGTH: Name = Name(2);

    /// Names every interner reserves, in index order.
    pub(crate) const RESERVED: [&'static str; 3] = ["", "this", "length"];

    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Raw index into the interner.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index as `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}
