//! String interner for identifiers and lexemes.
//!
//! Provides O(1) interning and lookup with thread-safe access via an
//! `RwLock`. Interned strings are leaked, so lookups can hand out
//! `'static` references.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// The interner exceeded `u32::MAX` distinct strings.
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {} strings, max is {}",
                count,
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

struct InternInner {
    /// Map from string content to index in `strings`.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw()`.
    strings: Vec<&'static str>,
}

/// String interner.
///
/// Index assignment is insertion-ordered, so two interners fed identical
/// intern sequences produce identical [`Name`] values. One interner may be
/// shared by reference across any number of lexer instances.
///
/// # Thread Safety
/// Uses an `RwLock` for concurrent read/write access.
pub struct StringInterner {
    inner: RwLock<InternInner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at
    /// [`Name::EMPTY`].
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            inner: RwLock::new(InternInner {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Try to intern a string, returning its [`Name`] or an error on
    /// overflow.
    #[inline]
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        // Fast path: already interned.
        {
            let guard = self.inner.read();
            if let Some(&idx) = guard.map.get(s) {
                return Ok(Name::from_raw(idx));
            }
        }

        let mut guard = self.inner.write();

        // Double-check after acquiring the write lock.
        if let Some(&idx) = guard.map.get(s) {
            return Ok(Name::from_raw(idx));
        }

        // Leak the string to get a 'static lifetime.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());

        let idx = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);

        Ok(Name::from_raw(idx))
    }

    /// Intern a string, returning its [`Name`].
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` distinct strings. Use
    /// [`StringInterner::try_intern`] for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Intern an owned `String`, avoiding the extra allocation `intern`
    /// would perform for a not-yet-interned string.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` distinct strings.
    pub fn intern_owned(&self, s: String) -> Name {
        {
            let guard = self.inner.read();
            if let Some(&idx) = guard.map.get(s.as_str()) {
                return Name::from_raw(idx);
            }
        }

        let mut guard = self.inner.write();
        if let Some(&idx) = guard.map.get(s.as_str()) {
            return Name::from_raw(idx);
        }

        let leaked: &'static str = Box::leak(s.into_boxed_str());
        let idx = u32::try_from(guard.strings.len()).unwrap_or_else(|_| {
            panic!(
                "{}",
                InternError::Overflow {
                    count: guard.strings.len(),
                }
            )
        });
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);

        Name::from_raw(idx)
    }

    /// Look up the string for a [`Name`].
    ///
    /// # Panics
    /// Panics if the `Name` was not produced by this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.inner.read();
        guard.strings[name.raw() as usize]
    }

    /// Get the number of interned strings.
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Check if the interner holds only the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
