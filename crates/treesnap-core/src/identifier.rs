//! Identifier management using string interning for efficient string storage and comparison
//!
//! Focus ids, sprite names and localisation keys are compared and hashed
//! constantly during layout, so they are interned once into [`Id`] values.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use treesnap_core::identifier::Id;
///
/// let focus = Id::new("GER_rhineland");
/// let sprite = Id::new("GFX_goal_unknown");
///
/// assert_eq!(focus, "GER_rhineland");
/// assert_ne!(focus, sprite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns the interned string as an owned `String`.
    pub fn as_string(&self) -> String {
        interner()
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let str_value = self.as_string();
        write!(f, "{str_value}")
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// # Examples
    ///
    /// ```
    /// use treesnap_core::identifier::Id;
    ///
    /// let id: Id = "focus_a".into();
    /// assert_eq!(id, "focus_a");
    /// ```
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner()
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("focus_a");
        let id2 = Id::new("focus_a");
        let id3 = Id::new("focus_b");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "focus_a");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("GFX_focus_can_start");
        assert_eq!(format!("{id}"), "GFX_focus_can_start");
        assert_eq!(id.as_string(), "GFX_focus_can_start");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("POL_intermarium");

        assert!(id == "POL_intermarium");
        assert!(id != "POL");

        let empty = Id::new("");
        assert!(empty == "");
    }
}
