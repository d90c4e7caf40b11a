//! Localised display text.

use std::collections::HashMap;

use crate::identifier::Id;

/// Localised strings keyed by language (`l_english`) and key.
#[derive(Debug, Clone, Default)]
pub struct LocalisationTable {
    languages: HashMap<String, HashMap<Id, String>>,
}

impl LocalisationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value; a later insert for the same key replaces the earlier one.
    pub fn insert(&mut self, language: &str, key: Id, value: impl Into<String>) {
        self.languages
            .entry(language.to_string())
            .or_default()
            .insert(key, value.into());
    }

    pub fn get(&self, language: &str, key: Id) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|entries| entries.get(&key))
            .map(String::as_str)
    }

    /// Returns the localised value or the raw key when it is absent.
    pub fn resolve(&self, language: &str, key: Id) -> String {
        self.get(language, key)
            .map(str::to_string)
            .unwrap_or_else(|| key.as_string())
    }

    /// Moves every entry of `other` into this table, `other` winning.
    pub fn merge(&mut self, other: LocalisationTable) {
        for (language, entries) in other.languages {
            self.languages.entry(language).or_default().extend(entries);
        }
    }

    /// Returns the number of entries for `language`.
    pub fn len(&self, language: &str) -> usize {
        self.languages.get(language).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_key() {
        let mut table = LocalisationTable::new();
        table.insert("l_english", Id::new("GER_rhineland"), "Reoccupy the Rhineland");

        assert_eq!(
            table.resolve("l_english", Id::new("GER_rhineland")),
            "Reoccupy the Rhineland"
        );
        assert_eq!(table.resolve("l_english", Id::new("GER_missing")), "GER_missing");
        assert_eq!(table.resolve("l_french", Id::new("GER_rhineland")), "GER_rhineland");
    }

    #[test]
    fn test_merge_overrides() {
        let key = Id::new("POL_focus");
        let mut base = LocalisationTable::new();
        base.insert("l_english", key, "Old");

        let mut overlay = LocalisationTable::new();
        overlay.insert("l_english", key, "New");

        base.merge(overlay);
        assert_eq!(base.get("l_english", key), Some("New"));
        assert_eq!(base.len("l_english"), 1);
    }
}
