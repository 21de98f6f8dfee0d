//! Name-keyed registries
//!
//! Lookups go through a hash map; iteration is always in name order so that
//! listings are deterministic.

use ahash::AHashMap;

/// Something stored in a [`Registry`] under its own name
pub trait Named {
    fn name(&self) -> &str;
}

/// Table of definitions keyed by name; registering an existing name replaces it
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: AHashMap<String, T>,
}

impl<T: Named> Registry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    /// Register a definition, returning the one it replaced
    pub fn register(&mut self, def: T) -> Option<T> {
        self.entries.insert(def.name().to_string(), def)
    }

    /// Look up a definition by its exact (case-sensitive) name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Definitions in name order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut defs: Vec<&T> = self.entries.values().collect();
        defs.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        defs.into_iter()
    }
}

impl<T: Named> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Entry(&'static str, u32);

    impl Named for Entry {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = Registry::new();
        assert_eq!(registry.register(Entry("a", 1)), None);
        assert_eq!(registry.register(Entry("a", 2)), Some(Entry("a", 1)));
        assert_eq!(registry.get("a"), Some(&Entry("a", 2)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_case_sensitive() {
        let mut registry = Registry::new();
        registry.register(Entry("max", 1));
        assert!(registry.contains("max"));
        assert!(!registry.contains("MAX"));
    }

    #[test]
    fn test_name_order() {
        let mut registry = Registry::new();
        registry.register(Entry("c", 3));
        registry.register(Entry("a", 1));
        registry.register(Entry("b", 2));
        assert_eq!(registry.names(), vec!["a", "b", "c"]);
        let values: Vec<u32> = registry.iter().map(|e| e.1).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
