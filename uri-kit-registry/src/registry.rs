//! Thread-safe prefix registry.

use std::sync::{Mutex, MutexGuard, PoisonError};

use uri_kit::{Path, Uri};

use crate::{Entry, PrefixTable, RegistryError};

/// A [`PrefixTable`] behind a mutex, shareable across threads.
///
/// Every operation takes the lock for its whole duration and returns owned
/// copies, so no reference outlives the lock. No caller code runs while the
/// lock is held, so a poisoned lock is recovered rather than propagated.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use uri_kit_registry::PrefixRegistry;
///
/// let registry = Arc::new(PrefixRegistry::new());
/// registry.add("/static/", "files").unwrap();
///
/// let shared = Arc::clone(&registry);
/// std::thread::spawn(move || shared.add("/api/", "handlers").unwrap())
///     .join()
///     .unwrap();
///
/// assert_eq!(registry.nearest_value("/api/users"), Some("handlers"));
/// ```
#[derive(Debug)]
pub struct PrefixRegistry<V> {
    table: Mutex<PrefixTable<V>>,
}

impl<V> Default for PrefixRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<PrefixTable<V>> for PrefixRegistry<V> {
    fn from(table: PrefixTable<V>) -> Self {
        Self {
            table: Mutex::new(table),
        }
    }
}

impl<V> PrefixRegistry<V> {
    /// Creates an empty registry using `/` as delimiter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: Mutex::new(PrefixTable::new()),
        }
    }

    /// Creates an empty registry using a custom segment delimiter.
    #[must_use]
    pub const fn with_delimiter(delimiter: char) -> Self {
        Self {
            table: Mutex::new(PrefixTable::with_delimiter(delimiter)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PrefixTable<V>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `value` under `prefix` and returns the canonical prefix.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] if the prefix already has
    /// an entry.
    pub fn add(&self, prefix: &str, value: V) -> Result<String, RegistryError> {
        self.lock().add(prefix, value)
    }

    /// Registers `value` under `prefix`, returning the value it replaces.
    pub fn replace(&self, prefix: &str, value: V) -> Option<V> {
        self.lock().replace(prefix, value)
    }

    /// Removes the entry under `prefix`.
    pub fn remove(&self, prefix: &str) -> Option<Entry<V>> {
        self.lock().remove(prefix)
    }

    /// Returns true if `prefix` has an entry.
    #[must_use]
    pub fn contains(&self, prefix: &str) -> bool {
        self.lock().contains(prefix)
    }

    /// Returns the longest registered prefix of `path`, or the root prefix.
    #[must_use]
    pub fn nearest_path(&self, path: &str) -> String {
        self.lock().nearest_path(path)
    }

    /// Returns all canonical prefixes in order.
    #[must_use]
    pub fn prefixes(&self) -> Vec<String> {
        self.lock().prefixes().map(str::to_string).collect()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Consumes the registry and returns the table.
    #[must_use]
    pub fn into_inner(self) -> PrefixTable<V> {
        self.table.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> PrefixRegistry<V> {
    /// Returns a copy of the value registered under exactly `prefix`.
    #[must_use]
    pub fn exact_value(&self, prefix: &str) -> Option<V> {
        self.lock().exact_value(prefix).cloned()
    }

    /// Returns a copy of the entry with the longest prefix of `path`.
    #[must_use]
    pub fn nearest_entry(&self, path: &str) -> Option<Entry<V>> {
        self.lock().nearest_entry(path).cloned()
    }

    /// Returns a copy of the value under the longest prefix of `path`.
    #[must_use]
    pub fn nearest_value(&self, path: &str) -> Option<V> {
        self.lock().nearest_value(path).cloned()
    }

    /// Looks up the serialized form of `path`.
    #[must_use]
    pub fn nearest_for_path(&self, path: &Path) -> Option<Entry<V>> {
        self.lock().nearest_for_path(path).cloned()
    }

    /// Looks up the serialized path of `uri`.
    #[must_use]
    pub fn nearest_for_uri(&self, uri: &Uri) -> Option<Entry<V>> {
        self.lock().nearest_for_uri(uri).cloned()
    }

    /// Returns a copy of the table.
    #[must_use]
    pub fn snapshot(&self) -> PrefixTable<V> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn delegates_to_table() {
        let registry = PrefixRegistry::new();
        assert_eq!(registry.add("a", 1).unwrap(), "/a/");
        assert!(registry.add("/a/", 2).unwrap_err().is_already_registered());
        assert_eq!(registry.replace("/a/", 3), Some(1));
        assert_eq!(registry.exact_value("a"), Some(3));
        assert_eq!(registry.nearest_path("/a/b/c"), "/a/");
        assert_eq!(registry.nearest_value("/b/"), None);
        assert_eq!(registry.nearest_path("/b/"), "/");
        assert_eq!(registry.prefixes(), vec!["/a/".to_string()]);
        assert_eq!(registry.remove("a").map(|e| *e.value()), Some(3));
        assert!(registry.is_empty());
    }

    #[test]
    fn uri_lookup_returns_owned_entry() {
        let registry = PrefixRegistry::new();
        registry.add("/docs/", "docs".to_string()).unwrap();
        let entry = registry
            .nearest_for_uri(&Uri::parse("https://host/docs/a.html"))
            .unwrap();
        assert_eq!(entry.prefix(), "/docs/");
        assert_eq!(entry.value(), "docs");
    }

    #[test]
    fn concurrent_adds_are_all_visible() {
        let registry = Arc::new(PrefixRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for j in 0..25 {
                        registry.add(&format!("/t{i}/p{j}/"), i * 100 + j).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 200);
        assert_eq!(registry.nearest_value("/t3/p7/deeper/file"), Some(307));
        let table = registry.snapshot();
        let prefixes: Vec<_> = table.prefixes().collect();
        let mut sorted = prefixes.clone();
        sorted.sort_unstable();
        assert_eq!(prefixes, sorted);
    }

    #[test]
    fn into_inner_returns_table() {
        let mut table = PrefixTable::with_delimiter('.');
        table.add("com", 1).unwrap();
        let registry = PrefixRegistry::from(table);
        registry.clear();
        let table = registry.into_inner();
        assert!(table.is_empty());
        assert_eq!(table.delimiter(), '.');
    }
}
