//! Extensions registered per path prefix.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::log::debug;
use crate::{PrefixTable, RegistryError};

/// Sorted extension lists keyed by path prefix.
///
/// A lookup returns the extensions of the longest registered prefix of the
/// queried path. Each list is kept sorted and holds an extension at most once.
///
/// # Example
///
/// ```
/// use uri_kit_registry::ExtensionRegistry;
///
/// let registry = ExtensionRegistry::new();
/// registry.add_extension("/", "default");
/// registry.add_extension("/img/", "thumbnail");
/// registry.add_extension("/img/", "exif");
///
/// assert_eq!(registry.extensions("/img/cat.png"), ["exif", "thumbnail"]);
/// assert_eq!(registry.extensions("/css/main.css"), ["default"]);
/// ```
#[derive(Debug)]
pub struct ExtensionRegistry<E> {
    table: Mutex<PrefixTable<Vec<E>>>,
}

impl<E> Default for ExtensionRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ExtensionRegistry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: Mutex::new(PrefixTable::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PrefixTable<Vec<E>>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the longest registered prefix of `path`, or the root prefix.
    #[must_use]
    pub fn nearest_path(&self, path: &str) -> String {
        self.lock().nearest_path(path)
    }

    /// Returns the prefixes that hold at least one extension.
    #[must_use]
    pub fn prefixes(&self) -> Vec<String> {
        self.lock().prefixes().map(str::to_string).collect()
    }
}

impl<E: Ord + Clone> ExtensionRegistry<E> {
    /// Adds `extension` under `prefix`, creating the prefix if needed.
    ///
    /// Returns false if the extension was already registered there.
    pub fn add_extension(&self, prefix: &str, extension: E) -> bool {
        let mut table = self.lock();
        if let Some(list) = table.exact_value_mut(prefix) {
            return match list.binary_search(&extension) {
                Ok(_) => false,
                Err(pos) => {
                    list.insert(pos, extension);
                    true
                }
            };
        }
        table.replace(prefix, vec![extension]);
        debug!("extension prefix {:?} created", table.canonical(prefix));
        true
    }

    /// Returns the extensions of the longest registered prefix of `path`.
    #[must_use]
    pub fn extensions(&self, path: &str) -> Vec<E> {
        self.lock().nearest_value(path).cloned().unwrap_or_default()
    }

    /// Removes `extension` from every prefix and drops prefixes left empty.
    ///
    /// Returns true if anything was removed.
    pub fn remove_extension(&self, extension: &E) -> bool {
        let mut table = self.lock();
        let mut emptied = Vec::new();
        let mut removed = false;
        for prefix in table.prefixes().map(str::to_string).collect::<Vec<_>>() {
            let Some(list) = table.exact_value_mut(&prefix) else {
                continue;
            };
            if let Ok(pos) = list.binary_search(extension) {
                list.remove(pos);
                removed = true;
                if list.is_empty() {
                    emptied.push(prefix);
                }
            }
        }
        for prefix in emptied {
            debug!("extension prefix {prefix:?} emptied");
            table.remove(&prefix);
        }
        removed
    }

    /// Removes `extension` from `prefix`, dropping the prefix if it empties.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the prefix is unknown or
    /// does not hold the extension.
    pub fn remove_extension_at(&self, prefix: &str, extension: &E) -> Result<(), RegistryError> {
        let mut table = self.lock();
        let canonical = table.canonical(prefix);
        let list = table
            .exact_value_mut(&canonical)
            .ok_or_else(|| RegistryError::not_registered(canonical.clone()))?;
        let pos = list
            .binary_search(extension)
            .map_err(|_| RegistryError::not_registered(canonical.clone()))?;
        list.remove(pos);
        if list.is_empty() {
            table.remove(&canonical);
        }
        Ok(())
    }
}
