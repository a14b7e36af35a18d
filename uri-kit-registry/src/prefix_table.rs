//! Sorted prefix table with longest-prefix lookup.

use uri_kit::{Path, Uri};

use crate::RegistryError;
use crate::log::{debug, trace};

/// Default segment delimiter of canonical prefixes.
pub const DEFAULT_DELIMITER: char = '/';

/// A canonical prefix and its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<V> {
    prefix: String,
    value: V,
}

impl<V> Entry<V> {
    /// Returns the canonical prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Splits the entry into prefix and value.
    #[must_use]
    pub fn into_parts(self) -> (String, V) {
        (self.prefix, self.value)
    }
}

/// Values keyed by path prefix, looked up by longest match.
///
/// Prefixes are stored in canonical form, bounded by the delimiter on both
/// ends (`a/b` is stored as `/a/b/`, the empty prefix as `/`), and kept
/// sorted so that every lookup is a binary search.
///
/// Supports:
/// - O(log n) exact lookup
/// - O(n) insert and remove (binary search plus shift)
/// - O(d · log n) nearest lookup where d is the depth of the queried path
///
/// # Examples
///
/// ```
/// use uri_kit_registry::PrefixTable;
///
/// let mut table = PrefixTable::new();
/// table.add("/a/", "A").unwrap();
/// table.add("/a/b/c/", "C").unwrap();
///
/// assert_eq!(table.nearest_path("/a/b/d/"), "/a/");
/// assert_eq!(table.nearest_path("/a/b/c/x/"), "/a/b/c/");
/// assert_eq!(table.nearest_value("/a/b/c/x"), Some(&"C"));
/// assert_eq!(table.nearest_path("/z/"), "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable<V> {
    /// Sorted by prefix
    entries: Vec<Entry<V>>,
    delimiter: char,
}

impl<V> Default for PrefixTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PrefixTable<V> {
    /// Creates an empty table using `/` as delimiter.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    /// Creates an empty table using a custom segment delimiter.
    #[must_use]
    pub const fn with_delimiter(delimiter: char) -> Self {
        Self {
            entries: Vec::new(),
            delimiter,
        }
    }

    /// Returns the segment delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Returns the canonical form of `path`: the delimiter is added at
    /// either end where missing.
    ///
    /// ```
    /// use uri_kit_registry::PrefixTable;
    ///
    /// let table = PrefixTable::<()>::new();
    /// assert_eq!(table.canonical("a/b"), "/a/b/");
    /// assert_eq!(table.canonical(""), "/");
    /// ```
    #[must_use]
    pub fn canonical(&self, path: &str) -> String {
        let mut canonical = String::with_capacity(path.len() + 2);
        if !path.starts_with(self.delimiter) {
            canonical.push(self.delimiter);
        }
        canonical.push_str(path);
        if !canonical.ends_with(self.delimiter) {
            canonical.push(self.delimiter);
        }
        canonical
    }

    fn find(&self, key: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| entry.prefix.as_str().cmp(key))
    }

    /// Registers `value` under `prefix` and returns the canonical prefix.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] if the prefix already has
    /// an entry; the existing value is kept.
    pub fn add(&mut self, prefix: &str, value: V) -> Result<String, RegistryError> {
        let prefix = self.canonical(prefix);
        match self.find(&prefix) {
            Ok(_) => Err(RegistryError::already_registered(prefix)),
            Err(pos) => {
                debug!("registering prefix {prefix:?}");
                self.entries.insert(
                    pos,
                    Entry {
                        prefix: prefix.clone(),
                        value,
                    },
                );
                Ok(prefix)
            }
        }
    }

    /// Registers `value` under `prefix`, returning the value it replaces.
    pub fn replace(&mut self, prefix: &str, value: V) -> Option<V> {
        let prefix = self.canonical(prefix);
        debug!("replacing prefix {prefix:?}");
        match self.find(&prefix) {
            Ok(pos) => Some(std::mem::replace(&mut self.entries[pos].value, value)),
            Err(pos) => {
                self.entries.insert(pos, Entry { prefix, value });
                None
            }
        }
    }

    /// Removes the entry registered under `prefix`.
    pub fn remove(&mut self, prefix: &str) -> Option<Entry<V>> {
        let prefix = self.canonical(prefix);
        let pos = self.find(&prefix).ok()?;
        debug!("removing prefix {prefix:?}");
        Some(self.entries.remove(pos))
    }

    /// Returns true if `prefix` has an entry.
    #[must_use]
    pub fn contains(&self, prefix: &str) -> bool {
        self.find(&self.canonical(prefix)).is_ok()
    }

    /// Returns the entry registered under exactly `prefix`.
    #[must_use]
    pub fn exact_entry(&self, prefix: &str) -> Option<&Entry<V>> {
        let pos = self.find(&self.canonical(prefix)).ok()?;
        self.entries.get(pos)
    }

    /// Returns the value registered under exactly `prefix`.
    #[must_use]
    pub fn exact_value(&self, prefix: &str) -> Option<&V> {
        self.exact_entry(prefix).map(Entry::value)
    }

    /// Returns the value registered under exactly `prefix`, mutably.
    pub fn exact_value_mut(&mut self, prefix: &str) -> Option<&mut V> {
        let pos = self.find(&self.canonical(prefix)).ok()?;
        self.entries.get_mut(pos).map(|entry| &mut entry.value)
    }

    /// Returns all entries in prefix order.
    #[must_use]
    pub fn entries(&self) -> &[Entry<V>] {
        &self.entries
    }

    /// Returns all canonical prefixes in order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::prefix)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entry with the longest prefix of `path`.
    ///
    /// The search starts from the full canonical path and drops one trailing
    /// segment after each miss, so it costs one binary search per level.
    #[must_use]
    pub fn nearest_entry(&self, path: &str) -> Option<&Entry<V>> {
        let path = self.canonical(path);
        let mut key = path.as_str();
        while !key.is_empty() {
            let pos = match self.find(key) {
                Ok(pos) => pos,
                Err(pos) => pos.saturating_sub(1),
            };
            let candidate = self.entries.get(pos)?;
            if path.starts_with(&candidate.prefix) {
                trace!("nearest prefix of {path:?} is {:?}", candidate.prefix);
                return Some(candidate);
            }
            key = self.strip_segment(key);
        }
        trace!("no prefix registered for {path:?}");
        None
    }

    /// Drops the last segment of a canonical key, keeping its delimiter.
    fn strip_segment<'a>(&self, key: &'a str) -> &'a str {
        let head = key.strip_suffix(self.delimiter).unwrap_or(key);
        head.rfind(self.delimiter)
            .map_or("", |at| &key[..at + self.delimiter.len_utf8()])
    }

    /// Returns the longest registered prefix of `path`, or the root prefix
    /// if none matches.
    #[must_use]
    pub fn nearest_path(&self, path: &str) -> String {
        self.nearest_entry(path)
            .map_or_else(|| self.delimiter.to_string(), |entry| entry.prefix.clone())
    }

    /// Returns the value registered under the longest prefix of `path`.
    #[must_use]
    pub fn nearest_value(&self, path: &str) -> Option<&V> {
        self.nearest_entry(path).map(Entry::value)
    }

    /// Looks up the serialized form of `path`.
    #[must_use]
    pub fn nearest_for_path(&self, path: &Path) -> Option<&Entry<V>> {
        self.nearest_entry(&path.to_string())
    }

    /// Looks up the serialized path of `uri`.
    ///
    /// ```
    /// use uri_kit::Uri;
    /// use uri_kit_registry::PrefixTable;
    ///
    /// let mut table = PrefixTable::new();
    /// table.add("/docs/", "docs handler").unwrap();
    ///
    /// let uri = Uri::parse("http://www.foo.bar/docs/index.html?x=y");
    /// let entry = table.nearest_for_uri(&uri).unwrap();
    /// assert_eq!(entry.prefix(), "/docs/");
    /// ```
    #[must_use]
    pub fn nearest_for_uri(&self, uri: &Uri) -> Option<&Entry<V>> {
        self.nearest_for_path(uri.path())
    }
}

impl<V> FromIterator<(String, V)> for PrefixTable<V> {
    /// Collects pairs, keeping the first value of a repeated prefix.
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (prefix, value) in iter {
            // Repeated prefixes keep the first value.
            let _ = table.add(&prefix, value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_of(prefixes: &[&str]) -> PrefixTable<String> {
        let mut table = PrefixTable::new();
        for prefix in prefixes {
            table.add(prefix, (*prefix).to_string()).unwrap();
        }
        table
    }

    #[test]
    fn canonical_forms() {
        let table = PrefixTable::<()>::new();
        assert_eq!(table.canonical("a/b"), "/a/b/");
        assert_eq!(table.canonical("/a/b/"), "/a/b/");
        assert_eq!(table.canonical("/"), "/");
        assert_eq!(table.canonical(""), "/");
    }

    #[test]
    fn add_and_remove() {
        let mut table = table_of(&["/a/b/c/", "/a/"]);
        let entry = table.remove("/a/b/c/").unwrap();
        assert_eq!(entry.prefix(), "/a/b/c/");
        let entry = table.remove("a").unwrap();
        assert_eq!(entry.prefix(), "/a/");
        assert!(table.is_empty());
        assert!(table.remove("/a/").is_none());
    }

    #[test]
    fn nearest_paths() {
        let table = table_of(&["/a/b/c/", "/a/b/c/d/", "/a/", "/x/y/z/"]);
        let cases = [
            ("/a/", "/a/"),
            ("/a/b/", "/a/"),
            ("/a/b/d/", "/a/"),
            ("/a/b/c/", "/a/b/c/"),
            ("/a/b/c/x/", "/a/b/c/"),
            ("/a/b/c/d/", "/a/b/c/d/"),
            ("/A/B/", "/"),
            ("/", "/"),
            ("/x/y/z/A/B/C/", "/x/y/z/"),
        ];
        for (path, expected) in cases {
            assert_eq!(table.nearest_path(path), expected, "{path}");
        }
    }

    #[test]
    fn nearest_with_file_name() {
        let table = table_of(&["/", "/edit/", "/resources/img/"]);
        assert_eq!(table.nearest_path("/resources/img/toto"), "/resources/img/");
        assert_eq!(table.nearest_path("/resources/css/main.css"), "/");
    }

    #[test]
    fn nearest_entries_with_values() {
        let mut table = PrefixTable::new();
        table.add("/a/", "/1/2/3").unwrap();
        table.add("/a/b/c/", "/x/y/z/").unwrap();

        assert_eq!(table.nearest_path("/a/b/C/D"), "/a/");
        let entry = table.nearest_entry("/a/").unwrap();
        assert_eq!(entry.prefix(), "/a/");
        assert_eq!(entry.value(), &"/1/2/3");

        assert_eq!(table.nearest_path("/x/"), "/");
        assert!(table.nearest_entry("/x/").is_none());

        let (prefix, value) = table.remove("/a/b/c/").unwrap().into_parts();
        assert_eq!(prefix, "/a/b/c/");
        assert_eq!(value, "/x/y/z/");
    }

    #[test]
    fn duplicate_add_keeps_first_value() {
        let mut table = PrefixTable::new();
        table.add("/n", "N").unwrap();
        table.add("/x", "X").unwrap();
        assert_eq!(table.add("", "A"), Ok("/".to_string()));
        let err = table.add("", "B").unwrap_err();
        assert!(err.is_already_registered());
        assert_eq!(err.prefix(), "/");

        assert_eq!(table.nearest_value("/m"), Some(&"A"));
        assert_eq!(table.nearest_value("/n/m"), Some(&"N"));
        assert_eq!(table.nearest_value("/b"), Some(&"A"));
    }

    #[test]
    fn replace_upserts() {
        let mut table = PrefixTable::new();
        assert_eq!(table.replace("a", 1), None);
        assert_eq!(table.replace("/a/", 2), Some(1));
        assert_eq!(table.exact_value("a"), Some(&2));
        *table.exact_value_mut("a").unwrap() += 1;
        assert_eq!(table.exact_value("/a/"), Some(&3));
    }

    #[test]
    fn entries_stay_sorted() {
        let table = table_of(&["/m/", "/a/b/", "/z/", "/a/"]);
        assert_eq!(
            table.prefixes().collect::<Vec<_>>(),
            ["/a/", "/a/b/", "/m/", "/z/"]
        );
        assert_eq!(table.len(), 4);
        assert!(table.contains("m"));
        assert!(!table.contains("/a/b/c/"));
        assert_eq!(table.entries()[1].prefix(), "/a/b/");
    }

    #[test]
    fn prefix_must_match_whole_segments() {
        let table = table_of(&["/ab/"]);
        assert_eq!(table.nearest_path("/abc/"), "/");
        assert_eq!(table.nearest_path("/ab/c"), "/ab/");
    }

    #[test]
    fn custom_delimiter() {
        let mut table = PrefixTable::with_delimiter('.');
        assert_eq!(table.add("com.example", 1).unwrap(), ".com.example.");
        table.add("com", 2).unwrap();
        assert_eq!(table.nearest_path("com.example.www"), ".com.example.");
        assert_eq!(table.nearest_path("com.other"), ".com.");
        assert_eq!(table.nearest_path("org"), ".");
    }

    #[test]
    fn lookups_by_path_and_uri() {
        let table = table_of(&["/a/", "/a/b/"]);
        let path = Path::parse("/a/b/file.txt");
        assert_eq!(table.nearest_for_path(&path).unwrap().prefix(), "/a/b/");
        let uri = Uri::parse("http://host/a/x?q=1#f");
        assert_eq!(table.nearest_for_uri(&uri).unwrap().prefix(), "/a/");
    }

    #[test]
    fn clear_empties_table() {
        let mut table = table_of(&["/a/"]);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.nearest_path("/a/"), "/");
    }

    #[test]
    fn from_iterator_keeps_first() {
        let table: PrefixTable<i32> = [("a".to_string(), 1), ("/a/".to_string(), 2)]
            .into_iter()
            .collect();
        assert_eq!(table.len(), 1);
        assert_eq!(table.exact_value("a"), Some(&1));
    }
}
