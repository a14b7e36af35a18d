//! Ordered query items.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::codec::{Encoding, PercentCodec, encode};
use crate::constants::{QUERY_ITEM_DELIMITER, QUERY_VALUE_DELIMITER};

/// One `name=value` pair of a query, stored decoded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryItem {
    name: String,
    value: String,
}

impl QueryItem {
    /// Creates an item from decoded text.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates an item from raw text, decoding it with `codec`.
    #[must_use]
    pub fn decoded(name: &str, value: &str, codec: PercentCodec) -> Self {
        Self::new(codec.decode(name), codec.decode(value))
    }

    /// Returns the decoded name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the decoded value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn write_to(&self, out: &mut String, encoding: Encoding) {
        out.push_str(&encode(&self.name, encoding));
        out.push(QUERY_VALUE_DELIMITER);
        out.push_str(&encode(&self.value, encoding));
    }
}

/// Query items in insertion order.
///
/// Duplicate names are kept. [`QueryItems::grouped`] gives the per-name view.
///
/// # Examples
///
/// ```
/// use uri_kit::QueryItems;
///
/// let items = QueryItems::parse("x=X1&y=Y&x=X2");
/// assert_eq!(items.get("x"), Some("X1"));
/// assert_eq!(items.values("x").collect::<Vec<_>>(), ["X1", "X2"]);
/// assert_eq!(items.to_string(), "x=X1&y=Y&x=X2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct QueryItems {
    items: Vec<QueryItem>,
}

impl QueryItems {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Parses raw query text (without the leading `?`), decoding each name
    /// and value.
    ///
    /// Pairs are split on `&`, then on the first `=`. A pair without `=` has
    /// an empty value. Names are trimmed and pairs with an empty name are
    /// skipped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::parse_with(input, PercentCodec::default())
    }

    /// Parses raw query text, decoding according to `codec`.
    #[must_use]
    pub fn parse_with(input: &str, codec: PercentCodec) -> Self {
        let mut items = Self::new();
        items.extend_parsed(input, codec);
        items
    }

    pub(crate) fn extend_parsed(&mut self, input: &str, codec: PercentCodec) {
        for pair in input.split(QUERY_ITEM_DELIMITER) {
            let (name, value) = pair.split_once(QUERY_VALUE_DELIMITER).unwrap_or((pair, ""));
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            self.items.push(QueryItem::decoded(name, value, codec));
        }
    }

    /// Appends an item.
    pub fn push(&mut self, item: QueryItem) {
        self.items.push(item);
    }

    /// Removes every item called `name`. Returns `true` if any was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        self.items.len() != before
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the first value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values(name).next()
    }

    /// Returns every value for `name`, in order.
    pub fn values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        self.items
            .iter()
            .filter(move |item| item.name == name)
            .map(QueryItem::value)
    }

    /// Returns values grouped by name, names in first-occurrence order.
    ///
    /// ```
    /// use uri_kit::QueryItems;
    ///
    /// let items = QueryItems::parse("x=X1&y=Y&x=X2");
    /// let grouped = items.grouped();
    /// assert_eq!(grouped[0], ("x", vec!["X1", "X2"]));
    /// assert_eq!(grouped[1], ("y", vec!["Y"]));
    /// ```
    #[must_use]
    pub fn grouped(&self) -> Vec<(&str, Vec<&str>)> {
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|(name, _)| *name == item.name) {
                Some((_, values)) => values.push(item.value.as_str()),
                None => groups.push((item.name.as_str(), vec![item.value.as_str()])),
            }
        }
        groups
    }

    /// Returns true if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items.
    pub fn iter(&self) -> impl Iterator<Item = &QueryItem> {
        self.items.iter()
    }

    /// Serializes the items with the given encoding.
    #[must_use]
    pub fn to_string_with(&self, encoding: Encoding) -> String {
        let mut out = String::new();
        self.write_to(&mut out, encoding);
        out
    }

    pub(crate) fn write_to(&self, out: &mut String, encoding: Encoding) {
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                out.push(QUERY_ITEM_DELIMITER);
            }
            item.write_to(out, encoding);
        }
    }
}

/// Joins the decoded items without encoding them.
impl fmt::Display for QueryItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                write!(f, "{QUERY_ITEM_DELIMITER}")?;
            }
            write!(f, "{}{QUERY_VALUE_DELIMITER}{}", item.name, item.value)?;
        }
        Ok(())
    }
}

impl FromStr for QueryItems {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl FromIterator<QueryItem> for QueryItems {
    fn from_iter<I: IntoIterator<Item = QueryItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<QueryItem> for QueryItems {
    fn extend<I: IntoIterator<Item = QueryItem>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a> IntoIterator for &'a QueryItems {
    type Item = &'a QueryItem;
    type IntoIter = std::slice::Iter<'a, QueryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
