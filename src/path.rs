//! Immutable path values and the dot-segment algorithms.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::codec::{Encoding, PercentCodec, encode};
use crate::constants::{
    CURRENT_SEGMENT, EXTENSION_DELIMITER, PARENT_SEGMENT, PATH_SEPARATOR,
};
use crate::path_builder::PathBuilder;
use crate::tokenizer::{PathParts, tokenize_path};

/// A sequence of decoded segments with absolute and trailing-separator flags.
///
/// An empty relative path means "no path"; an empty absolute path is the
/// root. An empty path never carries a trailing separator.
///
/// Paths order relative before absolute, then segment by segment, then
/// shorter first, then files before directories.
///
/// # Examples
///
/// ```
/// use uri_kit::Path;
///
/// let base = Path::parse("/a/b/c/");
/// assert_eq!(base.resolve(&Path::parse("../../d")).to_string(), "/a/d");
///
/// let from = Path::parse("/a/b");
/// assert_eq!(from.relativize(&Path::parse("/a/b/c")).to_string(), "b/c");
/// assert_eq!(Path::parse("/a/b/c").relativize(&from).to_string(), "../b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    // Field order drives the derived ordering.
    pub(crate) absolute: bool,
    pub(crate) segments: Vec<String>,
    pub(crate) trailing_separator: bool,
}

impl Path {
    /// The empty relative path.
    pub const EMPTY: Self = Self {
        absolute: false,
        segments: Vec::new(),
        trailing_separator: false,
    };

    /// The root path `/`.
    pub const ROOT: Self = Self {
        absolute: true,
        segments: Vec::new(),
        trailing_separator: false,
    };

    /// Parses and percent-decodes a path. Text from the first `?` or `#` on
    /// is ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, PercentCodec::default())
    }

    /// Parses a path, decoding segments according to `codec`.
    #[must_use]
    pub fn parse_with(text: &str, codec: PercentCodec) -> Self {
        Self::from_parts(&tokenize_path(text), codec)
    }

    pub(crate) fn from_parts(parts: &PathParts<'_>, codec: PercentCodec) -> Self {
        Self::from_segments(
            parts.absolute,
            parts.segments.iter().map(|s| codec.decode(s)),
            parts.trailing_separator,
        )
    }

    /// Builds a path from already-decoded segments.
    ///
    /// Empty segments are dropped. A trailing separator on an empty path
    /// turns it into the root.
    ///
    /// ```
    /// use uri_kit::Path;
    ///
    /// let path = Path::from_segments(true, ["a", "", "b"], true);
    /// assert_eq!(path.to_string(), "/a/b/");
    /// assert_eq!(Path::from_segments(false, Vec::<String>::new(), true), Path::ROOT);
    /// ```
    #[must_use]
    pub fn from_segments<I, S>(absolute: bool, segments: I, trailing_separator: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = Self {
            absolute,
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty())
                .collect(),
            trailing_separator,
        };
        path.collapse();
        path
    }

    /// Returns `true` if the path starts with a separator.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Returns `true` if the path ends with a separator, i.e. names a
    /// directory.
    #[must_use]
    pub const fn has_trailing_separator(&self) -> bool {
        self.trailing_separator
    }

    /// Returns the decoded segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the segment at `index`.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if there are no segments. The root is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the last segment, whether or not the path is a directory.
    #[must_use]
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Returns the last segment unless the path is a directory.
    ///
    /// ```
    /// use uri_kit::Path;
    ///
    /// let path = Path::parse("/a/b/test.a.b.txt");
    /// assert_eq!(path.file_name(), Some("test.a.b.txt"));
    /// assert_eq!(path.file_name_without_extension(), Some("test.a.b"));
    /// assert_eq!(path.file_extension(), Some("txt"));
    /// assert_eq!(Path::parse("/a/b/").file_name(), None);
    /// ```
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        if self.trailing_separator {
            None
        } else {
            self.last_segment()
        }
    }

    /// Returns the text after the last `.` of the file name.
    #[must_use]
    pub fn file_extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        name.rfind(EXTENSION_DELIMITER).map(|at| &name[at + 1..])
    }

    /// Returns the file name up to its last `.`.
    #[must_use]
    pub fn file_name_without_extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        Some(name.rfind(EXTENSION_DELIMITER).map_or(name, |at| &name[..at]))
    }

    /// Number of equal segments counted from the start.
    #[must_use]
    pub fn common_segments(&self, other: &Self) -> usize {
        self.segments
            .iter()
            .zip(&other.segments)
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Number of equal segments counted from the end.
    #[must_use]
    pub fn common_trailing_segments(&self, other: &Self) -> usize {
        self.segments
            .iter()
            .rev()
            .zip(other.segments.iter().rev())
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Returns `true` if `prefix` names this path or one of its ancestors.
    ///
    /// A directory prefix does not match a file of the same name.
    ///
    /// ```
    /// use uri_kit::Path;
    ///
    /// assert!(Path::parse("/a/b/c").starts_with(&Path::parse("/a/b/")));
    /// assert!(Path::parse("/a/b").starts_with(&Path::parse("/a/b")));
    /// assert!(!Path::parse("/a/b").starts_with(&Path::parse("/a/b/")));
    /// ```
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.common_segments(prefix) == prefix.len()
            && (self.len() > prefix.len()
                || self.trailing_separator
                || !prefix.trailing_separator)
    }

    /// Removes `.` and `..` segments.
    ///
    /// A `..` with nothing left to remove is dropped, even in an absolute
    /// path.
    ///
    /// ```
    /// use uri_kit::Path;
    ///
    /// assert_eq!(Path::parse("a/b/../../../../c").normalize().to_string(), "c");
    /// assert_eq!(Path::parse("../").normalize(), Path::ROOT);
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Self {
        let mut path = self.clone();
        path.normalize_in_place();
        path
    }

    /// Resolves `relative` against this path.
    #[must_use]
    pub fn resolve(&self, relative: &Self) -> Self {
        let mut path = self.clone();
        path.resolve_in_place(relative);
        path
    }

    /// Parses `relative` and resolves it against this path.
    #[must_use]
    pub fn resolve_str(&self, relative: &str) -> Self {
        self.resolve(&Self::parse(relative))
    }

    /// Returns the path that leads from this one to `target`.
    ///
    /// Paths on opposite sides of the absolute/relative boundary are not
    /// relativized: an absolute base is returned as is, an absolute target
    /// from a relative base is returned as is. A root target yields a
    /// directory step (`./` or `../`), so resolving it gives back the root.
    #[must_use]
    pub fn relativize(&self, target: &Self) -> Self {
        if self.absolute && !target.absolute {
            return self.clone();
        }
        if !self.absolute && target.absolute {
            return target.clone();
        }

        let mut base = self.clone();
        base.remove_dot_segments();
        let mut target = target.clone();
        target.remove_dot_segments();

        if !base.trailing_separator {
            base.segments.pop();
        }
        let base_len = base.segments.len();
        let mut target_len = target.segments.len();
        if target_len > 0 && !target.trailing_separator {
            target_len -= 1;
        }
        let common = base.segments[..base_len.min(target_len)]
            .iter()
            .zip(&target.segments)
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments = vec![PARENT_SEGMENT.to_string(); base_len - common];
        segments.extend(target.segments.drain(common..));
        if segments.is_empty() {
            segments.push(CURRENT_SEGMENT.to_string());
        }
        // The root only survives resolution as a directory step.
        let trailing = target.trailing_separator || (target.absolute && target.segments.is_empty());
        Self::from_segments(false, segments, trailing)
    }

    /// Returns the enclosing directory.
    ///
    /// ```
    /// use uri_kit::Path;
    ///
    /// let path = Path::parse("/a/b/c/test.txt");
    /// assert_eq!(path.parent().to_string(), "/a/b/c/");
    /// assert_eq!(path.parent().parent().to_string(), "/a/b/");
    /// assert_eq!(Path::parse("/a/").parent(), Path::ROOT);
    /// assert_eq!(Path::parse("a/").parent(), Path::EMPTY);
    /// ```
    #[must_use]
    pub fn parent(&self) -> Self {
        let mut path = self.clone();
        path.parent_in_place();
        path
    }

    /// Returns the path itself if it is a directory, its parent otherwise.
    #[must_use]
    pub fn directory(&self) -> Self {
        if self.trailing_separator {
            self.clone()
        } else {
            self.parent()
        }
    }

    /// Serializes the path with the given encoding.
    ///
    /// ```
    /// use uri_kit::{Encoding, Path};
    ///
    /// let path = Path::parse("/wikipedia/%D0%A0%D0%BE%D1%81%D1%81%D0%B8%D1%8F");
    /// assert_eq!(path.to_string_with(Encoding::ESCAPE), "/wikipedia/Россия");
    /// assert_eq!(path.to_string(), "/wikipedia/%D0%A0%D0%BE%D1%81%D1%81%D0%B8%D1%8F");
    /// ```
    #[must_use]
    pub fn to_string_with(&self, encoding: Encoding) -> String {
        let mut out = String::new();
        self.write_to(&mut out, encoding);
        out
    }

    pub(crate) fn write_to(&self, out: &mut String, encoding: Encoding) {
        if self.absolute {
            out.push(PATH_SEPARATOR);
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                out.push(PATH_SEPARATOR);
            }
            out.push_str(&encode(segment, encoding));
        }
        if self.trailing_separator && !self.segments.is_empty() {
            out.push(PATH_SEPARATOR);
        }
    }

    /// Returns a builder initialized with this path.
    #[must_use]
    pub fn to_builder(&self) -> PathBuilder {
        PathBuilder::from(self.clone())
    }

    /// Converts this path into a builder.
    #[must_use]
    pub fn into_builder(self) -> PathBuilder {
        PathBuilder::from(self)
    }

    // In-place operations shared with `PathBuilder`. Each leaves the path
    // collapsed.

    /// Restores the empty-path invariant after a mutation.
    pub(crate) fn collapse(&mut self) {
        if self.segments.is_empty() {
            self.absolute |= self.trailing_separator;
            self.trailing_separator = false;
        }
    }

    /// Drops dot segments and reports whether the last processed segment
    /// was a regular one.
    fn remove_dot_segments(&mut self) -> bool {
        let mut kept = Vec::with_capacity(self.segments.len());
        let mut last_regular = false;
        for segment in self.segments.drain(..) {
            last_regular = false;
            match segment.as_str() {
                "" | CURRENT_SEGMENT => {}
                PARENT_SEGMENT => {
                    kept.pop();
                }
                _ => {
                    kept.push(segment);
                    last_regular = true;
                }
            }
        }
        self.segments = kept;
        last_regular
    }

    pub(crate) fn normalize_in_place(&mut self) {
        self.remove_dot_segments();
        self.collapse();
    }

    pub(crate) fn resolve_in_place(&mut self, relative: &Self) {
        if relative.absolute {
            self.segments.clone_from(&relative.segments);
            self.absolute = true;
            self.trailing_separator = relative.trailing_separator;
        } else if !relative.segments.is_empty() {
            if !self.trailing_separator {
                self.segments.pop();
            }
            self.collapse();
            self.segments.extend(relative.segments.iter().cloned());
            if self.remove_dot_segments() {
                self.trailing_separator = relative.trailing_separator;
            } else if self.segments.is_empty() {
                self.trailing_separator = relative.trailing_separator;
                self.absolute = false;
            } else {
                self.trailing_separator = true;
            }
        }
        self.collapse();
    }

    pub(crate) fn parent_in_place(&mut self) {
        if self.segments.pop().is_some() {
            self.trailing_separator = !self.segments.is_empty();
            self.collapse();
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(Encoding::FULL))
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl AsRef<[String]> for Path {
    fn as_ref(&self) -> &[String] {
        &self.segments
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
