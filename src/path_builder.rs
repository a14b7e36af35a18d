//! Chainable builder for [`Path`] values.

use std::fmt;

use crate::codec::{Encoding, PercentCodec};
use crate::constants::EXTENSION_DELIMITER;
use crate::path::Path;

/// A builder that edits a path in place and yields an immutable [`Path`].
///
/// Every method consumes the builder and returns it, so edits chain. After
/// each step an empty path is collapsed: it loses its trailing separator,
/// becoming the root if it had one.
///
/// Text arguments are parsed with the builder's [`PercentCodec`].
///
/// # Examples
///
/// ```
/// use uri_kit::PathBuilder;
///
/// let path = PathBuilder::parse("/a/b/c/test.txt")
///     .parent()
///     .append_str("d/report.txt")
///     .file_extension("pdf")
///     .build();
///
/// assert_eq!(path.to_string(), "/a/b/c/d/report.pdf");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBuilder {
    path: Path,
    codec: PercentCodec,
}

impl PathBuilder {
    /// Creates a builder holding the empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from path text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::from(Path::parse(text))
    }

    /// Sets the codec used for text arguments.
    #[must_use]
    pub const fn with_codec(mut self, codec: PercentCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Returns the path as currently built.
    #[must_use]
    pub const fn as_path(&self) -> &Path {
        &self.path
    }

    /// Finishes building.
    #[must_use]
    pub fn build(self) -> Path {
        self.path
    }

    /// Serializes the current path with the given encoding.
    #[must_use]
    pub fn to_string_with(&self, encoding: Encoding) -> String {
        self.path.to_string_with(encoding)
    }

    /// Replaces the whole path.
    #[must_use]
    pub fn path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Replaces the whole path with parsed text.
    #[must_use]
    pub fn path_str(mut self, text: &str) -> Self {
        self.path = Path::parse_with(text, self.codec);
        self
    }

    /// Resets to the empty path.
    #[must_use]
    pub fn clear(mut self) -> Self {
        self.path = Path::EMPTY;
        self
    }

    /// Appends the segments of `path`.
    ///
    /// The appended path decides whether the result is a directory. Its
    /// absolute flag only matters when this path is empty.
    ///
    /// ```
    /// use uri_kit::{Path, PathBuilder};
    ///
    /// let path = PathBuilder::parse("/x/y").append(&Path::parse("a/b/")).build();
    /// assert_eq!(path.to_string(), "/x/y/a/b/");
    ///
    /// let path = PathBuilder::new().append(&Path::parse("/a")).build();
    /// assert_eq!(path.to_string(), "/a");
    /// ```
    #[must_use]
    pub fn append(mut self, path: &Path) -> Self {
        self.join(path, false);
        self
    }

    /// Parses `text` and appends it.
    #[must_use]
    pub fn append_str(self, text: &str) -> Self {
        let path = Path::parse_with(text, self.codec);
        self.append(&path)
    }

    /// Appends already-decoded segments. Empty segments are skipped.
    #[must_use]
    pub fn append_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.path.segments.len();
        self.path.segments.extend(
            segments
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty()),
        );
        if self.path.segments.len() > before {
            self.path.trailing_separator = false;
        }
        self.path.collapse();
        self
    }

    /// Inserts the segments of `path` in front of this one.
    ///
    /// The prepended path decides whether the result is absolute.
    ///
    /// ```
    /// use uri_kit::{Path, PathBuilder};
    ///
    /// let path = PathBuilder::parse("/x/y").prepend(&Path::parse("a/b/c")).build();
    /// assert_eq!(path.to_string(), "a/b/c/x/y");
    ///
    /// let path = PathBuilder::parse("/").prepend(&Path::parse("a/b/c")).build();
    /// assert_eq!(path.to_string(), "a/b/c/");
    /// ```
    #[must_use]
    pub fn prepend(mut self, path: &Path) -> Self {
        self.join(path, true);
        self
    }

    /// Parses `text` and prepends it.
    #[must_use]
    pub fn prepend_str(self, text: &str) -> Self {
        let path = Path::parse_with(text, self.codec);
        self.prepend(&path)
    }

    fn join(&mut self, other: &Path, in_front: bool) {
        if other.segments.is_empty() && !other.absolute {
            return;
        }
        let path = &mut self.path;
        let was_empty = path.segments.is_empty();
        if in_front {
            let tail = std::mem::replace(&mut path.segments, other.segments.clone());
            path.segments.extend(tail);
            if was_empty {
                path.trailing_separator = other.trailing_separator || path.absolute;
            }
            path.absolute = other.absolute;
        } else {
            path.segments.extend(other.segments.iter().cloned());
            // Appending the root marks a directory.
            path.trailing_separator = other.trailing_separator || other.segments.is_empty();
            if was_empty {
                path.absolute |= other.absolute;
            }
        }
        path.collapse();
    }

    /// Marks the path as a directory. An empty path becomes the root.
    #[must_use]
    pub fn append_trailing_separator(mut self) -> Self {
        if self.path.segments.is_empty() {
            self.path.absolute = true;
        } else {
            self.path.trailing_separator = true;
        }
        self
    }

    /// Removes the trailing separator.
    #[must_use]
    pub fn remove_trailing_separator(mut self) -> Self {
        self.path.trailing_separator = false;
        self
    }

    /// Makes the path absolute.
    #[must_use]
    pub fn make_absolute(mut self) -> Self {
        self.path.absolute = true;
        self
    }

    /// Makes the path relative.
    #[must_use]
    pub fn make_relative(mut self) -> Self {
        self.path.absolute = false;
        self
    }

    /// Removes dot segments. See [`Path::normalize`].
    #[must_use]
    pub fn normalize(mut self) -> Self {
        self.path.normalize_in_place();
        self
    }

    /// Resolves `relative` against the current path. See [`Path::resolve`].
    #[must_use]
    pub fn resolve(mut self, relative: &Path) -> Self {
        self.path.resolve_in_place(relative);
        self
    }

    /// Parses `relative` and resolves it against the current path.
    #[must_use]
    pub fn resolve_str(self, relative: &str) -> Self {
        let relative = Path::parse_with(relative, self.codec);
        self.resolve(&relative)
    }

    /// Replaces the path with the path leading from it to `target`. See
    /// [`Path::relativize`].
    #[must_use]
    pub fn relativize(mut self, target: &Path) -> Self {
        self.path = self.path.relativize(target);
        self
    }

    /// Moves to the enclosing directory.
    #[must_use]
    pub fn parent(mut self) -> Self {
        self.path.parent_in_place();
        self
    }

    /// Moves to the enclosing directory unless already on a directory.
    #[must_use]
    pub fn directory(mut self) -> Self {
        if !self.path.trailing_separator {
            self.path.parent_in_place();
        }
        self
    }

    /// Drops up to `count` segments from the start.
    #[must_use]
    pub fn remove_first_segments(mut self, count: usize) -> Self {
        let count = count.min(self.path.segments.len());
        self.path.segments.drain(..count);
        self.path.collapse();
        self
    }

    /// Drops up to `count` segments from the end.
    ///
    /// ```
    /// use uri_kit::PathBuilder;
    ///
    /// assert_eq!(PathBuilder::parse("/a/b").remove_last_segments(1).build().to_string(), "/a");
    /// assert_eq!(PathBuilder::parse("a/b/").remove_last_segments(2).build().to_string(), "/");
    /// ```
    #[must_use]
    pub fn remove_last_segments(mut self, count: usize) -> Self {
        self.remove_tail(count, false);
        self
    }

    /// Drops up to `count` folder segments, keeping the file name.
    ///
    /// ```
    /// use uri_kit::PathBuilder;
    ///
    /// let path = PathBuilder::parse("a/b/c/file.txt").remove_last_folder_segments(2).build();
    /// assert_eq!(path.to_string(), "a/file.txt");
    /// ```
    #[must_use]
    pub fn remove_last_folder_segments(mut self, count: usize) -> Self {
        self.remove_tail(count, true);
        self
    }

    fn remove_tail(&mut self, count: usize, keep_file_name: bool) {
        let path = &mut self.path;
        let len = path.segments.len();
        let end = if keep_file_name && !path.trailing_separator {
            len.saturating_sub(1)
        } else {
            len
        };
        let start = end.saturating_sub(count);
        path.segments.drain(start..end);
        path.collapse();
    }

    /// Replaces the file name, or appends one to a directory.
    ///
    /// An empty name removes the file name.
    #[must_use]
    pub fn file_name(self, name: &str) -> Self {
        self.maybe_file_name(Some(name))
    }

    /// Removes the file name, leaving its directory.
    #[must_use]
    pub fn remove_file_name(self) -> Self {
        self.maybe_file_name(None)
    }

    /// Sets or removes the file name.
    #[must_use]
    pub fn maybe_file_name(mut self, name: Option<&str>) -> Self {
        let path = &mut self.path;
        let len = path.segments.len();
        if !path.trailing_separator && len > 0 {
            path.segments.pop();
            if len > 1 {
                path.trailing_separator = true;
            }
        }
        if let Some(name) = name.filter(|name| !name.is_empty()) {
            path.segments.push(name.to_string());
            path.trailing_separator = false;
        }
        path.collapse();
        self
    }

    /// Replaces the extension of the file name. A directory is left alone.
    ///
    /// A leading `.` in `extension` is ignored; an empty extension removes
    /// the current one.
    ///
    /// ```
    /// use uri_kit::PathBuilder;
    ///
    /// let path = PathBuilder::parse("/a/b/c/test.txt").file_extension(".toto").build();
    /// assert_eq!(path.to_string(), "/a/b/c/test.toto");
    ///
    /// let path = PathBuilder::parse("/a/b/c/").file_extension("toto").build();
    /// assert_eq!(path.to_string(), "/a/b/c/");
    /// ```
    #[must_use]
    pub fn file_extension(mut self, extension: &str) -> Self {
        if self.path.trailing_separator {
            return self;
        }
        let path = &mut self.path;
        let extension = extension.trim();
        let extension = extension
            .strip_prefix(EXTENSION_DELIMITER)
            .unwrap_or(extension);
        let suffix = if extension.is_empty() {
            String::new()
        } else {
            format!("{EXTENSION_DELIMITER}{extension}")
        };
        match path.segments.last_mut() {
            Some(name) => {
                let stem = name.rfind(EXTENSION_DELIMITER).unwrap_or(name.len());
                name.truncate(stem);
                name.push_str(&suffix);
                if name.is_empty() {
                    path.segments.pop();
                }
            }
            None if !suffix.is_empty() => path.segments.push(suffix),
            None => {}
        }
        path.collapse();
        self
    }
}

impl From<Path> for PathBuilder {
    fn from(path: Path) -> Self {
        Self {
            path,
            codec: PercentCodec::default(),
        }
    }
}

impl From<PathBuilder> for Path {
    fn from(builder: PathBuilder) -> Self {
        builder.build()
    }
}

impl fmt::Display for PathBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}
