//! Single-pass, lenient URI tokenizer.
//!
//! Every entry point scans its input once, left to right, and returns a
//! record of borrowed slices. Nothing here fails: unexpected characters are
//! kept in whichever component they land in and missing components come
//! back as `None` or empty.
//!
//! ```text
//! URI       = (scheme-segment ":")* ["//" authority] path ["?" query] ["#" fragment]
//! authority = [user-info "@"] host [":" port]
//! path      = ("/" | "\") segment (("/" | "\") segment)* [("/" | "\")]
//! ```
//!
//! Slices are returned raw; percent-decoding is left to the caller.

use crate::constants::{
    AUTHORITY_MARKER, FRAGMENT_MARKER, PORT_DELIMITER, QUERY_MARKER, SCHEME_DELIMITER,
    USER_INFO_DELIMITER, is_path_separator,
};
use crate::log::trace;

/// All components of a tokenized URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens<'a> {
    /// Colon-terminated scheme segments, in order. Empty segments are kept.
    pub scheme: Vec<&'a str>,
    /// The authority, when the input carried a non-empty one after `//`.
    pub authority: Option<AuthorityParts<'a>>,
    /// The path.
    pub path: PathParts<'a>,
    /// Raw query text without the leading `?`.
    pub query: Option<&'a str>,
    /// Raw fragment text without the leading `#`.
    pub fragment: Option<&'a str>,
}

/// The pieces of an authority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorityParts<'a> {
    /// Everything before the last `@`.
    pub user_info: Option<&'a str>,
    /// Host text, including any port text that failed to parse.
    pub host: Option<&'a str>,
    /// The port, when all digits after the last `:` fit in a `u16`.
    pub port: Option<u16>,
}

impl AuthorityParts<'_> {
    /// Returns `true` when no part is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.user_info.is_none() && self.host.is_none() && self.port.is_none()
    }
}

/// The pieces of a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParts<'a> {
    /// The path started with a separator.
    pub absolute: bool,
    /// Non-empty segments between separators.
    pub segments: Vec<&'a str>,
    /// The path ended with a separator other than the leading one.
    pub trailing_separator: bool,
}

/// Path, query and fragment of a tokenized full path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullPathParts<'a> {
    /// The path.
    pub path: PathParts<'a>,
    /// Raw query text without the leading `?`.
    pub query: Option<&'a str>,
    /// Raw fragment text without the leading `#`.
    pub fragment: Option<&'a str>,
}

/// Tokenizes a complete URI.
///
/// The text after the last scheme colon belongs to the path, so opaque URIs
/// such as `urn:example:animal` keep their last token as a path segment.
///
/// # Examples
///
/// ```
/// use uri_kit::tokenizer::tokenize;
///
/// let tokens = tokenize("xx:yy:zz");
/// assert_eq!(tokens.scheme, ["xx", "yy"]);
/// assert_eq!(tokens.path.segments, ["zz"]);
///
/// let tokens = tokenize("http://user@example.com:8080/a/b?x=1#top");
/// let authority = tokens.authority.unwrap();
/// assert_eq!(authority.user_info, Some("user"));
/// assert_eq!(authority.host, Some("example.com"));
/// assert_eq!(authority.port, Some(8080));
/// assert_eq!(tokens.path.segments, ["a", "b"]);
/// assert_eq!(tokens.query, Some("x=1"));
/// assert_eq!(tokens.fragment, Some("top"));
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Tokens<'_> {
    let (scheme, pos) = scan_scheme(text, 0, false);
    let (authority, pos) = scan_marked_authority(text, pos);
    let full = scan_full_path(text, pos);
    Tokens {
        scheme,
        authority,
        path: full.path,
        query: full.query,
        fragment: full.fragment,
    }
}

/// Tokenizes scheme text, keeping the text after the last colon as a
/// final segment.
///
/// ```
/// use uri_kit::tokenizer::tokenize_scheme;
///
/// assert_eq!(tokenize_scheme("a:b:c"), ["a", "b", "c"]);
/// assert_eq!(tokenize_scheme("http:"), ["http"]);
/// ```
#[must_use]
pub fn tokenize_scheme(text: &str) -> Vec<&str> {
    scan_scheme(text, 0, true).0
}

/// Tokenizes bare authority text. A leading `//` is skipped if present.
#[must_use]
pub fn tokenize_authority(text: &str) -> AuthorityParts<'_> {
    let start = if text.starts_with(AUTHORITY_MARKER) {
        AUTHORITY_MARKER.len()
    } else {
        0
    };
    scan_authority(text, start).0
}

/// Tokenizes the scheme and authority of a URI, ignoring the rest.
#[must_use]
pub fn tokenize_scheme_and_authority(text: &str) -> (Vec<&str>, Option<AuthorityParts<'_>>) {
    let (scheme, pos) = scan_scheme(text, 0, false);
    let (authority, _) = scan_marked_authority(text, pos);
    (scheme, authority)
}

/// Tokenizes path, query and fragment.
#[must_use]
pub fn tokenize_full_path(text: &str) -> FullPathParts<'_> {
    scan_full_path(text, 0)
}

/// Tokenizes a path, stopping at the first `?` or `#`.
///
/// ```
/// use uri_kit::tokenizer::tokenize_path;
///
/// let parts = tokenize_path("\\a//b/");
/// assert!(parts.absolute);
/// assert_eq!(parts.segments, ["a", "b"]);
/// assert!(parts.trailing_separator);
/// ```
#[must_use]
pub fn tokenize_path(text: &str) -> PathParts<'_> {
    scan_path(text, 0).0
}

fn scan_scheme(text: &str, pos: usize, include_tail: bool) -> (Vec<&str>, usize) {
    let mut segments = Vec::new();
    let mut start = pos;
    let mut end = text.len();
    for (offset, c) in text[pos..].char_indices() {
        let at = pos + offset;
        match c {
            SCHEME_DELIMITER => {
                segments.push(&text[start..at]);
                start = at + 1;
            }
            '/' | QUERY_MARKER | FRAGMENT_MARKER => {
                end = at;
                break;
            }
            _ => {}
        }
    }
    if include_tail {
        if start < end {
            segments.push(&text[start..end]);
        }
        (segments, end)
    } else {
        (segments, start)
    }
}

/// Scans an authority only when at least three characters remain and they
/// open with `//`.
fn scan_marked_authority(text: &str, pos: usize) -> (Option<AuthorityParts<'_>>, usize) {
    let rest = &text[pos..];
    if rest.len() > 2 && rest.starts_with(AUTHORITY_MARKER) {
        let (parts, end) = scan_authority(text, pos + AUTHORITY_MARKER.len());
        ((!parts.is_empty()).then_some(parts), end)
    } else {
        (None, pos)
    }
}

fn scan_authority(text: &str, start: usize) -> (AuthorityParts<'_>, usize) {
    let mut host_start = start;
    let mut port_start: Option<usize> = None;
    let mut digits_only = false;
    let mut user_info = None;
    let mut end = text.len();
    for (offset, c) in text[start..].char_indices() {
        let at = start + offset;
        match c {
            '/' | QUERY_MARKER | FRAGMENT_MARKER => {
                end = at;
                break;
            }
            '.' if at == host_start => {
                end = at;
                break;
            }
            USER_INFO_DELIMITER => {
                // Each '@' re-emits user-info from the authority start.
                user_info = Some(&text[start..at]);
                host_start = at + 1;
            }
            PORT_DELIMITER => {
                port_start = Some(at + 1);
                digits_only = true;
            }
            _ => {
                if port_start.is_some() {
                    digits_only &= c.is_ascii_digit();
                }
            }
        }
    }

    let port = match port_start {
        Some(port_start) if digits_only && port_start > host_start => {
            let digits = &text[port_start..end];
            let port = digits.parse::<u16>().ok();
            if port.is_none() {
                trace!("port {digits:?} folded into host");
            }
            port.map(|port| (port, port_start - 1))
        }
        _ => None,
    };
    let host_end = port.map_or(end, |(_, host_end)| host_end);

    let parts = AuthorityParts {
        user_info: user_info.filter(|s| !s.is_empty()),
        host: Some(&text[host_start..host_end]).filter(|s| !s.is_empty()),
        port: port.map(|(port, _)| port),
    };
    (parts, end)
}

fn scan_full_path(text: &str, pos: usize) -> FullPathParts<'_> {
    let (path, pos) = scan_path(text, pos);
    let rest = &text[pos..];

    let mut query = None;
    let mut fragment_at = rest.strip_prefix(FRAGMENT_MARKER).map(|_| 0);
    if let Some(after) = rest.strip_prefix(QUERY_MARKER) {
        let query_end = after.find(FRAGMENT_MARKER).unwrap_or(after.len());
        query = Some(&after[..query_end]).filter(|s| !s.is_empty());
        fragment_at = (query_end < after.len()).then_some(1 + query_end);
    }
    let fragment = fragment_at
        .map(|at| &rest[at + 1..])
        .filter(|s| !s.is_empty());

    FullPathParts {
        path,
        query,
        fragment,
    }
}

fn scan_path(text: &str, pos: usize) -> (PathParts<'_>, usize) {
    let mut parts = PathParts::default();
    let mut segment_start = pos;
    let mut end = text.len();
    for (offset, c) in text[pos..].char_indices() {
        let at = pos + offset;
        if c == QUERY_MARKER || c == FRAGMENT_MARKER {
            end = at;
            break;
        }
        if is_path_separator(c) {
            if at == pos {
                parts.absolute = true;
            } else if segment_start < at {
                parts.segments.push(&text[segment_start..at]);
            }
            segment_start = at + 1;
            parts.trailing_separator = at != pos;
        } else {
            parts.trailing_separator = false;
        }
    }
    if segment_start < end {
        parts.segments.push(&text[segment_start..end]);
    }
    (parts, end)
}
