//! Delimiters and reserved characters shared by the tokenizer, codec and
//! serializers.

/// Primary path separator, used for all serialized output.
pub const PATH_SEPARATOR: char = '/';

/// Alternate path separator accepted on input.
pub const ALT_PATH_SEPARATOR: char = '\\';

/// Terminates each scheme segment.
pub const SCHEME_DELIMITER: char = ':';

/// Marker introducing an authority.
pub const AUTHORITY_MARKER: &str = "//";

/// Separates user-info from host inside an authority.
pub const USER_INFO_DELIMITER: char = '@';

/// Separates host from port inside an authority.
pub const PORT_DELIMITER: char = ':';

/// Introduces the query.
pub const QUERY_MARKER: char = '?';

/// Introduces the fragment.
pub const FRAGMENT_MARKER: char = '#';

/// Separates query items.
pub const QUERY_ITEM_DELIMITER: char = '&';

/// Separates a query item name from its value.
pub const QUERY_VALUE_DELIMITER: char = '=';

/// Separates a file name from its extension.
pub const EXTENSION_DELIMITER: char = '.';

/// The "current directory" dot segment.
pub const CURRENT_SEGMENT: &str = ".";

/// The "parent directory" dot segment.
pub const PARENT_SEGMENT: &str = "..";

/// Characters percent-escaped regardless of the active encoding toggles.
pub const ALWAYS_ESCAPED: [char; 7] = ['?', '\'', '"', '#', '%', '&', '+'];

/// Returns `true` for either path separator.
#[must_use]
pub const fn is_path_separator(c: char) -> bool {
    matches!(c, PATH_SEPARATOR | ALT_PATH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use crate::{ALT_PATH_SEPARATOR, ALWAYS_ESCAPED, Encoding, PATH_SEPARATOR, encode};

    #[test]
    fn reexported_separators_both_split_paths() {
        assert!(super::is_path_separator(PATH_SEPARATOR));
        assert!(super::is_path_separator(ALT_PATH_SEPARATOR));
        assert!(!super::is_path_separator(super::SCHEME_DELIMITER));
    }

    #[test]
    fn always_escaped_ignores_encoding_toggles() {
        for c in ALWAYS_ESCAPED {
            let text = c.to_string();
            assert!(encode(&text, Encoding::NONE).starts_with('%'), "{c}");
        }
    }
}
