//! Percent-encoding codec.
//!
//! Output is controlled by two independent toggles, see [`Encoding`]. Input
//! decoding is lenient: malformed escapes are copied through untouched.

use std::borrow::Cow;

use crate::constants::ALWAYS_ESCAPED;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Output toggles for percent-encoding.
///
/// Characters in [`ALWAYS_ESCAPED`] are escaped whatever the toggles say.
///
/// # Examples
///
/// ```
/// use uri_kit::{encode, Encoding};
///
/// assert_eq!(encode("a b", Encoding::ESCAPE), "a+b");
/// assert_eq!(encode("a b", Encoding::NONE), "a b");
/// assert_eq!(encode("é", Encoding::FULL), "%C3%A9");
/// assert_eq!(encode("a&b", Encoding::NONE), "a%26b");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoding {
    /// Write a space as `+`.
    pub escape: bool,
    /// Percent-escape every non-ASCII character as its UTF-8 bytes.
    pub encode: bool,
}

impl Encoding {
    /// Only the always-escaped set is touched.
    pub const NONE: Self = Self::new(false, false);

    /// Spaces become `+`, non-ASCII text is left as is.
    pub const ESCAPE: Self = Self::new(true, false);

    /// Spaces become `+` and non-ASCII text is percent-escaped.
    pub const FULL: Self = Self::new(true, true);

    /// Creates an encoding from its two toggles.
    #[must_use]
    pub const fn new(escape: bool, encode: bool) -> Self {
        Self { escape, encode }
    }

    const fn needs_escape(self, c: char) -> bool {
        matches!(c, '?' | '\'' | '"' | '#' | '%' | '&' | '+')
            || (c == ' ' && self.escape)
            || (!c.is_ascii() && self.encode)
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::FULL
    }
}

/// Codec settings threaded through parsing and serialization.
///
/// # Examples
///
/// ```
/// use uri_kit::{Encoding, PercentCodec};
///
/// let codec = PercentCodec::new()
///     .with_decode_input(false)
///     .with_output(Encoding::ESCAPE);
///
/// assert_eq!(codec.decode("a%20b"), "a%20b");
/// assert_eq!(codec.encode("a b"), "a+b");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PercentCodec {
    /// Percent-decode text handed to parsers and setters.
    pub decode_input: bool,
    /// Toggles used by [`PercentCodec::encode`].
    pub output: Encoding,
}

impl Default for PercentCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl PercentCodec {
    /// Creates the default codec: decode input, fully encode output.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            decode_input: true,
            output: Encoding::FULL,
        }
    }

    /// Sets whether input text is percent-decoded.
    #[must_use]
    pub const fn with_decode_input(mut self, decode_input: bool) -> Self {
        self.decode_input = decode_input;
        self
    }

    /// Sets the output encoding.
    #[must_use]
    pub const fn with_output(mut self, output: Encoding) -> Self {
        self.output = output;
        self
    }

    /// Decodes `value` if input decoding is enabled.
    #[must_use]
    pub fn decode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.decode_input {
            decode(value)
        } else {
            Cow::Borrowed(value)
        }
    }

    /// Encodes `value` with the configured output toggles.
    #[must_use]
    pub fn encode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        encode(value, self.output)
    }
}

/// Percent-encodes `value`.
///
/// Returns the input unchanged, without allocating, when no character needs
/// escaping.
#[must_use]
pub fn encode(value: &str, encoding: Encoding) -> Cow<'_, str> {
    if !value.chars().any(|c| encoding.needs_escape(c)) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + value.len() / 2);
    for c in value.chars() {
        if ALWAYS_ESCAPED.contains(&c) || (!c.is_ascii() && encoding.encode) {
            push_escaped(&mut out, c);
        } else if c == ' ' && encoding.escape {
            out.push('+');
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn push_escaped(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    for &b in c.encode_utf8(&mut buf).as_bytes() {
        out.push('%');
        out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
        out.push(char::from(HEX_DIGITS[usize::from(b & 0x0F)]));
    }
}

/// Percent-decodes `value`, turning `+` into a space.
///
/// A `%` that does not start a well-formed UTF-8 escape sequence is kept
/// literally, as are the characters after it.
///
/// # Examples
///
/// ```
/// use uri_kit::decode;
///
/// assert_eq!(decode("a+b"), "a b");
/// assert_eq!(decode("%D0%BC%D0%B0"), "ма");
/// assert_eq!(decode("100%"), "100%");
/// assert_eq!(decode("%C3%28"), "%C3(");
/// ```
#[must_use]
pub fn decode(value: &str) -> Cow<'_, str> {
    if !value.contains(['%', '+']) {
        return Cow::Borrowed(value);
    }
    let bytes = value.as_bytes();
    let mut out = String::with_capacity(value.len());
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'+' => {
                out.push(' ');
                pos += 1;
            }
            b'%' => match decode_sequence(&bytes[pos..]) {
                Some((c, consumed)) => {
                    out.push(c);
                    pos += consumed;
                }
                None => {
                    out.push('%');
                    pos += 1;
                }
            },
            _ => {
                // '%' and '+' are ASCII, so both ends sit on char boundaries.
                let end = bytes[pos..]
                    .iter()
                    .position(|b| matches!(b, b'%' | b'+'))
                    .map_or(bytes.len(), |offset| pos + offset);
                out.push_str(&value[pos..end]);
                pos = end;
            }
        }
    }
    Cow::Owned(out)
}

/// Decodes one code point from a run of `%XX` triplets.
///
/// Returns the character and the number of input bytes consumed.
fn decode_sequence(bytes: &[u8]) -> Option<(char, usize)> {
    let lead = escaped_byte(bytes, 0)?;
    let (len, mut code) = match lead {
        0x00..=0x7F => (1, u32::from(lead)),
        0xC2..=0xDF => (2, u32::from(lead & 0x1F)),
        0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
        0xF0..=0xF4 => (4, u32::from(lead & 0x07)),
        _ => return None,
    };
    for index in 1..len {
        let next = escaped_byte(bytes, index * 3)?;
        if next & 0xC0 != 0x80 {
            return None;
        }
        code = (code << 6) | u32::from(next & 0x3F);
    }
    char::from_u32(code).map(|c| (c, len * 3))
}

/// Reads the byte escaped by the triplet starting at `at`.
fn escaped_byte(bytes: &[u8], at: usize) -> Option<u8> {
    match bytes.get(at..at + 3)? {
        [b'%', high, low] => {
            let high = char::from(*high).to_digit(16)?;
            let low = char::from(*low).to_digit(16)?;
            u8::try_from((high << 4) | low).ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_maps_space_to_plus() {
        assert_eq!(encode("a b", Encoding::ESCAPE), "a+b");
        assert_eq!(decode("a+b"), "a b");
    }

    #[test]
    fn space_kept_without_escape() {
        assert_eq!(encode("a b", Encoding::new(false, true)), "a b");
    }

    #[test]
    fn always_escaped_set() {
        assert_eq!(encode("?'\"#%&+", Encoding::NONE), "%3F%27%22%23%25%26%2B");
    }

    #[test]
    fn encode_multibyte() {
        assert_eq!(
            encode("Россия", Encoding::FULL),
            "%D0%A0%D0%BE%D1%81%D1%81%D0%B8%D1%8F"
        );
        assert_eq!(encode("😀", Encoding::FULL), "%F0%9F%98%80");
        assert_eq!(encode("éè#çà", Encoding::ESCAPE), "éè%23çà");
    }

    #[test]
    fn decode_multibyte() {
        assert_eq!(decode("%D0%A0%D0%BE%D1%81%D1%81%D0%B8%D1%8F"), "Россия");
        assert_eq!(decode("%F0%9F%98%80"), "😀");
        assert_eq!(decode("%c3%a9"), "é");
    }

    #[test]
    fn decode_plus_escape_is_literal_plus() {
        assert_eq!(decode("a%2Bb"), "a+b");
        assert_eq!(decode("Hello%20world"), "Hello world");
    }

    #[test]
    fn malformed_escapes_pass_through() {
        assert_eq!(decode("%"), "%");
        assert_eq!(decode("%4"), "%4");
        assert_eq!(decode("%zz"), "%zz");
        assert_eq!(decode("%FF"), "%FF");
        assert_eq!(decode("%C3"), "%C3");
        assert_eq!(decode("%C3%28"), "%C3(");
        assert_eq!(decode("%ED%A0%80"), "%ED%A0%80");
    }

    #[test]
    fn unchanged_input_is_borrowed() {
        assert!(matches!(encode("plain/text", Encoding::FULL), Cow::Borrowed(_)));
        assert!(matches!(decode("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn round_trip_mixed_text() {
        let text = "мама мыла раму? 100% & more+";
        assert_eq!(decode(&encode(text, Encoding::FULL)), text);
    }

    #[test]
    fn codec_builder_pattern() {
        let codec = PercentCodec::new()
            .with_decode_input(false)
            .with_output(Encoding::NONE);
        assert!(!codec.decode_input);
        assert_eq!(codec.output, Encoding::NONE);
        assert_eq!(codec.decode("a+b"), "a+b");
        assert_eq!(codec.encode("a b"), "a b");
    }

    #[test]
    fn default_codec() {
        let codec = PercentCodec::default();
        assert!(codec.decode_input);
        assert_eq!(codec.output, Encoding::FULL);
        assert_eq!(Encoding::default(), Encoding::FULL);
    }
}
