//! PHP compatible string functions.
//!
//! Wikitext parser function arguments were historically processed by PHP, and
//! page authors rely on the exact whitespace and escaping rules of those
//! functions.

use std::borrow::Cow;

/// The characters stripped by [`trim`](https://php.net/trim) when no explicit
/// character list is given.
const TRIM_CHARS: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0b'];

/// Strips whitespace from both ends of a string like
/// [`trim`](https://php.net/trim).
///
/// This differs from [`str::trim_ascii`] in that NUL and vertical tab are
/// stripped and form feed is not.
#[inline]
pub fn trim(s: &str) -> &str {
    s.trim_matches(TRIM_CHARS)
}

/// Converts special characters to HTML entities like
/// [`htmlspecialchars`](https://php.net/htmlspecialchars) with the default
/// `ENT_QUOTES | ENT_SUBSTITUTE | ENT_HTML401` flags.
///
/// Existing entities are encoded again (`double_encode` is on).
pub fn htmlspecialchars(s: &str) -> Cow<'_, str> {
    strtr(
        s,
        &[
            ("&", "&amp;"),
            ("\"", "&quot;"),
            ("'", "&#039;"),
            ("<", "&lt;"),
            (">", "&gt;"),
        ],
    )
}

/// Returns true if `haystack` begins with `needle`. An empty needle always
/// matches.
#[inline]
pub fn starts_with(haystack: &str, needle: &str) -> bool {
    haystack.starts_with(needle)
}

/// Returns true if `haystack` ends with `needle`. An empty needle always
/// matches.
#[inline]
pub fn ends_with(haystack: &str, needle: &str) -> bool {
    haystack.ends_with(needle)
}

/// Replaces single characters in the input with the given replacement strings
/// like [`strtr`](https://php.net/strtr) with an array argument where every key
/// is one byte long.
fn strtr<'a>(input: &'a str, replacements: &[(&str, &str)]) -> Cow<'a, str> {
    let mut out = String::new();
    let mut flushed = 0;
    for (index, c) in input.char_indices() {
        let mut buf = [0; 4];
        let c = &*c.encode_utf8(&mut buf);
        if let Some((_, replace)) = replacements.iter().find(|(find, _)| *find == c) {
            out += &input[flushed..index];
            out += replace;
            flushed = index + c.len();
        }
    }

    if flushed == 0 {
        Cow::Borrowed(input)
    } else {
        out += &input[flushed..];
        Cow::Owned(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim() {
        assert_eq!(trim("  a b  "), "a b");
        assert_eq!(trim("\t\n\r\0\x0ba\x0b"), "a");
        assert_eq!(trim("\x0ca\x0c"), "\x0ca\x0c", "form feed is not trimmed");
        assert_eq!(trim(""), "");
    }

    #[test]
    fn test_htmlspecialchars() {
        assert_eq!(htmlspecialchars("plain"), Cow::Borrowed("plain"));
        assert_eq!(
            htmlspecialchars(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
        assert_eq!(
            htmlspecialchars("&amp;"),
            "&amp;amp;",
            "existing entities should be encoded again"
        );
        assert_eq!(htmlspecialchars("ünïcødé & co"), "ünïcødé &amp; co");
    }

    #[test]
    fn test_affixes() {
        assert!(starts_with("commaspace2", "commaspace"));
        assert!(starts_with("comma", ""));
        assert!(!starts_with("com", "comma"));
        assert!(ends_with("textfield", "field"));
        assert!(ends_with("textfield", ""));
        assert!(!ends_with("field", "textfield"));
    }
}
