//! Message key parsing.

use std::fmt;

/// Separator between the segments of a message key.
pub const KEY_SEPARATOR: char = '.';

/// A dotted path identifying a message inside a translation file.
///
/// `common.buttons.save` addresses `{"common": {"buttons": {"save": ...}}}`.
/// Literal dots inside a segment cannot be escaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey(String);

impl MessageKey {
    /// Creates a key from user input.
    ///
    /// Returns `None` for an empty string. Anything else is accepted as-is,
    /// including empty segments such as `a..b`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() { None } else { Some(Self(text.to_string())) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_SEPARATOR)
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn parse_rejects_empty() {
        assert_that!(MessageKey::parse(""), none());
    }

    #[rstest]
    #[case::single("hello", &["hello"])]
    #[case::nested("common.buttons.save", &["common", "buttons", "save"])]
    #[case::empty_segment("a..b", &["a", "", "b"])]
    #[case::whitespace(" ", &[" "])]
    fn segments_split_on_dots(#[case] text: &str, #[case] expected: &[&str]) {
        let key = MessageKey::parse(text).unwrap();

        let segments: Vec<&str> = key.segments().collect();
        assert_that!(segments, eq(expected));
    }

    #[rstest]
    fn display_shows_original_text() {
        let key = MessageKey::parse("common.hello");

        assert_that!(key.map(|k| k.to_string()), some(eq("common.hello")));
    }
}
