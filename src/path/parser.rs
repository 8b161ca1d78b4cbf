//! Delimited path string parsing.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;

/// Delimiter used when none is given.
pub const DEFAULT_DELIMITER: &str = ".";

/// Escape character used when none is given.
pub const DEFAULT_ESCAPE: &str = "\\";

static DEFAULT_PARSER: Lazy<PathParser> = Lazy::new(|| PathParser {
    delimiter: '.',
    escape: '\\',
    preserve_delimiter_escaping: false,
});

/// PathParser splits a delimited string into path segments.
///
/// `escape + delimiter` is a literal delimiter and does not split,
/// `escape + escape` is a literal escape character, and any other escape
/// character is kept as is. Consecutive delimiters produce empty segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParser {
    delimiter: char,
    escape: char,
    preserve_delimiter_escaping: bool,
}

impl PathParser {
    /// Creates a parser, validating that delimiter and escape are single,
    /// distinct characters.
    pub fn new(delimiter: &str, escape: &str) -> Result<Self> {
        let delimiter = single_char(delimiter)
            .ok_or_else(|| Error::invalid_argument("Only 1 character is allowed for delimiter."))?;
        let escape = single_char(escape)
            .ok_or_else(|| Error::invalid_argument("Only 1 escape character is allowed."))?;
        if delimiter == escape {
            return Err(Error::invalid_argument(
                "Delimiter and escape character must be different.",
            ));
        }
        Ok(PathParser {
            delimiter,
            escape,
            preserve_delimiter_escaping: false,
        })
    }

    /// Creates a parser for `delimiter` with the default escape character.
    pub fn with_delimiter(delimiter: &str) -> Result<Self> {
        if delimiter == DEFAULT_DELIMITER {
            return Ok(*DEFAULT_PARSER);
        }
        PathParser::new(delimiter, DEFAULT_ESCAPE)
    }

    /// Keeps `escape + delimiter` (and `escape + escape`) sequences verbatim
    /// in the output so segments can be parsed again later.
    pub fn preserve_delimiter_escaping(mut self, preserve: bool) -> Self {
        self.preserve_delimiter_escaping = preserve;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn escape(&self) -> char {
        self.escape
    }

    /// Splits `path` into segments. An empty path has no segments.
    pub fn parse(&self, path: &str) -> Vec<String> {
        if path.is_empty() {
            return Vec::new();
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = path.chars().peekable();

        while let Some(c) = chars.next() {
            if c == self.escape {
                match chars.peek().copied() {
                    Some(next) if next == self.escape || next == self.delimiter => {
                        chars.next();
                        if self.preserve_delimiter_escaping {
                            current.push(c);
                        }
                        current.push(next);
                    }
                    _ => current.push(c),
                }
            } else if c == self.delimiter {
                segments.push(std::mem::take(&mut current));
            } else {
                current.push(c);
            }
        }
        segments.push(current);
        segments
    }
}

impl Default for PathParser {
    fn default() -> Self {
        *DEFAULT_PARSER
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Splits `path` on `delimiter`, honoring `escape`.
pub fn parse_path(
    path: &str,
    delimiter: &str,
    escape: &str,
    preserve_delimiter_escaping: bool,
) -> Result<Vec<String>> {
    let parser = PathParser::new(delimiter, escape)?
        .preserve_delimiter_escaping(preserve_delimiter_escaping);
    Ok(parser.parse(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(path: &str) -> Vec<String> {
        PathParser::default().parse(path)
    }

    #[test]
    fn test_plain_segments() {
        assert_eq!(parse("key1.key2.key3"), vec!["key1", "key2", "key3"]);
        assert_eq!(parse("key1"), vec!["key1"]);
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_consecutive_delimiters_are_significant() {
        assert_eq!(parse("a..b"), vec!["a", "", "b"]);
        assert_eq!(parse(".a."), vec!["", "a", ""]);
    }

    #[test]
    fn test_escaped_delimiter() {
        assert_eq!(parse("a\\.b"), vec!["a.b"]);
        assert_eq!(parse("key1\\.key2.key3"), vec!["key1.key2", "key3"]);
    }

    #[test]
    fn test_escaped_escape() {
        assert_eq!(parse("a\\\\.b"), vec!["a\\", "b"]);
        assert_eq!(parse("a\\\\\\.b"), vec!["a\\.b"]);
        assert_eq!(parse("a\\\\b"), vec!["a\\b"]);
    }

    #[test]
    fn test_lone_escape_is_literal() {
        assert_eq!(parse("a\\b.c"), vec!["a\\b", "c"]);
        assert_eq!(parse("trailing\\"), vec!["trailing\\"]);
    }

    #[test]
    fn test_preserve_delimiter_escaping() {
        let parser = PathParser::default().preserve_delimiter_escaping(true);
        assert_eq!(parser.parse("a\\.b.c"), vec!["a\\.b", "c"]);
        assert_eq!(parser.parse("a\\\\.b"), vec!["a\\\\", "b"]);
    }

    #[test]
    fn test_custom_delimiter_and_escape() {
        let parsed = parse_path("a~/b/c", "/", "~", false).unwrap();
        assert_eq!(parsed, vec!["a/b", "c"]);
    }

    #[test]
    fn test_strings_without_special_characters_are_one_segment() {
        for s in ["abc", "hello world", "x-y_z", "ключ"] {
            for (delimiter, escape) in [(".", "\\"), ("/", "~"), ("|", "#")] {
                assert_eq!(parse_path(s, delimiter, escape, false).unwrap(), vec![s]);
            }
        }
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(PathParser::new("..", "\\").unwrap_err().is_invalid_argument());
        assert!(PathParser::new("", "\\").unwrap_err().is_invalid_argument());
        assert!(PathParser::new(".", "\\\\").unwrap_err().is_invalid_argument());
        assert!(PathParser::new(".", ".").unwrap_err().is_invalid_argument());
    }
}
