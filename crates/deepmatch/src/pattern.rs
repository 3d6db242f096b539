//! Pattern objects.
//!
//! A [`Pattern`] is a regular expression source plus a set of single-letter
//! flags. Comparison only looks at the source text and the flags.
//!
//! Matching is standalone API for callers holding a pattern taken out of a
//! value: [`Pattern::to_regex`] and [`Pattern::is_match`] compile the source
//! with `regex` on request, and no comparison ever calls them.
//!
//! ```
//! use deepmatch::Pattern;
//!
//! let pattern = Pattern::new("^some regex", "i").unwrap();
//! assert!(pattern.is_match("Some Regex here").unwrap());
//! assert!(Pattern::plain("(unclosed").to_regex().is_err());
//! ```

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::{DeepMatchError, Result};

/// Accepted flags, in canonical order.
pub const PATTERN_FLAGS: &str = "dgimsuvy";

/// Regular expression source and flags.
///
/// Flags are validated and stored in canonical order, so `"gi"` and `"ig"`
/// produce the same pattern.
///
/// ```
/// use deepmatch::Pattern;
///
/// let a = Pattern::new("abc", "gi").unwrap();
/// let b = Pattern::new("abc", "ig").unwrap();
/// assert_eq!(a, b);
/// assert_ne!(a, Pattern::new("abc", "g").unwrap());
/// assert!(Pattern::new("abc", "q").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    flags: String,
}

impl Pattern {
    /// Creates a pattern, validating the flags.
    pub fn new(source: &str, flags: &str) -> Result<Self> {
        for flag in flags.chars() {
            if !PATTERN_FLAGS.contains(flag) {
                return Err(DeepMatchError::InvalidPatternFlag { flag });
            }
        }
        for (i, flag) in flags.char_indices() {
            if flags[i + flag.len_utf8()..].contains(flag) {
                return Err(DeepMatchError::DuplicatePatternFlag { flag });
            }
        }

        let flags = PATTERN_FLAGS.chars().filter(|f| flags.contains(*f)).collect();
        Ok(Pattern {
            source: source.to_string(),
            flags,
        })
    }

    /// Creates a pattern without flags.
    pub fn plain(source: &str) -> Self {
        Pattern {
            source: source.to_string(),
            flags: String::new(),
        }
    }

    /// Source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Flags in canonical order.
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Returns `true` if `flag` is set.
    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }

    /// Compiles the source.
    ///
    /// `i`, `m` and `s` map onto case-insensitive, multi-line and
    /// dot-matches-newline; `y` anchors the match at the start. The other
    /// flags do not change what matches.
    pub fn to_regex(&self) -> Result<Regex> {
        let source = if self.has_flag('y') {
            format!(r"\A(?:{})", self.source)
        } else {
            self.source.clone()
        };
        let regex = RegexBuilder::new(&source)
            .case_insensitive(self.has_flag('i'))
            .multi_line(self.has_flag('m'))
            .dot_matches_new_line(self.has_flag('s'))
            .build()?;
        Ok(regex)
    }

    /// Returns `true` if the pattern matches somewhere in `text`.
    pub fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.to_regex()?.is_match(text))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}
