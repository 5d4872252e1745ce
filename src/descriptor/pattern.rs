//! Rule match patterns.
//!
//! A `test` value is either a bare regular expression (`\.css$`) or a
//! literal carrying flags (`/\.(png|svg)$/i`). A value that starts with `/`
//! and ends with `/` plus only letters is always read as a literal, so
//! `/node_modules/` matches `node_modules`.

use regex::{Regex, RegexBuilder};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("unsupported flag `{0}` (expected i, m, s or u)")]
    UnknownFlag(char),

    #[error("{0}")]
    Regex(#[from] regex::Error),
}

/// Matching flags, written as the suffix of a literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    /// `i`
    pub ignore_case: bool,
    /// `m`: `^`/`$` match at line boundaries
    pub multi_line: bool,
    /// `s`: `.` matches `\n`
    pub dot_all: bool,
}

impl PatternFlags {
    fn parse(flags: &str) -> Result<Self, PatternError> {
        let mut out = Self::default();
        for c in flags.chars() {
            match c {
                'i' => out.ignore_case = true,
                'm' => out.multi_line = true,
                's' => out.dot_all = true,
                // Unicode mode is always on
                'u' => {}
                other => return Err(PatternError::UnknownFlag(other)),
            }
        }
        Ok(out)
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (set, c) in [
            (self.ignore_case, "i"),
            (self.multi_line, "m"),
            (self.dot_all, "s"),
        ] {
            if set {
                f.write_str(c)?;
            }
        }
        Ok(())
    }
}

/// A compiled rule pattern together with the text it came from.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    source: String,
    flags: PatternFlags,
    regex: Regex,
}

impl MatchPattern {
    /// Compile a `test` value. `ignore_case` forces the `i` flag on.
    pub fn parse(test: &str, ignore_case: bool) -> Result<Self, PatternError> {
        let (source, mut flags) = split_literal(test)?;
        flags.ignore_case |= ignore_case;

        if source.is_empty() {
            return Err(PatternError::Empty);
        }

        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.ignore_case)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_all)
            .build()?;

        Ok(Self {
            source: source.to_owned(),
            flags,
            regex,
        })
    }

    #[inline]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Pattern text without delimiters or flags.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub const fn flags(&self) -> PatternFlags {
        self.flags
    }
}

impl PartialEq for MatchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for MatchPattern {}

/// Renders as a literal: `/\.css$/i`.
impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// Split `/source/flags` into its parts; anything else is a bare pattern.
fn split_literal(test: &str) -> Result<(&str, PatternFlags), PatternError> {
    if let Some(rest) = test.strip_prefix('/')
        && let Some(end) = rest.rfind('/')
    {
        let (source, flags) = (&rest[..end], &rest[end + 1..]);
        if flags.chars().all(|c| c.is_ascii_alphabetic()) {
            return Ok((source, PatternFlags::parse(flags)?));
        }
    }
    Ok((test, PatternFlags::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_pattern() {
        let pattern = MatchPattern::parse(r"\.css$", false).unwrap();
        assert_eq!(pattern.source(), r"\.css$");
        assert_eq!(pattern.flags(), PatternFlags::default());
        assert!(pattern.is_match("src/app.css"));
        assert!(!pattern.is_match("src/app.CSS"));
        assert!(!pattern.is_match("src/app.css.map"));
    }

    #[test]
    fn test_literal_with_flags() {
        let pattern = MatchPattern::parse(r"/\.(jpe?g|png|gif|svg)$/i", false).unwrap();
        assert_eq!(pattern.source(), r"\.(jpe?g|png|gif|svg)$");
        assert!(pattern.flags().ignore_case);
        assert!(pattern.is_match("photos/Beach.JPEG"));
        assert!(pattern.is_match("logo.svg"));
        assert!(!pattern.is_match("logo.svgz"));
        assert_eq!(pattern.to_string(), r"/\.(jpe?g|png|gif|svg)$/i");
    }

    #[test]
    fn test_ignore_case_argument() {
        let pattern = MatchPattern::parse(r"\.png$", true).unwrap();
        assert!(pattern.is_match("ICON.PNG"));
        assert_eq!(pattern.to_string(), r"/\.png$/i");
    }

    #[test]
    fn test_slash_without_flags_is_bare() {
        // Trailing text after the last slash is not all letters
        let pattern = MatchPattern::parse(r"/assets/.+\.woff2?", false).unwrap();
        assert_eq!(pattern.source(), r"/assets/.+\.woff2?");
        assert!(pattern.is_match("/app/assets/fonts/a.woff2"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            MatchPattern::parse("[unclosed", false),
            Err(PatternError::Regex(_))
        ));
        assert!(matches!(
            MatchPattern::parse("", false),
            Err(PatternError::Empty)
        ));
        assert!(matches!(
            MatchPattern::parse("//i", false),
            Err(PatternError::Empty)
        ));
        assert!(matches!(
            MatchPattern::parse(r"/\.css$/g", false),
            Err(PatternError::UnknownFlag('g'))
        ));
    }

    #[test]
    fn test_equality_ignores_compiled_state() {
        let a = MatchPattern::parse(r"/\.js$/i", false).unwrap();
        let b = MatchPattern::parse(r"\.js$", true).unwrap();
        assert_eq!(a, b);
    }
}
