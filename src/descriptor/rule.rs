//! Transform rules and first-match routing.

use super::{MatchPattern, TransformChain};

/// A compiled `(pattern, chain)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pattern: MatchPattern,
    chain: TransformChain,
}

impl Rule {
    pub const fn new(pattern: MatchPattern, chain: TransformChain) -> Self {
        Self { pattern, chain }
    }

    pub const fn pattern(&self) -> &MatchPattern {
        &self.pattern
    }

    pub const fn chain(&self) -> &TransformChain {
        &self.chain
    }

    #[inline]
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// How the bundler treats one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Governed by the rule at `index`.
    Rule { index: usize, rule: &'a Rule },
    /// No rule matched; the file is emitted unmodified.
    PassThrough,
}

impl<'a> Route<'a> {
    pub const fn rule(&self) -> Option<&'a Rule> {
        match self {
            Self::Rule { rule, .. } => Some(*rule),
            Self::PassThrough => None,
        }
    }

    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Rule { index, .. } => Some(*index),
            Self::PassThrough => None,
        }
    }

    pub const fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }
}

/// First rule (by position) whose pattern matches `path`.
pub(super) fn first_match<'a>(rules: &'a [Rule], path: &str) -> Route<'a> {
    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(path))
        .map_or(Route::PassThrough, |(index, rule)| Route::Rule { index, rule })
}
