//! Type-safe config field path.

use std::fmt;

/// A dotted path naming a field of `rigg.toml`.
///
/// Sections expose their fields as associated constants so diagnostics
/// never carry a misspelled key:
///
/// ```ignore
/// impl OutputSection {
///     pub const PATH: FieldPath = FieldPath::new("output.path");
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Point at one element of an array field: `module.rules[2]`.
    #[inline]
    pub const fn at(self, index: usize) -> FieldRef {
        FieldRef {
            path: self,
            index: Some(index),
        }
    }
}

/// A field path, optionally narrowed to one array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef {
    pub path: FieldPath,
    pub index: Option<usize>,
}

impl From<FieldPath> for FieldRef {
    fn from(path: FieldPath) -> Self {
        Self { path, index: None }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path.as_str())?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}
