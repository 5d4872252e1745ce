//! Lexical path normalization.
//!
//! Everything here works on path strings only:
//! - `normalize_lexical` - collapse `.` and `name/..` segments
//! - `relative_within` - check a relative path never leaves its base
//! - `join_within` - join a relative path onto a base and normalize

use std::path::{Component, Path, PathBuf};

/// Why a relative path was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEscape {
    /// The path is absolute (root or drive prefix).
    Absolute,
    /// A `..` segment climbs above the base directory.
    ParentOverflow,
}

impl PathEscape {
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Absolute => "absolute paths not allowed",
            Self::ParentOverflow => "parent directory '..' escapes the base directory",
        }
    }
}

/// Collapse `.` and `name/..` segments without touching the file system.
///
/// Leading `..` segments of a relative path are kept. On an absolute path
/// they stop at the root, the same way `path.resolve` behaves.
///
/// # Example
/// ```ignore
/// normalize_lexical(Path::new("/project/./dist/../dist")) -> "/project/dist"
/// normalize_lexical(Path::new("a/./b/..")) -> "a"
/// ```
pub fn normalize_lexical(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(comp),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Check that `path` is relative and never climbs above where it starts.
///
/// `a/../b` is fine, `a/../../b` is not.
pub fn relative_within(path: &Path) -> Result<(), PathEscape> {
    let mut depth = 0usize;

    for comp in path.components() {
        match comp {
            Component::Prefix(_) | Component::RootDir => return Err(PathEscape::Absolute),
            Component::ParentDir => {
                depth = depth.checked_sub(1).ok_or(PathEscape::ParentOverflow)?;
            }
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
        }
    }
    Ok(())
}

/// Join a relative `sub` path onto `base` and normalize the result.
///
/// Refuses absolute `sub` paths and `..` segments escaping `base`.
#[inline]
pub fn join_within(base: &Path, sub: &Path) -> Result<PathBuf, PathEscape> {
    relative_within(sub)?;
    Ok(normalize_lexical(&base.join(sub)))
}
