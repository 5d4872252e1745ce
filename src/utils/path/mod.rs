//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Lexical normalization (`normalize_lexical`, `join_within`)

pub mod fs;

pub use fs::{PathEscape, join_within, normalize_lexical, relative_within};
