//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Errors, diagnostics and warnings             |
//! | `field`  | Type-safe field paths                        |

mod error;
mod field;

pub use error::{ConfigDiagnostic, ConfigError, ConfigWarning};
pub use field::{FieldPath, FieldRef};
