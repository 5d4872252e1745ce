//! Configuration section definitions.
//!
//! Each module corresponds to a section in `rigg.toml`:
//!
//! | Module   | TOML Section   | Purpose                          |
//! |----------|----------------|----------------------------------|
//! | `output` | `[output]`     | Emitted file name and directory  |
//! | `module` | `[module]`     | Ordered file routing rules       |

mod module;
mod output;

pub use module::{LoaderSpec, ModuleSection, RuleEntry, StepEntry};
pub use output::OutputSection;
