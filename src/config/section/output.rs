//! `[output]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [output]
//! filename = "./output.js"   # emitted bundle name
//! path = "dist"              # relative to the base directory
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::FieldPath;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Name of the emitted artifact, relative to `path`.
    pub filename: String,

    /// Output directory, relative to the base directory.
    /// Resolved to an absolute path when the descriptor is built.
    pub path: PathBuf,
}

impl OutputSection {
    pub const FILENAME: FieldPath = FieldPath::new("output.filename");
    pub const PATH: FieldPath = FieldPath::new("output.path");

    pub fn new(filename: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self::new("output.js", "dist")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.output.filename, "output.js");
        assert_eq!(config.output.path, PathBuf::from("dist"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = test_parse_config("[output]\nfilename = \"./bundle.js\"");
        assert_eq!(config.output.filename, "./bundle.js");
        assert_eq!(config.output.path, PathBuf::from("dist"));
    }
}
