//! Bundler configuration management for `rigg.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── module     # [module] rules
//! │   └── output     # [output]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostic, ConfigWarning
//! │   └── field      # FieldPath, FieldRef
//! └── mod.rs         # RiggConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Key                | Purpose                                   |
//! |--------------------|-------------------------------------------|
//! | `entry`            | Build entry point, relative to the base   |
//! | `[output]`         | Emitted filename and output directory     |
//! | `[[module.rules]]` | Ordered file routing to loader chains     |
//!
//! The raw config is only an input. [`load`] turns it into a validated
//! [`Descriptor`], which is what the rest of the crate works with.

pub mod section;
pub mod types;
mod util;

use util::{expand_dir, find_config_file};

// Re-export from section/
pub use section::{LoaderSpec, ModuleSection, OutputSection, RuleEntry, StepEntry};

// Re-export from types/
pub use types::{ConfigDiagnostic, ConfigError, ConfigWarning, FieldPath, FieldRef};

use crate::{debug, descriptor::Descriptor, log, utils::path::normalize_lexical};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing rigg.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiggConfig {
    /// Build entry point, relative to the base directory.
    pub entry: String,

    /// Output settings
    pub output: OutputSection,

    /// Module rules
    pub module: ModuleSection,
}

impl Default for RiggConfig {
    fn default() -> Self {
        Self {
            entry: "./index.js".into(),
            output: OutputSection::default(),
            module: ModuleSection::default(),
        }
    }
}

impl RiggConfig {
    pub const ENTRY: FieldPath = FieldPath::new("entry");

    /// Assemble a config from literal values.
    pub fn new(entry: impl Into<String>, output: OutputSection, rules: Vec<RuleEntry>) -> Self {
        Self {
            entry: entry.into(),
            output,
            module: ModuleSection { rules },
        }
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file, returning the config and any unknown field paths.
    pub fn from_path(path: &Path) -> Result<(Self, Vec<String>), ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::parse_with_ignored(&content)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }
}

// ============================================================================
// loading
// ============================================================================

/// Locate, parse and validate the config file.
///
/// - `config_name`: file to look for, searched upward from `cwd` when relative
/// - `root`: base directory override; defaults to the config file's directory
pub fn load(config_name: &Path, root: Option<&Path>, cwd: &Path) -> Result<Descriptor> {
    let Some(config_path) = find_config_file(cwd, config_name) else {
        bail!(
            "Config file '{}' not found. Run 'rigg init' to create one.",
            config_name.display()
        );
    };
    let config_path = normalize_lexical(&config_path);
    debug!("config"; "using {}", config_path.display());

    let (config, ignored) = RiggConfig::from_path(&config_path)?;
    if !ignored.is_empty() {
        print_unknown_fields_warning(&ignored, &config_path);
    }

    let base_dir = resolve_base_dir(root, &config_path, cwd)?;
    debug!("config"; "base directory {}", base_dir.display());

    let descriptor = Descriptor::new(&base_dir, &config)
        .with_context(|| format!("Failed to load '{}'", config_path.display()))?
        .with_warnings(ignored.into_iter().map(ConfigWarning::UnknownField));

    Ok(descriptor)
}

/// Pick the base directory: `--root` when given, else the config's parent.
fn resolve_base_dir(root: Option<&Path>, config_path: &Path, cwd: &Path) -> Result<PathBuf> {
    let base = match root {
        Some(root) => expand_dir(root, cwd),
        None => config_path
            .parent()
            .map(Path::to_path_buf)
            .context("Config file has no parent directory")?,
    };
    Ok(normalize_lexical(&base))
}

/// Print warning about unknown fields.
fn print_unknown_fields_warning(fields: &[String], path: &Path) {
    let display_path = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    log!("warning"; "unknown fields in {}:", display_path);
    for field in fields {
        log!("warning"; "- {}", ConfigWarning::UnknownField(field.clone()));
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> RiggConfig {
    let (parsed, ignored) = RiggConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
