//! Configuration error and warning types.

use super::FieldRef;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Fatal configuration errors. Any of these aborts loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    // NOTE: diagnostics carry the underlying cause in their message, no source()
    #[error("invalid path\n{0}")]
    InvalidPath(ConfigDiagnostic),

    #[error("invalid rule pattern\n{0}")]
    InvalidPattern(ConfigDiagnostic),

    #[error("invalid loader chain\n{0}")]
    InvalidLoader(ConfigDiagnostic),
}

impl ConfigError {
    /// The field diagnostic, for validation errors.
    pub fn diagnostic(&self) -> Option<&ConfigDiagnostic> {
        match self {
            Self::InvalidPath(diag) | Self::InvalidPattern(diag) | Self::InvalidLoader(diag) => {
                Some(diag)
            }
            Self::Io(..) | Self::Toml(_) => None,
        }
    }
}

// ============================================================================
// ConfigDiagnostic
// ============================================================================

/// A single configuration diagnostic
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    /// Config field, e.g. `output.path` or `module.rules[1]`
    pub field: FieldRef,
    /// Error description
    pub message: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(field: impl Into<FieldRef>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field path in cyan brackets
        writeln!(
            f,
            "{}{}{}",
            "[".dimmed(),
            self.field.to_string().cyan(),
            "]".dimmed()
        )?;
        // Error message with red bullet
        write!(f, "{} {}", "→".red(), self.message)?;
        // Hint in yellow
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// ConfigWarning
// ============================================================================

/// Non-fatal findings. Loading continues after logging them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `module.rules` is empty, so every file passes through unmodified.
    EmptyRuleSet,
    /// A key in the config file that no section knows about.
    UnknownField(String),
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRuleSet => write!(
                f,
                "no module rules defined, every file passes through unmodified"
            ),
            Self::UnknownField(field) => write!(f, "unknown field `{field}` ignored"),
        }
    }
}
