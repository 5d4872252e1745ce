//! `[module]` section configuration.
//!
//! Rules route files to loader chains. Order matters: the first rule whose
//! `test` matches a file governs it.
//!
//! # Example
//!
//! ```toml
//! [[module.rules]]
//! test = '\.css$'
//! loader = "style-loader!css-loader"
//!
//! [[module.rules]]
//! test = '/\.(jpe?g|png|gif|svg)$/i'     # literal form with flags
//! loader = "url-loader?name=app/images/[name].[ext]"
//!
//! [[module.rules]]
//! test = '\.scss$'
//! loader = [
//!     "style-loader",
//!     { loader = "css-loader", options = { modules = true } },
//!     "sass-loader",
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::FieldPath;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSection {
    /// Ordered rule list, first match wins.
    pub rules: Vec<RuleEntry>,
}

impl ModuleSection {
    pub const RULES: FieldPath = FieldPath::new("module.rules");
}

/// One `[[module.rules]]` entry as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Regular expression, bare (`\.css$`) or literal (`/\.css$/i`).
    pub test: String,

    /// Match case-insensitively. Same as the `i` literal flag.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub case_insensitive: bool,

    /// Loader chain, applied right-to-left by the bundler.
    pub loader: LoaderSpec,
}

impl RuleEntry {
    /// Rule with a wire-form loader chain (`a!b?k=v`).
    pub fn new(test: impl Into<String>, loader: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            case_insensitive: false,
            loader: LoaderSpec::Chain(loader.into()),
        }
    }

    pub fn ignore_case(mut self) -> Self {
        self.case_insensitive = true;
        self
    }
}

/// Loader chain in either of its accepted forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoaderSpec {
    /// `"style-loader!css-loader"`
    Chain(String),
    /// `["style-loader", { loader = "css-loader", options = { ... } }]`
    Steps(Vec<StepEntry>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepEntry {
    /// `"url-loader?limit=8192"`
    Simple(String),
    /// `{ loader = "url-loader", options = { limit = 8192 } }`
    Full {
        loader: String,
        #[serde(default)]
        options: BTreeMap<String, toml::Value>,
    },
}
