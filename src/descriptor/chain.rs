//! Loader chains.
//!
//! Wire form: steps separated by `!`, each an identifier with an optional
//! query carrying its options:
//!
//! ```text
//! style-loader!css-loader
//! url-loader?name=app/images/[name].[ext]&limit=8192
//! babel-loader?{"cacheDirectory":true}
//! ```
//!
//! The bundler runs the steps right-to-left. Option values are stored as
//! given; only the loader that owns them interprets them.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::config::{LoaderSpec, StepEntry};

const STEP_SEPARATOR: char = '!';
const QUERY_START: char = '?';

/// Bytes escaped when rendering query-style options.
const QUERY_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'?');

/// Ordered option map of one step.
pub type LoaderOptions = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("loader chain is empty")]
    Empty,

    #[error("step {0} has an empty loader name")]
    EmptyStep(usize),

    #[error("step {index}: `{name}` contains `!`, list each loader separately")]
    Separator { index: usize, name: String },

    #[error("step {0}: option with an empty key")]
    EmptyOptionKey(usize),

    #[error("step {index}: invalid options: {message}")]
    Options { index: usize, message: String },
}

// ============================================================================
// TransformStep
// ============================================================================

/// One loader identifier plus its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformStep {
    loader: String,
    options: LoaderOptions,
}

impl TransformStep {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: LoaderOptions::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn loader(&self) -> &str {
        &self.loader
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Parse `name?query` (no `!`).
    fn parse(index: usize, raw: &str) -> Result<Self, ChainError> {
        let (name, query) = match raw.split_once(QUERY_START) {
            Some((name, query)) => (name.trim(), Some(query)),
            None => (raw.trim(), None),
        };

        if name.is_empty() {
            return Err(ChainError::EmptyStep(index));
        }
        if name.contains(STEP_SEPARATOR) {
            return Err(ChainError::Separator {
                index,
                name: name.to_owned(),
            });
        }

        let options = match query {
            None => LoaderOptions::new(),
            Some(query) if query.trim_start().starts_with('{') => parse_json_query(index, query)?,
            Some(query) => parse_query(index, query)?,
        };

        Ok(Self {
            loader: name.to_owned(),
            options,
        })
    }

    /// Build from a `{ loader = ..., options = {...} }` entry.
    fn from_table(
        index: usize,
        loader: &str,
        options: &std::collections::BTreeMap<String, toml::Value>,
    ) -> Result<Self, ChainError> {
        let mut step = Self::parse(index, loader)?;
        for (key, value) in options {
            if key.is_empty() {
                return Err(ChainError::EmptyOptionKey(index));
            }
            step.options.insert(key.clone(), toml_to_json(index, value)?);
        }
        Ok(step)
    }

    /// Whether options can be written as `k=v&flag` without losing type.
    fn has_query_options(&self) -> bool {
        self.options
            .values()
            .all(|v| matches!(v, Value::String(_) | Value::Bool(true)))
    }
}

impl fmt::Display for TransformStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.loader)?;
        if self.options.is_empty() {
            return Ok(());
        }

        write!(f, "{}", QUERY_START)?;
        if !self.has_query_options() {
            let json = serde_json::to_string(&self.options).map_err(|_| fmt::Error)?;
            // `!` only occurs inside JSON strings, where `\u0021` is equivalent
            return f.write_str(&json.replace(STEP_SEPARATOR, "\\u0021"));
        }

        for (i, (key, value)) in self.options.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}", utf8_percent_encode(key, QUERY_ESCAPE))?;
            if let Value::String(s) = value {
                write!(f, "={}", utf8_percent_encode(s, QUERY_ESCAPE))?;
            }
        }
        Ok(())
    }
}

/// TOML option value as JSON. Datetimes become their RFC 3339 string.
fn toml_to_json(index: usize, value: &toml::Value) -> Result<Value, ChainError> {
    Ok(match value {
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| toml_to_json(index, item))
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(key, item)| toml_to_json(index, item).map(|v| (key.clone(), v)))
                .collect::<Result<_, _>>()?,
        ),
        other => serde_json::to_value(other).map_err(|e| ChainError::Options {
            index,
            message: e.to_string(),
        })?,
    })
}

/// `k=v&flag` → `{k: "v", flag: true}`.
fn parse_query(index: usize, query: &str) -> Result<LoaderOptions, ChainError> {
    let mut options = LoaderOptions::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (decode(key), Value::String(decode(value))),
            None => (decode(pair), Value::Bool(true)),
        };
        if key.is_empty() {
            return Err(ChainError::EmptyOptionKey(index));
        }
        options.insert(key, value);
    }
    Ok(options)
}

fn parse_json_query(index: usize, query: &str) -> Result<LoaderOptions, ChainError> {
    serde_json::from_str(query).map_err(|e| ChainError::Options {
        index,
        message: e.to_string(),
    })
}

/// Query decoding: `+` is a space, then percent-decoding.
fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

// ============================================================================
// TransformChain
// ============================================================================

/// Non-empty ordered list of steps, as declared (left to right).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformChain {
    steps: Vec<TransformStep>,
}

impl TransformChain {
    pub fn new(steps: Vec<TransformStep>) -> Result<Self, ChainError> {
        if steps.is_empty() {
            return Err(ChainError::Empty);
        }
        for (index, step) in steps.iter().enumerate() {
            if step.loader.trim().is_empty() {
                return Err(ChainError::EmptyStep(index));
            }
            if step.loader.contains(STEP_SEPARATOR) {
                return Err(ChainError::Separator {
                    index,
                    name: step.loader.clone(),
                });
            }
        }
        Ok(Self { steps })
    }

    /// Build from either config form.
    pub fn from_spec(spec: &LoaderSpec) -> Result<Self, ChainError> {
        match spec {
            LoaderSpec::Chain(wire) => wire.parse(),
            LoaderSpec::Steps(entries) => {
                let steps = entries
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| match entry {
                        StepEntry::Simple(raw) => TransformStep::parse(index, raw),
                        StepEntry::Full { loader, options } => {
                            TransformStep::from_table(index, loader, options)
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::new(steps)
            }
        }
    }

    /// Steps in declaration order.
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// Steps in the order the bundler runs them: last declared first.
    pub fn execution_order(&self) -> impl DoubleEndedIterator<Item = &TransformStep> {
        self.steps.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a constructed chain.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromStr for TransformChain {
    type Err = ChainError;

    fn from_str(wire: &str) -> Result<Self, Self::Err> {
        if wire.trim().is_empty() {
            return Err(ChainError::Empty);
        }
        let steps = wire
            .split(STEP_SEPARATOR)
            .enumerate()
            .map(|(index, raw)| TransformStep::parse(index, raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }
}

/// Renders the wire form.
impl fmt::Display for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", STEP_SEPARATOR)?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
