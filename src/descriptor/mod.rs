//! The validated configuration descriptor handed to the bundler.
//!
//! A [`Descriptor`] is built once from a base directory and a [`RiggConfig`]
//! and never changes afterwards. Building it is pure path-string work plus
//! pattern compilation; nothing touches the file system.
//!
//! # Module Structure
//!
//! | Module    | Purpose                                          |
//! |-----------|--------------------------------------------------|
//! | `pattern` | `test` values, bare or `/literal/flags`          |
//! | `chain`   | Loader chains and their `a!b?k=v` wire form      |
//! | `rule`    | Compiled rules and first-match routing           |
//! | `wire`    | JSON document consumed by the bundler            |

mod chain;
mod pattern;
mod rule;
mod wire;

pub use chain::{ChainError, LoaderOptions, TransformChain, TransformStep};
pub use pattern::{MatchPattern, PatternError, PatternFlags};
pub use rule::{Route, Rule};

use crate::{
    config::{
        ConfigDiagnostic, ConfigError, ConfigWarning, FieldPath, ModuleSection, OutputSection,
        RiggConfig, RuleEntry,
    },
    debug, log,
    utils::path::{join_within, normalize_lexical, relative_within},
};
use std::path::{Path, PathBuf};

/// Field used for diagnostics about the base directory itself.
const BASE_DIR: FieldPath = FieldPath::new("root");

/// Resolved bundler configuration.
#[derive(Debug, Clone)]
pub struct Descriptor {
    base_dir: PathBuf,
    entry: String,
    output_filename: String,
    output_dir: PathBuf,
    rules: Vec<Rule>,
    warnings: Vec<ConfigWarning>,
}

impl Descriptor {
    /// Validate `config` and resolve its paths against `base_dir`.
    ///
    /// Fails on the first problem found:
    /// - `InvalidPath`: `base_dir` is relative, or `entry`/`output` is empty,
    ///   absolute, or climbs out of the base directory
    /// - `InvalidPattern`: a rule `test` is empty or does not compile
    /// - `InvalidLoader`: a rule's loader chain is malformed
    ///
    /// An empty rule list is allowed and logged as a warning.
    pub fn new(base_dir: &Path, config: &RiggConfig) -> Result<Self, ConfigError> {
        if !base_dir.is_absolute() {
            return Err(ConfigError::InvalidPath(
                ConfigDiagnostic::new(
                    BASE_DIR,
                    format!("base directory '{}' is not absolute", base_dir.display()),
                )
                .with_hint("pass an absolute directory with --root"),
            ));
        }
        let base_dir = normalize_lexical(base_dir);

        check_relative(RiggConfig::ENTRY, &config.entry)?;
        check_relative(OutputSection::FILENAME, &config.output.filename)?;

        let output_dir = join_within(&base_dir, &config.output.path).map_err(|escape| {
            ConfigError::InvalidPath(
                ConfigDiagnostic::new(
                    OutputSection::PATH,
                    format!(
                        "path '{}': {}",
                        config.output.path.display(),
                        escape.reason()
                    ),
                )
                .with_hint("output.path is resolved inside the base directory"),
            )
        })?;

        let rules = compile_rules(&config.module.rules)?;

        let mut warnings = Vec::new();
        if rules.is_empty() {
            let warning = ConfigWarning::EmptyRuleSet;
            log!("warning"; "{}", warning);
            warnings.push(warning);
        }

        Ok(Self {
            base_dir,
            entry: config.entry.clone(),
            output_filename: config.output.filename.clone(),
            output_dir,
            rules,
            warnings,
        })
    }

    /// Absolute directory every relative path was resolved from.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Entry point exactly as configured (relative to `base_dir`).
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Entry point as an absolute path.
    pub fn entry_path(&self) -> PathBuf {
        normalize_lexical(&self.base_dir.join(&self.entry))
    }

    pub fn output_filename(&self) -> &str {
        &self.output_filename
    }

    /// Absolute, normalized output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Absolute path of the emitted artifact.
    pub fn output_file(&self) -> PathBuf {
        normalize_lexical(&self.output_dir.join(&self.output_filename))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Non-fatal findings, in the order they were reported.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// Record findings made while reading the config file.
    pub(crate) fn with_warnings(
        mut self,
        warnings: impl IntoIterator<Item = ConfigWarning>,
    ) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// The rule governing `path`, tested in declaration order.
    pub fn route(&self, path: impl AsRef<Path>) -> Route<'_> {
        rule::first_match(&self.rules, &path.as_ref().to_string_lossy())
    }
}

/// Non-empty, relative, and never above the base directory.
fn check_relative(field: FieldPath, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidPath(ConfigDiagnostic::new(
            field,
            "must not be empty",
        )));
    }
    relative_within(Path::new(value)).map_err(|escape| {
        ConfigError::InvalidPath(ConfigDiagnostic::new(
            field,
            format!("path '{value}': {}", escape.reason()),
        ))
    })
}

fn compile_rules(entries: &[RuleEntry]) -> Result<Vec<Rule>, ConfigError> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| -> Result<Rule, ConfigError> {
            let field = ModuleSection::RULES.at(idx);

            let pattern = MatchPattern::parse(&entry.test, entry.case_insensitive).map_err(|e| {
                ConfigError::InvalidPattern(ConfigDiagnostic::new(
                    field,
                    format!("test '{}': {e}", entry.test),
                ))
            })?;

            let chain = TransformChain::from_spec(&entry.loader).map_err(|e| {
                ConfigError::InvalidLoader(
                    ConfigDiagnostic::new(field, e.to_string())
                        .with_hint("loaders are separated by `!`, e.g. \"style-loader!css-loader\""),
                )
            })?;

            debug!("config"; "rule[{}] {} → {}", idx, pattern, chain);
            Ok(Rule::new(pattern, chain))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_config() -> RiggConfig {
        RiggConfig::new(
            "./index.js",
            OutputSection::new("./output.js", "dist"),
            vec![
                RuleEntry::new(r"\.css$", "style-loader!css-loader"),
                RuleEntry::new(
                    r"\.(jpe?g|png|gif|svg)$",
                    "url-loader?name=app/images/[name].[ext]",
                ),
            ],
        )
    }

    #[test]
    fn test_project_scenario() {
        let descriptor = Descriptor::new(Path::new("/project"), &scenario_config()).unwrap();

        assert_eq!(descriptor.output_dir(), Path::new("/project/dist"));
        assert_eq!(descriptor.entry(), "./index.js");
        assert_eq!(descriptor.entry_path(), PathBuf::from("/project/index.js"));
        assert_eq!(descriptor.output_file(), PathBuf::from("/project/dist/output.js"));
        assert!(descriptor.warnings().is_empty());

        let rules = descriptor.rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].pattern().source(), r"\.css$");
        assert_eq!(rules[0].chain().to_string(), "style-loader!css-loader");
        assert_eq!(rules[1].pattern().source(), r"\.(jpe?g|png|gif|svg)$");
        assert_eq!(
            rules[1].chain().steps()[0].option("name"),
            Some(&serde_json::json!("app/images/[name].[ext]"))
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let config = RiggConfig::new(
            "./index.js",
            OutputSection::new("out.js", "./build/../dist/./js"),
            vec![],
        );
        let first = Descriptor::new(Path::new("/srv/app/"), &config).unwrap();
        let second = Descriptor::new(Path::new("/srv/app/"), &config).unwrap();
        assert_eq!(first.output_dir(), second.output_dir());
        assert_eq!(first.output_dir(), Path::new("/srv/app/dist/js"));
    }

    #[test]
    fn test_first_rule_wins_over_more_specific() {
        let config = RiggConfig::new(
            "./index.js",
            OutputSection::default(),
            vec![
                RuleEntry::new(r"\.css$", "style-loader!css-loader"),
                RuleEntry::new(r"\.min\.css$", "raw-loader"),
            ],
        );
        let descriptor = Descriptor::new(Path::new("/project"), &config).unwrap();

        let route = descriptor.route("vendor/reset.min.css");
        assert_eq!(route.index(), Some(0));
        assert_eq!(
            route.rule().map(|r| r.chain().to_string()).as_deref(),
            Some("style-loader!css-loader")
        );
    }

    #[test]
    fn test_route_pass_through_and_case() {
        let descriptor = Descriptor::new(Path::new("/project"), &scenario_config()).unwrap();
        assert!(descriptor.route("index.html").is_pass_through());
        // Second rule is case-sensitive as configured
        assert!(descriptor.route("photo.JPG").is_pass_through());
        assert_eq!(descriptor.route("photo.jpeg").index(), Some(1));

        let mut config = scenario_config();
        config.module.rules[1] = config.module.rules[1].clone().ignore_case();
        let descriptor = Descriptor::new(Path::new("/project"), &config).unwrap();
        assert_eq!(descriptor.route("photo.JPG").index(), Some(1));
    }

    #[test]
    fn test_empty_rules_accepted_with_warning() {
        let config = RiggConfig::new("./index.js", OutputSection::default(), vec![]);
        let descriptor = Descriptor::new(Path::new("/project"), &config).unwrap();

        assert!(descriptor.rules().is_empty());
        assert_eq!(descriptor.warnings(), [ConfigWarning::EmptyRuleSet]);
        for file in ["a.css", "b.png", "c"] {
            assert!(descriptor.route(file).is_pass_through());
        }
    }

    #[test]
    fn test_malformed_pattern_is_invalid_pattern() {
        let mut config = scenario_config();
        config.module.rules.push(RuleEntry::new("[a-z", "raw-loader"));

        let err = Descriptor::new(Path::new("/project"), &config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern(_)));
        let diag = err.diagnostic().unwrap();
        assert_eq!(diag.field, ModuleSection::RULES.at(2));
        assert!(diag.message.starts_with("test '[a-z'"));
    }

    #[test]
    fn test_empty_pattern_is_invalid_pattern() {
        let config = RiggConfig::new(
            "./index.js",
            OutputSection::default(),
            vec![RuleEntry::new("", "raw-loader")],
        );
        let err = Descriptor::new(Path::new("/project"), &config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern(_)));
    }

    #[test]
    fn test_relative_base_is_invalid_path() {
        let err = Descriptor::new(Path::new("project"), &scenario_config()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath(_)));
        assert_eq!(err.diagnostic().map(|d| d.field.path), Some(BASE_DIR));
    }

    #[test]
    fn test_output_path_escape_is_invalid_path() {
        for path in ["../dist", "a/../../dist", "/var/www"] {
            let config = RiggConfig::new(
                "./index.js",
                OutputSection::new("output.js", path),
                vec![],
            );
            let err = Descriptor::new(Path::new("/project"), &config).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidPath(_)), "{path}");
            assert_eq!(err.diagnostic().map(|d| d.field.path), Some(OutputSection::PATH));
        }
    }

    #[test]
    fn test_entry_and_filename_checks() {
        let mut config = scenario_config();
        config.entry = String::new();
        let err = Descriptor::new(Path::new("/project"), &config).unwrap_err();
        assert_eq!(err.diagnostic().map(|d| d.field.path), Some(RiggConfig::ENTRY));

        let mut config = scenario_config();
        config.entry = "../outside.js".into();
        assert!(matches!(
            Descriptor::new(Path::new("/project"), &config),
            Err(ConfigError::InvalidPath(_))
        ));

        let mut config = scenario_config();
        config.output.filename = "  ".into();
        let err = Descriptor::new(Path::new("/project"), &config).unwrap_err();
        assert_eq!(
            err.diagnostic().map(|d| d.field.path),
            Some(OutputSection::FILENAME)
        );
    }

    #[test]
    fn test_malformed_loader_is_invalid_loader() {
        let config = RiggConfig::new(
            "./index.js",
            OutputSection::default(),
            vec![RuleEntry::new(r"\.css$", "style-loader!!css-loader")],
        );
        let err = Descriptor::new(Path::new("/project"), &config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLoader(_)));
    }

    #[test]
    fn test_descriptor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Descriptor>();
    }
}
