//! `rigg init`: write a starter configuration.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

use crate::log;

/// Default config filename
const CONFIG_FILE: &str = "rigg.toml";

/// Starter config: one stylesheet rule and one image rule.
const TEMPLATE: &str = r#"# rigg configuration file
#
# Paths are relative to the directory containing this file
# (override with `rigg --root <dir>`).

# Where the bundler starts traversing dependencies
entry = "./index.js"

[output]
filename = "./output.js"   # emitted bundle name
path = "dist"              # output directory, resolved to an absolute path

# Rules are tested in order; the first match governs a file.
# Loaders in a chain run right-to-left.

[[module.rules]]
test = '\.css$'
loader = "style-loader!css-loader"

[[module.rules]]
test = '/\.(jpe?g|png|gif|svg)$/i'
loader = "url-loader?name=app/images/[name].[ext]"
"#;

/// Generate rigg.toml content with comments
pub fn generate_config_template() -> &'static str {
    TEMPLATE
}

/// Write the template into `dir`, or print it when `dry_run` is set.
pub fn new_config(dir: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", generate_config_template());
        return Ok(());
    }

    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        bail!(
            "'{}' already exists.\n\
             Remove it first or edit it directly.",
            path.display()
        );
    }

    fs::write(&path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    log!("init"; "created {}", path.display());
    Ok(())
}
