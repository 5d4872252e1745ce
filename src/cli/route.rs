//! `rigg route`: show which rule governs each path.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::{
    descriptor::{Descriptor, Route, TransformStep},
    log,
};

pub fn run(descriptor: &Descriptor, paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        log!("route"; "{}", describe(descriptor, path));
    }
    Ok(())
}

/// One line per path: the matched rule and the order its loaders run in.
fn describe(descriptor: &Descriptor, path: &Path) -> String {
    match descriptor.route(path) {
        Route::Rule { index, rule } => {
            let order: Vec<_> = rule
                .chain()
                .execution_order()
                .map(TransformStep::loader)
                .collect();
            format!(
                "{} → rule[{}] {} (runs {})",
                path.display(),
                index,
                rule.pattern(),
                order.join(" → ")
            )
        }
        Route::PassThrough => format!("{} → pass-through", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputSection, RiggConfig, RuleEntry};

    fn descriptor() -> Descriptor {
        let config = RiggConfig::new(
            "./index.js",
            OutputSection::default(),
            vec![
                RuleEntry::new(r"\.css$", "style-loader!css-loader"),
                RuleEntry::new(r"\.svg$", "url-loader?limit=1024"),
            ],
        );
        Descriptor::new(Path::new("/project"), &config).unwrap()
    }

    #[test]
    fn test_describe_matched() {
        let line = describe(&descriptor(), Path::new("src/app.css"));
        assert_eq!(
            line,
            r"src/app.css → rule[0] /\.css$/ (runs css-loader → style-loader)"
        );
    }

    #[test]
    fn test_describe_pass_through() {
        let line = describe(&descriptor(), Path::new("README.md"));
        assert_eq!(line, "README.md → pass-through");
    }
}
