//! `rigg check`: validate and summarize.

use anyhow::Result;

use crate::{descriptor::Descriptor, log};

pub fn run(descriptor: &Descriptor) -> Result<()> {
    log!("check"; "entry   {}", descriptor.entry_path().display());
    log!("check"; "output  {}", descriptor.output_file().display());

    for (idx, rule) in descriptor.rules().iter().enumerate() {
        log!("check"; "rule[{}] {} → {}", idx, rule.pattern(), rule.chain());
    }

    let warnings = descriptor.warnings().len();
    log!("check"; "{}", summary(descriptor.rules().len(), warnings));
    Ok(())
}

fn summary(rules: usize, warnings: usize) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{n} {word}")
        } else {
            format!("{n} {word}s")
        }
    };
    format!(
        "configuration is valid ({}, {})",
        plural(rules, "rule"),
        plural(warnings, "warning")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_plurals() {
        assert_eq!(summary(1, 0), "configuration is valid (1 rule, 0 warnings)");
        assert_eq!(summary(2, 1), "configuration is valid (2 rules, 1 warning)");
    }
}
