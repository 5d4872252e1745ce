//! `rigg emit`: write the bundler's JSON document.

use anyhow::{Context, Result};
use std::fs;

use super::EmitArgs;
use crate::{debug, descriptor::Descriptor};

pub fn run(descriptor: &Descriptor, args: &EmitArgs) -> Result<()> {
    let mut json = descriptor
        .to_wire_json(args.pretty)
        .context("Failed to serialize configuration")?;
    json.push('\n');

    match &args.output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            debug!("emit"; "wrote {}", path.display());
        }
        None => print!("{json}"),
    }
    Ok(())
}
