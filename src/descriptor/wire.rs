//! Bundler wire format.
//!
//! ```json
//! {
//!   "entry": "./index.js",
//!   "output": { "filename": "./output.js", "path": "/project/dist" },
//!   "module": { "rules": [{ "test": "/\\.css$/", "loader": "style-loader!css-loader" }] }
//! }
//! ```

use serde::{Serialize, Serializer};
use std::path::Path;

use super::Descriptor;

#[derive(Serialize)]
struct WireDocument<'a> {
    entry: &'a str,
    output: WireOutput<'a>,
    module: WireModule,
}

#[derive(Serialize)]
struct WireOutput<'a> {
    filename: &'a str,
    path: &'a Path,
}

#[derive(Serialize)]
struct WireModule {
    rules: Vec<WireRule>,
}

#[derive(Serialize)]
struct WireRule {
    test: String,
    loader: String,
}

impl Descriptor {
    fn wire(&self) -> WireDocument<'_> {
        WireDocument {
            entry: self.entry(),
            output: WireOutput {
                filename: self.output_filename(),
                path: self.output_dir(),
            },
            module: WireModule {
                rules: self
                    .rules()
                    .iter()
                    .map(|rule| WireRule {
                        test: rule.pattern().to_string(),
                        loader: rule.chain().to_string(),
                    })
                    .collect(),
            },
        }
    }

    pub fn to_wire_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn to_wire_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for Descriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.wire().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{OutputSection, RiggConfig, RuleEntry};
    use crate::descriptor::Descriptor;
    use serde_json::json;
    use std::path::Path;

    #[test]
    fn test_wire_document_shape() {
        let config = RiggConfig::new(
            "./index.js",
            OutputSection::new("./output.js", "dist"),
            vec![
                RuleEntry::new(r"\.css$", "style-loader!css-loader"),
                RuleEntry::new(
                    r"\.(jpe?g|png|gif|svg)$",
                    "url-loader?name=app/images/[name].[ext]",
                )
                .ignore_case(),
            ],
        );
        let descriptor = Descriptor::new(Path::new("/project"), &config).unwrap();

        assert_eq!(
            descriptor.to_wire_value().unwrap(),
            json!({
                "entry": "./index.js",
                "output": { "filename": "./output.js", "path": "/project/dist" },
                "module": {
                    "rules": [
                        { "test": r"/\.css$/", "loader": "style-loader!css-loader" },
                        {
                            "test": r"/\.(jpe?g|png|gif|svg)$/i",
                            "loader": "url-loader?name=app/images/[name].[ext]"
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_wire_json_key_order() {
        let config = RiggConfig::new("./main.js", OutputSection::default(), vec![]);
        let descriptor = Descriptor::new(Path::new("/app"), &config).unwrap();

        let json = descriptor.to_wire_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"entry":"./main.js","output":{"filename":"output.js","path":"/app/dist"},"module":{"rules":[]}}"#
        );
        assert!(descriptor.to_wire_json(true).unwrap().contains('\n'));
    }
}
