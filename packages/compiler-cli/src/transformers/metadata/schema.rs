// Metadata Schema
//
// Wire format of `.metadata.json` files. Symbol descriptions are opaque JSON values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema version every record handed to consumers is upgraded to.
pub const METADATA_VERSION: u32 = 3;

/// Extension of the metadata file emitted next to a declaration file.
pub const METADATA_EXTENSION: &str = ".metadata.json";

/// Per-module metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    #[serde(rename = "__symbolic", default = "module_tag")]
    pub symbolic: String,
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(default)]
    pub metadata: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<ModuleExportMetadata>>,
    #[serde(rename = "importAs", default, skip_serializing_if = "Option::is_none")]
    pub import_as: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origins: Option<IndexMap<String, String>>,
}

impl ModuleMetadata {
    /// An empty record of the given version.
    pub fn empty(version: u32) -> Self {
        Self {
            symbolic: module_tag(),
            version,
            metadata: IndexMap::new(),
            exports: None,
            import_as: None,
            origins: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && !matches!(&self.exports, Some(exports) if !exports.is_empty())
    }
}

/// A re-export directive: `export * from 'x'` or `export { a, b as c } from 'x'`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleExportMetadata {
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Vec<ExportedName>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportedName {
    Name(String),
    Alias {
        name: String,
        #[serde(rename = "as")]
        alias: String,
    },
}

/// Whether a symbol description is an upstream error placeholder.
pub fn is_metadata_error(value: &Value) -> bool {
    value.get("__symbolic").and_then(Value::as_str) == Some("error")
}

fn module_tag() -> String {
    "module".to_string()
}

fn legacy_version() -> u32 {
    1
}
