//! package.json handling

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// File name of the project manifest inside every template
pub const MANIFEST_FILE: &str = "package.json";

/// A parsed package.json whose fields keep their original order
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    fields: Map<String, Value>,
}

impl PackageManifest {
    /// Parse manifest bytes, requiring a JSON object
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .with_context(|| format!("Failed to parse {}", MANIFEST_FILE))?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => anyhow::bail!("{} must contain a JSON object", MANIFEST_FILE),
        }
    }

    /// Read and parse `<dir>/package.json`
    pub fn read_from(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let bytes =
            std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&bytes).with_context(|| format!("Invalid manifest at {}", path.display()))
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Overwrite the `name` field, leaving every other field untouched
    pub fn set_name(&mut self, name: &str) {
        self.fields
            .insert("name".to_string(), Value::String(name.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Serialize with 2-space indentation
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.fields)
            .with_context(|| format!("Failed to serialize {}", MANIFEST_FILE))
    }

    /// Write to `<dir>/package.json`, replacing any existing file
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let path = dir.join(MANIFEST_FILE);
        std::fs::write(&path, self.to_pretty_string()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
