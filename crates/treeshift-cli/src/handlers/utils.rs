//! Shared utilities for command handlers

use crate::config::is_yaml_path;
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use treeshift_core::{MappingTable, Shifter};

/// Path that stands for standard input
pub const STDIN_PATH: &str = "-";

/// Load a JSON or YAML document from a file, or from stdin for `-`
pub fn load_document(path: &Path) -> Result<Value> {
    if path == Path::new(STDIN_PATH) {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        debug!(bytes = content.len(), "Read document from stdin");
        return parse_document(&content, path);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read document");
    parse_document(&content, path)
}

/// Parse document text, choosing the format by file extension
///
/// Extensionless input (stdin included) is tried as JSON first, then YAML.
pub fn parse_document(content: &str, path: &Path) -> Result<Value> {
    if is_yaml_path(path) {
        return serde_yaml::from_str(content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        });
    }

    let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(_) if !is_json => serde_yaml::from_str(content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON or YAML".to_string(),
        }),
        Err(_) => Err(Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        }),
    }
}

/// Load a mapping table file
pub fn load_mapping(path: &Path) -> Result<MappingTable> {
    let value = load_document(path)?;
    if !value.is_object() {
        return Err(Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "mapping object".to_string(),
        });
    }

    let table = MappingTable::from_json(&value)?;
    debug!(
        path = %path.display(),
        sources = table.len(),
        pairs = table.pair_count(),
        "Loaded mapping table"
    );
    Ok(table)
}

/// Load and compile a mapping table file
pub fn load_shifter(path: &Path) -> Result<Shifter> {
    Ok(Shifter::new(load_mapping(path)?)?)
}

/// Serialize `value` for a file, choosing the format by extension
pub fn serialize_for_path(value: &Value, path: &Path) -> Result<String> {
    if is_yaml_path(path) {
        Ok(serde_yaml::to_string(value)?)
    } else {
        let mut content = serde_json::to_string_pretty(value)?;
        content.push('\n');
        Ok(content)
    }
}
