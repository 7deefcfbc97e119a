//! Declarative configuration documents
//!
//! Three JSON documents are consumed at startup: the path mappings
//! forest, the flat rule list, and the vendor identifier table. The
//! engine consumes the deserialized forms directly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors, surfaced at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("could not open {kind} file `{path}`: {source}")]
    Io {
        /// Which document was being loaded
        kind: &'static str,
        /// The offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file was not a valid document of the expected shape
    #[error("could not deserialize {kind} from `{path}`: {source}")]
    Deserialize {
        /// Which document was being loaded
        kind: &'static str,
        /// The offending path
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },
}

/// The path mappings document: a forest of node declarations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mappings {
    /// Top-level node declarations, anchored at the root
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
}

/// One declared node in the standardized-path forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Relative or absolute subpath, one or more segments
    pub subpath: String,

    /// Rule bound to the deepest segment of `subpath`, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    /// Child declarations, attached under the deepest segment
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeConfig>,
}

/// The rules document: a flat list of rule definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rules {
    /// All rule definitions
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// A named translation rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Globally unique rule name
    pub bind: String,

    /// Alternative expressions, in preference order; the first that can
    /// be evaluated for the current target wins
    #[serde(default)]
    pub expressions: Vec<String>,

    /// Leaf descriptors referenced by the expressions
    #[serde(default)]
    pub leaves: Vec<LeafPath>,
}

/// A leaf descriptor: the vendor-specific addressing of a raw value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeafPath {
    /// Local identifier, unique within the enclosing rule
    #[serde(default)]
    pub bind: String,

    /// Vendor-path strings (SNMP OIDs), ordered by preference
    #[serde(default)]
    pub oids: Vec<String>,

    /// Declared data type of the raw value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    /// Sample outputs used as placeholders when no live resolver is wired
    #[serde(default)]
    pub samples: Vec<String>,
}

/// The vendor identifier document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorOids {
    /// Shared prefix of vendor-enterprise addressing
    pub vendor_root: String,

    /// Vendor name to enterprise sub-identifier
    #[serde(default)]
    pub vendors: HashMap<String, String>,
}

/// Load the path mappings document from a JSON file.
pub fn load_mappings(path: impl AsRef<Path>) -> Result<Mappings, ConfigError> {
    load("mappings", path.as_ref())
}

/// Load the rules document from a JSON file.
pub fn load_rules(path: impl AsRef<Path>) -> Result<Rules, ConfigError> {
    load("rules", path.as_ref())
}

/// Load the vendor identifier document from a JSON file.
pub fn load_vendor_oids(path: impl AsRef<Path>) -> Result<VendorOids, ConfigError> {
    load("vendor OIDs", path.as_ref())
}

fn load<T: serde::de::DeserializeOwned>(kind: &'static str, path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Deserialize {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_rule_document() {
        let doc = serde_json::json!({
            "rules": [{
                "bind": "system_up_time",
                "expressions": ["to_int(ticks) / 100"],
                "leaves": [{
                    "bind": "ticks",
                    "oids": ["1.3.6.1.2.1.1.3.0"],
                    "data_type": "timeticks",
                    "samples": ["2000000000"]
                }]
            }]
        });
        let rules: Rules = serde_json::from_value(doc).unwrap();
        assert_eq!(rules.rules.len(), 1);
        let rule = &rules.rules[0];
        assert_eq!(rule.bind, "system_up_time");
        assert_eq!(rule.leaves[0].samples, vec!["2000000000"]);
    }

    #[test]
    fn optional_fields_default() {
        let node: NodeConfig = serde_json::from_value(serde_json::json!({
            "subpath": "/system"
        }))
        .unwrap();
        assert_eq!(node.subpath, "/system");
        assert!(node.bind.is_none());
        assert!(node.children.is_empty());

        let leaf: LeafPath = serde_json::from_value(serde_json::json!({
            "oids": ["1.2.3"]
        }))
        .unwrap();
        assert!(leaf.bind.is_empty());
        assert!(leaf.samples.is_empty());
    }
}
