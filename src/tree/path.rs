//! Path canonicalization
//!
//! Standardized paths are slash-separated. A leading `/` is shorthand
//! for the root segment; a lone `/` denotes root itself. Two spellings
//! address the same node iff they canonicalize to the same string:
//!
//! ```text
//! /first/second      ->  root/first/second
//! root/first/second  ->  root/first/second
//! first/second       ->  first/second      (relative, no root added)
//! first/second/      ->  first/second
//! ```

use thiserror::Error;

/// The name of the root node
pub const ROOT: &str = "root";

/// The path segment separator
pub(crate) const SEPARATOR: char = '/';

/// Path canonicalization and lookup errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// The empty string is not a path
    #[error("empty path")]
    Empty,

    /// Adjacent separators are illegal
    #[error("invalid path `{path}`")]
    AdjacentSeparators {
        /// The offending path
        path: String,
    },

    /// No node exists at the canonical path
    #[error("no such node in tree: `{path}`")]
    UnknownNode {
        /// The canonical path
        path: String,
    },

    /// The node exists but carries no rule binding
    #[error("no rule bound to node `{path}`")]
    Unbound {
        /// The canonical path
        path: String,
    },
}

/// Canonicalize a path string.
///
/// Idempotent: `canonicalize(canonicalize(p)) == canonicalize(p)`.
pub fn canonicalize(path: &str) -> Result<String, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if path == "/" {
        return Ok(ROOT.to_string());
    }
    if path.contains("//") {
        return Err(PathError::AdjacentSeparators {
            path: path.to_string(),
        });
    }
    let path = path.strip_suffix(SEPARATOR).unwrap_or(path);
    match path.strip_prefix(SEPARATOR) {
        Some(rest) => Ok(format!("{ROOT}{SEPARATOR}{rest}")),
        None => Ok(path.to_string()),
    }
}
