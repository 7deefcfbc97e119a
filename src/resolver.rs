//! Leaf resolver interface
//!
//! The one seam where the engine touches the outside world. A real
//! deployment plugs in a network client (SNMP get, CLI scrape); the
//! default stand-in answers from the samples declared on the leaf.

use crate::config::LeafPath;
use crate::model::Value;
use thiserror::Error;
use tracing::info;

/// Error returned by a leaf resolver
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct ResolveError(pub String);

/// Retrieves the raw value for a leaf descriptor from a target.
///
/// Implementations may block (network I/O); the engine treats the call
/// as idempotent and side-effect-free.
pub trait LeafResolver: Send + Sync {
    /// Resolve the given leaf for the given target.
    fn resolve(&self, leaf: &LeafPath, target: &str) -> Result<Value, ResolveError>;
}

/// Default resolver: returns the leaf's first sample, or a constant
/// placeholder when none is declared. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct SampleResolver;

impl LeafResolver for SampleResolver {
    fn resolve(&self, leaf: &LeafPath, target: &str) -> Result<Value, ResolveError> {
        info!(leaf = %leaf.bind, %target, "requesting leaf from target");
        match leaf.samples.first() {
            Some(sample) => Ok(Value::String(sample.clone())),
            None => Ok(Value::String("dummy".to_string())),
        }
    }
}
