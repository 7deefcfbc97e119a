//! octranslate translates "classic" network telemetry sources (eg: SNMP
//! OIDs) into values addressed by a standardized, tree-structured path
//! namespace.
//!
//! Operators declare translations as a graph of named rules; the
//! [`TranslationEngine`] resolves a standardized path to a concrete
//! value for a named hardware target of a known vendor by picking, per
//! rule, the first alternative expression that can be evaluated under
//! the target's vendor.

#![warn(missing_docs)]

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod tree;
pub mod vendor;

pub use engine::{DEFAULT_MAX_DEPTH, EngineError, TranslationEngine};
pub use error::{Result, TranslateError};
pub use model::Value;
pub use parser::{ParseError, parse_expression};
pub use registry::FunctionRegistry;
pub use resolver::{LeafResolver, ResolveError, SampleResolver};
pub use tree::{PathError, PathTree, canonicalize};
pub use vendor::VendorFilter;
