//! Function registry and dispatch

use crate::model::Value;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Result type for function operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Function evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// The named function is not registered
    #[error("function `{name}` is not defined")]
    Unknown {
        /// Function name
        name: String,
    },

    /// Wrong number of arguments
    #[error("function `{name}` expects {expected} arguments, but got {actual}")]
    InvalidArity {
        /// Function name
        name: String,
        /// Declared arity
        expected: usize,
        /// Arguments provided
        actual: usize,
    },

    /// An argument had the wrong type or an unparseable value
    #[error("function `{name}`: {message}")]
    InvalidArgument {
        /// Function name
        name: String,
        /// What went wrong
        message: String,
    },
}

/// Handler signature shared by every registered function.
///
/// The argument count has already been validated against the declared
/// arity when a handler runs.
pub type FunctionHandler = Box<dyn Fn(&[Value]) -> FunctionResult<Value> + Send + Sync>;

struct Function {
    arity: usize,
    handler: FunctionHandler,
}

/// An immutable mapping from function name to a pure function with a
/// declared arity.
pub struct FunctionRegistry {
    functions: FxHashMap<String, Function>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            functions: FxHashMap::default(),
        }
    }

    /// Create a registry with the standard function library registered
    pub fn standard() -> Self {
        let mut registry = Self::new();
        super::builtins::register(&mut registry);
        registry
    }

    /// Register a function under the given name with a fixed arity
    pub fn register<F>(&mut self, name: impl Into<String>, arity: usize, handler: F)
    where
        F: Fn(&[Value]) -> FunctionResult<Value> + Send + Sync + 'static,
    {
        self.functions.insert(
            name.into(),
            Function {
                arity,
                handler: Box::new(handler),
            },
        );
    }

    /// True if a function with the given name has been registered
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Call a function by name, validating arity first
    pub fn call(&self, name: &str, args: &[Value]) -> FunctionResult<Value> {
        let function = self.functions.get(name).ok_or_else(|| FunctionError::Unknown {
            name: name.to_string(),
        })?;
        if args.len() != function.arity {
            return Err(FunctionError::InvalidArity {
                name: name.to_string(),
                expected: function.arity,
                actual: args.len(),
            });
        }
        (function.handler)(args)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
