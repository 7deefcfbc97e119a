//! Unified error type for the crate's public surface

use thiserror::Error;

/// Result type alias using [`TranslateError`]
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Any error the translation pipeline can produce
#[derive(Error, Debug)]
pub enum TranslateError {
    /// Configuration could not be loaded or deserialized
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Engine construction or evaluation failed
    #[error(transparent)]
    Engine(#[from] crate::engine::EngineError),

    /// An expression could not be parsed
    #[error(transparent)]
    Parse(#[from] crate::parser::ParseError),

    /// An expression could not be evaluated
    #[error(transparent)]
    Evaluation(#[from] crate::evaluator::EvaluationError),

    /// A path could not be canonicalized or looked up
    #[error(transparent)]
    Path(#[from] crate::tree::PathError),
}
