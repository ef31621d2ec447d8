//! Error types for the cascade and its digest engines

use thiserror::Error;

use crate::engine::Primitive;

/// Failure reported by a single digest engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("engine used after finalize without reset")]
    NotReset,

    #[error("output slot is {actual} bytes, engine produces {expected}")]
    OutputSize { expected: usize, actual: usize },

    #[error("engine fault: {0}")]
    Fault(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("input must be exactly {expected} bytes, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    #[error("input must be at least {required} bytes, got {actual}")]
    InputTooShort { required: usize, actual: usize },

    #[error("output buffer must hold at least {required} bytes, got {actual}")]
    OutputTooSmall { required: usize, actual: usize },

    #[error("no engine registered for {0}")]
    MissingPrimitive(Primitive),

    #[error("{primitive} engine produces {actual} bytes, expected {expected}")]
    OutputWidth {
        primitive: Primitive,
        expected: usize,
        actual: usize,
    },

    #[error("context template already installed")]
    TemplateInstalled,

    #[error("{primitive} failed: {source}")]
    Engine {
        primitive: Primitive,
        #[source]
        source: EngineError,
    },

    #[error("zk-SNARK proof verification failed")]
    ProofRejected,

    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
}

pub type Result<T> = core::result::Result<T, Error>;
