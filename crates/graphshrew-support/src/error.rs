//! Error types shared by the codec, the host imports and the coercion layer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The guest called `env.abort`.
    #[error("aborted \"{message}\" at {file}, line {line}, column {column}")]
    Abort {
        message: String,
        file: String,
        line: String,
        column: String,
    },

    #[error("critical guest log: {0}")]
    CriticalLog(String),

    #[error("unknown log level {level} (with message '{message}')")]
    UnknownLogLevel { level: i32, message: String },

    #[error("unexpected null {0} pointer")]
    NullPointer(&'static str),

    #[error("invalid {kind} value {discriminant}")]
    InvalidValue {
        kind: &'static str,
        discriminant: u32,
    },

    #[error("invalid boolean value {0}")]
    InvalidBool(i64),

    #[error("{0} values not supported")]
    Unsupported(&'static str),

    #[error("allocation size {0} is invalid")]
    InvalidAllocation(usize),

    #[error("memory access error: {0}")]
    Memory(String),

    #[error("ABI encoder not initialized")]
    AbiNotInitialized,

    #[error("entity missing '{0}' entry")]
    MissingEntry(String),

    #[error("entity has unexpected '{0}' entry")]
    UnexpectedEntry(String),

    #[error("entity has duplicate '{0}' entry")]
    DuplicateEntry(String),

    #[error("record missing '{0}' field")]
    MissingField(String),

    #[error("record has unexpected '{0}' field")]
    UnexpectedField(String),

    #[error("expected {expected} value but got {actual}")]
    KindMismatch { expected: String, actual: String },

    #[error("invalid definition kind {0}")]
    InvalidDefinition(String),

    #[error("tuple ethereum value arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("invalid hex string '{0}'")]
    InvalidHex(String),

    #[error("invalid {len}-byte hex string '{value}'")]
    InvalidFixedHex { len: usize, value: String },

    #[error("unknown {kind} definition '{name}'")]
    UnknownDefinition { kind: &'static str, name: String },

    #[error("unexpected ethereum call {contract}.{function}")]
    UnexpectedCall { contract: String, function: String },

    #[error("{0} not implemented")]
    NotImplemented(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid exponent {0}")]
    InvalidExponent(i32),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
