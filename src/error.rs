// error.rs - 错误类型

use thiserror::Error;

/// Recoverable failures of [`SequenceDb`](crate::SequenceDb) operations.
/// Each variant carries the offending input so the caller can echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceDbError {
    /// `insert` was given something that is not a DNA sequence.
    #[error("Invalid sequence: [{0}]")]
    InvalidSequence(String),

    /// `find` or `overlap` was given something that is not a DNA sequence.
    #[error("Invalid sample: [{0}]")]
    InvalidSample(String),

    /// No record carries this identifier.
    #[error("Invalid sequence id: [{0}]")]
    InvalidSequenceId(String),
}

pub type Result<T> = std::result::Result<T, SequenceDbError>;
