//! Error types for CAT command construction

use thiserror::Error;

/// Errors from building commands out of user-supplied text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Mode name not in the FT-991A mode table
    #[error("unknown operating mode: {0:?}")]
    UnknownMode(String),

    /// Menu codes are exactly three ASCII digits
    #[error("invalid menu code: {0:?}")]
    InvalidMenuCode(String),

    /// Raw passthrough of an empty command
    #[error("empty command")]
    EmptyCommand,
}
