//! Error types for the control engine

use thiserror::Error;

/// Errors that can occur while driving the transceiver
#[derive(Debug, Error)]
pub enum EngineError {
    /// Transport reached end of stream
    #[error("transport closed")]
    TransportClosed,

    /// A required reply did not arrive in time
    #[error("no reply within {ms}ms")]
    Timeout {
        /// Reply deadline that expired (milliseconds)
        ms: u64,
    },

    /// A reply arrived but could not be used
    #[error("malformed reply: expected {expected}, got {got:?}")]
    MalformedReply {
        /// Mnemonic the reply was expected to start with
        expected: String,
        /// Payload actually received
        got: String,
    },

    /// Memory search visited every channel without a hit
    #[error("no additional programmed memory channels")]
    SearchExhausted,

    /// Memory channel outside the valid range
    #[error("invalid memory channel: {requested}")]
    InvalidChannel {
        /// Channel number that was requested
        requested: u32,
    },

    /// Frequency digit index outside the editable range
    #[error("invalid frequency digit index: {requested}")]
    InvalidDigit {
        /// Digit index that was requested
        requested: usize,
    },

    /// Command construction error
    #[error("command error: {0}")]
    Command(#[from] cat_wire::ParseError),

    /// Serial port error
    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Whether the transport is unusable after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::TransportClosed | EngineError::Io(_))
    }
}
