//! Error types for the sealgram core.

use thiserror::Error;

/// Errors that can occur during codec operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Compression was asked to encode an empty input.
    #[error("cannot compress empty input")]
    EmptyInput,

    /// A symbol of the input has no entry in the codebook.
    ///
    /// Codes are derived from the same input that is being encoded, so this
    /// is unreachable through the public API; it exists so malformed
    /// hand-built codebooks fail loudly instead of panicking.
    #[error("symbol {0:?} has no code in the codebook")]
    MissingCode(char),

    /// A textual bit sequence contained a character other than '0' or '1'.
    #[error("invalid bit character {0:?} (expected '0' or '1')")]
    InvalidBit(char),
}
