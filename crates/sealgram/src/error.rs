//! Error types for the sealgram pipeline.

use sealgram_core::CodecError;
use std::fmt;
use thiserror::Error;

/// Errors reported by a signing oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Signing was attempted without the required key half present.
    #[error("no key material available")]
    NoKeyMaterial,

    /// Key generation failed; the underlying message is preserved.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// Signing failed; the underlying message is preserved.
    #[error("signing failed: {0}")]
    Signing(String),
}

/// A pipeline step, used to name missing prerequisites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A message must be set.
    Message,
    /// The fingerprint must be computed.
    Fingerprint,
    /// The message must be compressed.
    Compress,
    /// The fingerprint must be signed.
    Sign,
    /// The package must be transmitted.
    Transmit,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Message => "message",
            Step::Fingerprint => "fingerprint",
            Step::Compress => "compress",
            Step::Sign => "sign",
            Step::Transmit => "transmit",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during session operations.
///
/// Every variant is recoverable: a failed operation leaves the session
/// state untouched, so the caller may satisfy the prerequisite and retry.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The message text was empty.
    #[error("message must not be empty")]
    EmptyMessage,

    /// An operation ran before its required predecessor.
    #[error("prerequisite missing: run the {0} step first")]
    PrerequisiteMissing(Step),

    /// Codec error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Oracle error.
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
