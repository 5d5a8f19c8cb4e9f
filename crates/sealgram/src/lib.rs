//! # Sealgram
//!
//! Compressed, fingerprinted, signed message packages: a tamper-detection
//! pipeline over an in-memory "transmission".
//!
//! ## Overview
//!
//! A message travels through a fixed sequence of steps:
//!
//! 1. **Set message**: the raw text to protect
//! 2. **Fingerprint**: a 32-bit FNV-1 digest of the text
//! 3. **Compress**: prefix-code encoding against a tree built from the
//!    text's own symbol frequencies
//! 4. **Sign**: the fingerprint's hex text, signed by the RSA oracle
//! 5. **Transmit**: bundle {compressed bits, tree, signature, public key}
//! 6. **Verify**: decompress, recompute the fingerprint, check the
//!    signature; any payload corruption that changes the recovered text
//!    flips the verdict to "altered"
//!
//! Steps must run in order; a [`SessionError::PrerequisiteMissing`] names
//! the step that has to happen first. The private key never leaves the
//! oracle.
//!
//! ## Security posture
//!
//! This is a teaching pipeline. The default 512-bit keys are trivially
//! breakable and the FNV-1 fingerprint is not collision resistant; both
//! are deliberate simplifications, not oversights to patch quietly.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sealgram::{Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default());
//! session.set_message("HELLO").unwrap();
//! session.fingerprint().unwrap();
//! session.compress().unwrap();
//! session.sign().unwrap();
//! session.transmit().unwrap();
//!
//! let report = session.verify_received().unwrap();
//! assert!(report.authentic);
//! ```
//!
//! ## Re-exports
//!
//! The pure primitives live in `sealgram_core`, re-exported here as
//! [`core`].

pub mod error;
pub mod oracle;
pub mod package;
pub mod session;

// Re-export the primitives crate
pub use sealgram_core as core;

// Re-export main types for convenience
pub use error::{OracleError, SessionError, Step};
pub use oracle::{KeyInfo, PublicKeyMaterial, RsaOracle, SignatureBytes, SigningOracle};
pub use package::SignedPackage;
pub use session::{
    verify_package, Session, SessionConfig, SignReport, VerifyReport, DEFAULT_KEY_BITS,
};

// Re-export commonly used core types
pub use sealgram_core::{Bits, CodeBook, CodeTree, CompressedArtifact, Fingerprint};
