//! The pipeline session: one message's journey from text to verified
//! package.
//!
//! A [`Session`] owns the state of one sender/receiver exchange and walks
//! it through the only legal order: set message, fingerprint, compress,
//! sign, transmit, verify. Invoking a step before its prerequisite fails
//! with [`SessionError::PrerequisiteMissing`] and leaves every field
//! untouched. Setting a new message clears all derived state, since the
//! old fingerprint, artifact, signature, and package describe a message
//! that no longer exists.

use tracing::{debug, info};

use sealgram_core::{codec, CompressedArtifact, Fingerprint};

use crate::error::{OracleError, Result, SessionError, Step};
use crate::oracle::{KeyInfo, RsaOracle, SignatureBytes, SigningOracle};
use crate::package::SignedPackage;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RSA modulus size used when the oracle lazily generates keys.
    ///
    /// The default of 512 bits keeps demo runs fast and is far too small
    /// for real use.
    pub key_bits: usize,
}

/// Default key size in bits. Demo-grade only.
pub const DEFAULT_KEY_BITS: usize = 512;

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
        }
    }
}

/// The result of the sign step.
#[derive(Debug, Clone)]
pub struct SignReport {
    /// The signature over the fingerprint's hex text.
    pub signature: SignatureBytes,
    /// Displayable facts about the signing key pair.
    pub key_info: KeyInfo,
}

/// The result of receiving and verifying a package.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    /// Whether the signature checked out against the recomputed
    /// fingerprint. A `false` here is the tamper alarm, not a fault.
    pub authentic: bool,
    /// The decompressed message text.
    pub message: String,
    /// The fingerprint recomputed over the decompressed text.
    pub fingerprint: Fingerprint,
}

/// One message exchange, sender side and simulated receiver side.
pub struct Session<O = RsaOracle> {
    config: SessionConfig,
    oracle: O,
    message: Option<String>,
    fingerprint: Option<Fingerprint>,
    artifact: Option<CompressedArtifact>,
    signature: Option<SignatureBytes>,
    package: Option<SignedPackage>,
}

impl Session<RsaOracle> {
    /// Create a session backed by the RSA oracle.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_oracle(RsaOracle::new(), config)
    }
}

impl<O: SigningOracle> Session<O> {
    /// Create a session with a caller-provided oracle.
    pub fn with_oracle(oracle: O, config: SessionConfig) -> Self {
        Self {
            config,
            oracle,
            message: None,
            fingerprint: None,
            artifact: None,
            signature: None,
            package: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pipeline steps, in order
    // ─────────────────────────────────────────────────────────────────────

    /// Set the message to send. Clears all derived state.
    ///
    /// # Errors
    /// [`SessionError::EmptyMessage`] for empty text; the previous message
    /// (if any) stays current.
    pub fn set_message(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        self.message = Some(text.to_string());
        self.fingerprint = None;
        self.artifact = None;
        self.signature = None;
        self.package = None;

        debug!(chars = text.chars().count(), "message set");
        Ok(())
    }

    /// Compute the fingerprint of the current message.
    pub fn fingerprint(&mut self) -> Result<Fingerprint> {
        let message = self
            .message
            .as_deref()
            .ok_or(SessionError::PrerequisiteMissing(Step::Message))?;

        let fingerprint = Fingerprint::of(message);
        self.fingerprint = Some(fingerprint);

        debug!(fingerprint = %fingerprint, "fingerprint computed");
        Ok(fingerprint)
    }

    /// Compress the current message.
    pub fn compress(&mut self) -> Result<&CompressedArtifact> {
        let message = self
            .message
            .as_deref()
            .ok_or(SessionError::PrerequisiteMissing(Step::Message))?;

        let artifact = codec::compress(message)?;
        info!(
            original_bits = artifact.original_bits,
            compressed_bits = artifact.compressed_bits,
            ratio_percent = artifact.ratio_percent,
            "message compressed"
        );

        Ok(self.artifact.insert(artifact))
    }

    /// Sign the fingerprint's hex text.
    ///
    /// Generates a key pair at `config.key_bits` on first use. The signed
    /// payload is the fingerprint, not the message and not the compressed
    /// bits: the signature attests to the content, independent of its
    /// encoded form.
    pub fn sign(&mut self) -> Result<SignReport> {
        let fingerprint = self
            .fingerprint
            .ok_or(SessionError::PrerequisiteMissing(Step::Fingerprint))?;

        if !self.oracle.has_private_key() {
            info!(bits = self.config.key_bits, "generating key pair");
            self.oracle.generate_keys(self.config.key_bits)?;
        }

        let signature = self.oracle.sign(&fingerprint.to_hex())?;
        let key_info = self.oracle.key_info().ok_or(OracleError::NoKeyMaterial)?;
        self.signature = Some(signature.clone());

        debug!(signature_bytes = signature.len(), "fingerprint signed");
        Ok(SignReport {
            signature,
            key_info,
        })
    }

    /// Assemble the signed package: compressed bits, tree, signature, and
    /// the public key. This is the simulated "send".
    pub fn transmit(&mut self) -> Result<&SignedPackage> {
        let artifact = self
            .artifact
            .as_ref()
            .ok_or(SessionError::PrerequisiteMissing(Step::Compress))?;
        let signature = self
            .signature
            .clone()
            .ok_or(SessionError::PrerequisiteMissing(Step::Sign))?;
        let public_key = self.oracle.public_key().ok_or(OracleError::NoKeyMaterial)?;

        let package = SignedPackage {
            bits: artifact.bits.clone(),
            tree: artifact.tree.clone(),
            signature,
            public_key,
        };
        info!(
            payload_bits = package.payload_bits(),
            signature_bytes = package.signature_bytes(),
            "package transmitted"
        );

        Ok(self.package.insert(package))
    }

    /// Receive the transmitted package: decompress, recompute the
    /// fingerprint, and verify the signature against it.
    pub fn verify_received(&self) -> Result<VerifyReport> {
        let package = self
            .package
            .as_ref()
            .ok_or(SessionError::PrerequisiteMissing(Step::Transmit))?;

        Ok(verify_package(&self.oracle, package)?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// The current message, if set.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The current fingerprint, if computed.
    pub fn current_fingerprint(&self) -> Option<Fingerprint> {
        self.fingerprint
    }

    /// The current compressed artifact, if any.
    pub fn artifact(&self) -> Option<&CompressedArtifact> {
        self.artifact.as_ref()
    }

    /// The current signature, if any.
    pub fn signature(&self) -> Option<&SignatureBytes> {
        self.signature.as_ref()
    }

    /// The transmitted package, if any.
    pub fn transmitted(&self) -> Option<&SignedPackage> {
        self.package.as_ref()
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// Receiver-side verification of a package.
///
/// Decompresses the payload, recomputes the fingerprint over the recovered
/// text, and checks the signature against it with the packaged public key.
/// Any corruption of the payload that changes the recovered text changes
/// the fingerprint and fails the check. The guarantee is probabilistic:
/// the fingerprint is a teaching-grade hash and collisions are feasible.
pub fn verify_package<O: SigningOracle>(
    oracle: &O,
    package: &SignedPackage,
) -> std::result::Result<VerifyReport, OracleError> {
    let message = codec::decompress(&package.bits, &package.tree);
    let fingerprint = Fingerprint::of(&message);
    let authentic = oracle.verify(&fingerprint.to_hex(), &package.signature, &package.public_key)?;

    info!(authentic, fingerprint = %fingerprint, "package verified");
    Ok(VerifyReport {
        authentic,
        message,
        fingerprint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::PublicKeyMaterial;
    use rsa::{BigUint, RsaPublicKey};

    /// A tiny fixed public key so stub packages have something to carry.
    fn stub_key() -> PublicKeyMaterial {
        let n = BigUint::from(3233u32);
        let e = BigUint::from(17u32);
        PublicKeyMaterial::new(RsaPublicKey::new(n, e).expect("stub key"))
    }

    /// Deterministic stand-in oracle: the "signature" is the payload text
    /// itself, and verification is byte equality. Exercises the session
    /// state machine without key generation cost.
    #[derive(Default)]
    struct EchoOracle {
        keyed: bool,
    }

    impl SigningOracle for EchoOracle {
        fn generate_keys(&mut self, _bits: usize) -> std::result::Result<(), OracleError> {
            self.keyed = true;
            Ok(())
        }

        fn has_private_key(&self) -> bool {
            self.keyed
        }

        fn public_key(&self) -> Option<PublicKeyMaterial> {
            self.keyed.then(stub_key)
        }

        fn sign(&self, payload: &str) -> std::result::Result<SignatureBytes, OracleError> {
            if !self.keyed {
                return Err(OracleError::NoKeyMaterial);
            }
            Ok(SignatureBytes::from(payload.as_bytes().to_vec()))
        }

        fn verify(
            &self,
            payload: &str,
            signature: &SignatureBytes,
            _key: &PublicKeyMaterial,
        ) -> std::result::Result<bool, OracleError> {
            Ok(signature.as_bytes() == payload.as_bytes())
        }

        fn key_info(&self) -> Option<KeyInfo> {
            self.keyed.then(|| KeyInfo {
                modulus: "0".to_string(),
                public_exponent: "0".to_string(),
                bit_length: 0,
            })
        }
    }

    fn session() -> Session<EchoOracle> {
        Session::with_oracle(EchoOracle::default(), SessionConfig::default())
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut sess = session();
        assert!(matches!(
            sess.set_message(""),
            Err(SessionError::EmptyMessage)
        ));
        assert!(sess.message().is_none());
    }

    #[test]
    fn test_full_pipeline_authentic() {
        let mut sess = session();
        sess.set_message("HELLO").unwrap();
        let fp = sess.fingerprint().unwrap();
        assert_eq!(fp.to_hex(), "b44c4107");
        sess.compress().unwrap();
        sess.sign().unwrap();
        sess.transmit().unwrap();

        let report = sess.verify_received().unwrap();
        assert!(report.authentic);
        assert_eq!(report.message, "HELLO");
        assert_eq!(report.fingerprint, fp);
    }

    #[test]
    fn test_sign_before_fingerprint_fails_and_sets_nothing() {
        let mut sess = session();
        sess.set_message("HELLO").unwrap();
        let err = sess.sign().unwrap_err();
        assert!(matches!(
            err,
            SessionError::PrerequisiteMissing(Step::Fingerprint)
        ));
        assert!(sess.signature().is_none());
    }

    #[test]
    fn test_fingerprint_before_message_fails() {
        let mut sess = session();
        assert!(matches!(
            sess.fingerprint(),
            Err(SessionError::PrerequisiteMissing(Step::Message))
        ));
    }

    #[test]
    fn test_transmit_requires_both_artifact_and_signature() {
        let mut sess = session();
        sess.set_message("HELLO").unwrap();
        assert!(matches!(
            sess.transmit(),
            Err(SessionError::PrerequisiteMissing(Step::Compress))
        ));

        sess.compress().unwrap();
        assert!(matches!(
            sess.transmit(),
            Err(SessionError::PrerequisiteMissing(Step::Sign))
        ));
    }

    #[test]
    fn test_verify_before_transmit_fails() {
        let mut sess = session();
        sess.set_message("HELLO").unwrap();
        assert!(matches!(
            sess.verify_received(),
            Err(SessionError::PrerequisiteMissing(Step::Transmit))
        ));
    }

    #[test]
    fn test_new_message_clears_derived_state() {
        let mut sess = session();
        sess.set_message("HELLO").unwrap();
        sess.fingerprint().unwrap();
        sess.compress().unwrap();
        sess.sign().unwrap();
        sess.transmit().unwrap();

        sess.set_message("WORLD").unwrap();
        assert!(sess.current_fingerprint().is_none());
        assert!(sess.artifact().is_none());
        assert!(sess.signature().is_none());
        assert!(sess.transmitted().is_none());
    }

    #[test]
    fn test_tampered_payload_reported_inauthentic() {
        let mut sess = session();
        sess.set_message("HELLO").unwrap();
        sess.fingerprint().unwrap();
        sess.compress().unwrap();
        sess.sign().unwrap();
        sess.transmit().unwrap();

        let mut tampered = sess.transmitted().unwrap().clone();
        tampered.bits.flip(0);

        let report = verify_package(&EchoOracle { keyed: true }, &tampered).unwrap();
        assert!(!report.authentic);
        assert_ne!(report.message, "HELLO");
    }
}
