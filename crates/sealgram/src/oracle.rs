//! The signing oracle.
//!
//! Key generation, signing, and verification are an external capability as
//! far as the pipeline is concerned: the [`SigningOracle`] trait is the
//! seam, and [`RsaOracle`] implements it over the `rsa` crate. Nothing
//! outside this module inspects key internals beyond [`KeyInfo`].

use bytes::Bytes;
use rand::thread_rng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::OracleError;

/// Signature bytes produced by an oracle.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureBytes(Bytes);

impl SignatureBytes {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Signature length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the signature is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        let preview = &hex[..hex.len().min(16)];
        write!(f, "SignatureBytes({} bytes, {preview}…)", self.len())
    }
}

impl From<Vec<u8>> for SignatureBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl AsRef<[u8]> for SignatureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Public-key material, opaque to the rest of the pipeline.
///
/// This is the only key half a package ever carries. Display details come
/// from [`PublicKeyMaterial::info`]; the wrapped key is never exposed.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKeyMaterial(RsaPublicKey);

impl PublicKeyMaterial {
    pub(crate) fn new(key: RsaPublicKey) -> Self {
        Self(key)
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }

    /// Displayable key facts: modulus, public exponent, bit length.
    pub fn info(&self) -> KeyInfo {
        KeyInfo {
            modulus: self.0.n().to_string(),
            public_exponent: self.0.e().to_string(),
            bit_length: self.0.n().bits(),
        }
    }
}

impl fmt::Debug for PublicKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKeyMaterial({} bits)", self.0.n().bits())
    }
}

/// Displayable facts about a key pair. The private half never appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    /// The modulus, as a decimal string.
    pub modulus: String,
    /// The public exponent, as a decimal string.
    pub public_exponent: String,
    /// Modulus size in bits.
    pub bit_length: usize,
}

/// The external sign/verify capability the pipeline delegates to.
///
/// Implementations own the key pair; the pipeline only ever sees signature
/// bytes, [`PublicKeyMaterial`], and [`KeyInfo`].
pub trait SigningOracle {
    /// Generate a fresh key pair of the given modulus size.
    fn generate_keys(&mut self, bits: usize) -> Result<(), OracleError>;

    /// Check whether a private key is present.
    fn has_private_key(&self) -> bool;

    /// The public half of the current key pair, if any.
    fn public_key(&self) -> Option<PublicKeyMaterial>;

    /// Sign a payload text with the private key.
    ///
    /// # Errors
    /// [`OracleError::NoKeyMaterial`] without a private key.
    fn sign(&self, payload: &str) -> Result<SignatureBytes, OracleError>;

    /// Verify a signature over a payload text against a public key.
    ///
    /// A bad signature or mismatched key is a negative result (`Ok(false)`),
    /// not an error.
    fn verify(
        &self,
        payload: &str,
        signature: &SignatureBytes,
        key: &PublicKeyMaterial,
    ) -> Result<bool, OracleError>;

    /// Displayable facts about the current key pair, if any.
    fn key_info(&self) -> Option<KeyInfo>;
}

/// RSA signing oracle: PKCS#1 v1.5 signatures over the SHA-256 digest of
/// the payload text.
///
/// Key sizes here are whatever the caller asks for; the pipeline default of
/// 512 bits is demo-grade and far below anything production-worthy.
#[derive(Default)]
pub struct RsaOracle {
    private_key: Option<RsaPrivateKey>,
    public_key: Option<RsaPublicKey>,
}

impl fmt::Debug for RsaOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never renders private key material.
        match &self.public_key {
            Some(key) => write!(f, "RsaOracle({} bits)", key.n().bits()),
            None => write!(f, "RsaOracle(no keys)"),
        }
    }
}

impl RsaOracle {
    /// Create an oracle with no key material.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SigningOracle for RsaOracle {
    fn generate_keys(&mut self, bits: usize) -> Result<(), OracleError> {
        let mut rng = thread_rng();
        let private = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|err| OracleError::KeyGeneration(err.to_string()))?;
        self.public_key = Some(RsaPublicKey::from(&private));
        self.private_key = Some(private);
        Ok(())
    }

    fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    fn public_key(&self) -> Option<PublicKeyMaterial> {
        self.public_key.clone().map(PublicKeyMaterial::new)
    }

    fn sign(&self, payload: &str) -> Result<SignatureBytes, OracleError> {
        let private = self.private_key.as_ref().ok_or(OracleError::NoKeyMaterial)?;
        let digest = Sha256::digest(payload.as_bytes());
        let signature = private
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(|err| OracleError::Signing(err.to_string()))?;
        Ok(SignatureBytes::from(signature))
    }

    fn verify(
        &self,
        payload: &str,
        signature: &SignatureBytes,
        key: &PublicKeyMaterial,
    ) -> Result<bool, OracleError> {
        let digest = Sha256::digest(payload.as_bytes());
        Ok(key
            .as_rsa()
            .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature.as_bytes())
            .is_ok())
    }

    fn key_info(&self) -> Option<KeyInfo> {
        self.public_key
            .as_ref()
            .map(|key| PublicKeyMaterial::new(key.clone()).info())
    }
}
