//! The signed package: the unit that gets "transmitted".

use sealgram_core::{Bits, CodeTree};

use crate::oracle::{PublicKeyMaterial, SignatureBytes};

/// Everything a receiver needs: the compressed bits, the tree to decode
/// them, the signature over the sender's fingerprint, and the sender's
/// public key.
///
/// The private key can never end up in a package: assembly only ever
/// touches [`PublicKeyMaterial`].
#[derive(Debug, Clone)]
pub struct SignedPackage {
    /// The compressed payload.
    pub bits: Bits,
    /// The tree the payload was encoded against.
    pub tree: CodeTree,
    /// Signature over the sender-side fingerprint's hex text.
    pub signature: SignatureBytes,
    /// The sender's public key.
    pub public_key: PublicKeyMaterial,
}

impl SignedPackage {
    /// Payload size in bits.
    pub fn payload_bits(&self) -> usize {
        self.bits.len()
    }

    /// Signature size in bytes.
    pub fn signature_bytes(&self) -> usize {
        self.signature.len()
    }
}
