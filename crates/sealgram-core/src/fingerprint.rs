//! FNV-1 content fingerprints.
//!
//! A fingerprint is a 32-bit non-cryptographic digest of a text. It is used
//! for tamper detection, not collision resistance: collisions are feasible,
//! which is an accepted limitation of this hash family.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The 32-bit FNV offset basis.
pub const FNV_OFFSET: u32 = 0x811c_9dc5;

/// The 32-bit FNV prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// A 32-bit FNV-1 fingerprint of a text.
///
/// FNV-1 multiplies the accumulator by the prime *before* xoring in each
/// byte (the reverse order is FNV-1a and produces different values). The
/// multiply wraps at 32 bits. An empty input never runs the loop body, so
/// its fingerprint is exactly [`FNV_OFFSET`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(u32);

impl Fingerprint {
    /// Compute the fingerprint of a text over its UTF-8 bytes.
    pub fn of(text: &str) -> Self {
        let mut acc = FNV_OFFSET;
        for &byte in text.as_bytes() {
            acc = acc.wrapping_mul(FNV_PRIME) ^ u32::from(byte);
        }
        Self(acc)
    }

    /// Create from a raw 32-bit value.
    pub const fn from_value(value: u32) -> Self {
        Self(value)
    }

    /// Get the decimal (numeric) form.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Canonical textual form: zero-padded 8-digit lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("{:08x}", self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<u32> for Fingerprint {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_offset_basis() {
        assert_eq!(Fingerprint::of("").value(), FNV_OFFSET);
        assert_eq!(Fingerprint::of("").to_hex(), "811c9dc5");
    }

    #[test]
    fn test_reference_vectors() {
        // Standard FNV-1 32-bit vectors.
        assert_eq!(Fingerprint::of("a").to_hex(), "050c5d7e");
        assert_eq!(Fingerprint::of("foobar").to_hex(), "31f0b262");
        assert_eq!(Fingerprint::of("HELLO").to_hex(), "b44c4107");
    }

    #[test]
    fn test_deterministic() {
        let a = Fingerprint::of("hello world");
        let b = Fingerprint::of("hello world");
        assert_eq!(a, b);
        assert_eq!(a.value(), 0x548d_a96f);
    }

    #[test]
    fn test_order_sensitive() {
        assert_ne!(Fingerprint::of("ab"), Fingerprint::of("ba"));
        assert_eq!(Fingerprint::of("ab").to_hex(), "70772d38");
        assert_eq!(Fingerprint::of("ba").to_hex(), "6f772ba6");
    }

    #[test]
    fn test_hex_is_zero_padded() {
        // 0x050c5d7e must render with its leading zero.
        let fp = Fingerprint::of("a");
        assert_eq!(fp.to_hex().len(), 8);
        assert!(fp.to_hex().starts_with('0'));
    }

    #[test]
    fn test_multibyte_utf8() {
        // The hash runs over UTF-8 bytes, so multibyte characters count
        // once per byte, not once per char.
        assert_ne!(Fingerprint::of("é"), Fingerprint::of("e"));
        assert_eq!(Fingerprint::of("é"), Fingerprint::of("é"));
    }
}
