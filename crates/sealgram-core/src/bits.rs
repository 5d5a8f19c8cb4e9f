//! Bit sequences.
//!
//! [`Bits`] is the payload representation used by the codec: an ordered
//! sequence of bits built by concatenating per-symbol codes. It favors
//! clarity over packing density; payloads here are single messages, not
//! bulk streams.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;

/// An ordered sequence of bits.
///
/// Renders as a string of `0`/`1` characters via [`fmt::Display`] and can
/// be parsed back from one.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bits {
    bits: Vec<bool>,
}

impl Bits {
    /// Create an empty bit sequence.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Create an empty bit sequence with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Append a single bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Remove and return the last bit.
    pub fn pop(&mut self) -> Option<bool> {
        self.bits.pop()
    }

    /// Append all bits of `other`, in order.
    pub fn extend(&mut self, other: &Bits) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Get the bit at `index`.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Invert the bit at `index`. Out-of-range indices are ignored.
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Shorten the sequence to at most `len` bits.
    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }

    /// Number of bits in the sequence.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check whether the sequence holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 32;
        let rendered: String = self
            .iter()
            .take(PREVIEW)
            .map(|bit| if bit { '1' } else { '0' })
            .collect();
        if self.len() > PREVIEW {
            write!(f, "Bits({} bits, {}…)", self.len(), rendered)
        } else {
            write!(f, "Bits({} bits, {})", self.len(), rendered)
        }
    }
}

impl FromStr for Bits {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = Bits::with_capacity(s.len());
        for ch in s.chars() {
            match ch {
                '0' => bits.push(false),
                '1' => bits.push(true),
                other => return Err(CodecError::InvalidBit(other)),
            }
        }
        Ok(bits)
    }
}

impl FromIterator<bool> for Bits {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
