//! Compress and decompress text against a prefix-code tree.
//!
//! Compression derives the tree from the input itself and ships it inside
//! the [`CompressedArtifact`]; the receiver needs the exact tree to decode.
//!
//! Decoding carries no end-of-stream marker. It stops when the bit sequence
//! is exhausted, and a sequence that ends in the middle of a code drops the
//! partial trailing code without error. Callers that truncate payloads get
//! truncated text back.

use serde::{Deserialize, Serialize};

use crate::bits::Bits;
use crate::error::CodecError;
use crate::tree::{CodeBook, CodeTree, FrequencyTable};

/// The output of [`compress`]: payload, tree, and size metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedArtifact {
    /// The original text.
    pub text: String,
    /// The concatenated per-symbol codes, in input order.
    pub bits: Bits,
    /// The tree the bits were encoded against.
    pub tree: CodeTree,
    /// The per-symbol codes, for display.
    pub codebook: CodeBook,
    /// Original size in bits (symbol count x 8).
    pub original_bits: usize,
    /// Compressed size in bits.
    pub compressed_bits: usize,
    /// Space saved as a percentage. Negative when the encoding grew.
    pub ratio_percent: f64,
}

/// Compress a text.
///
/// Counts symbol frequencies, builds the tree, derives the codebook, and
/// concatenates each input symbol's code in order.
///
/// # Errors
/// Returns [`CodecError::EmptyInput`] for an empty text.
pub fn compress(text: &str) -> Result<CompressedArtifact, CodecError> {
    if text.is_empty() {
        return Err(CodecError::EmptyInput);
    }

    let freq = FrequencyTable::from_text(text);
    let tree = CodeTree::build(&freq).ok_or(CodecError::EmptyInput)?;
    let codebook = tree.codebook();

    let mut bits = Bits::new();
    for symbol in text.chars() {
        let code = codebook
            .code(symbol)
            .ok_or(CodecError::MissingCode(symbol))?;
        bits.extend(code);
    }

    let original_bits = text.chars().count() * 8;
    let compressed_bits = bits.len();
    let ratio_percent = if original_bits == 0 {
        0.0
    } else {
        (original_bits as f64 - compressed_bits as f64) / original_bits as f64 * 100.0
    };

    Ok(CompressedArtifact {
        text: text.to_string(),
        bits,
        tree,
        codebook,
        original_bits,
        compressed_bits,
        ratio_percent,
    })
}

/// Decompress a bit sequence against a tree.
///
/// Walks from the root one bit at a time: `0` descends left, `1` descends
/// right. A missing child leaves the walk where it is, which only matters
/// for the single-leaf tree (every bit re-lands on the root). On reaching a
/// leaf the symbol is emitted and the walk resets to the root.
///
/// An empty sequence yields the empty string; trailing bits that do not
/// complete a code are dropped.
pub fn decompress(bits: &Bits, tree: &CodeTree) -> String {
    let mut text = String::new();
    let mut at = tree.root();

    for bit in bits.iter() {
        let node = tree.node(at);
        let next = if bit { node.right } else { node.left };
        at = next.unwrap_or(at);

        if let Some(symbol) = tree.node(at).symbol {
            text.push(symbol);
            at = tree.root();
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(compress("").unwrap_err(), CodecError::EmptyInput);
    }

    #[test]
    fn test_known_encoding() {
        // Codes: H=00 E=01 O=10 L=11.
        let artifact = compress("HELLO").unwrap();
        assert_eq!(artifact.bits.to_string(), "0001111110");
        assert_eq!(artifact.original_bits, 40);
        assert_eq!(artifact.compressed_bits, 10);
        assert_eq!(artifact.ratio_percent, 75.0);
        assert_eq!(decompress(&artifact.bits, &artifact.tree), "HELLO");
    }

    #[test]
    fn test_single_symbol_alphabet() {
        let artifact = compress("aaaa").unwrap();
        assert_eq!(artifact.bits.to_string(), "0000");
        assert_eq!(artifact.compressed_bits, 4);
        assert_eq!(decompress(&artifact.bits, &artifact.tree), "aaaa");
    }

    #[test]
    fn test_skewed_frequencies_save_space() {
        let artifact = compress("aaaaaaaab").unwrap();
        assert!(artifact.ratio_percent > 0.0);
        // One-bit codes: eight 'a's and one 'b'.
        assert_eq!(artifact.compressed_bits, 9);
        assert_eq!(decompress(&artifact.bits, &artifact.tree), "aaaaaaaab");
    }

    #[test]
    fn test_uniform_alphabet_ratio_zero() {
        // 256 distinct symbols, each once: every code is exactly 8 bits.
        let text: String = (0x100u32..0x200).map(|cp| char::from_u32(cp).unwrap()).collect();
        let artifact = compress(&text).unwrap();
        assert_eq!(artifact.compressed_bits, artifact.original_bits);
        assert_eq!(artifact.ratio_percent, 0.0);
        assert_eq!(decompress(&artifact.bits, &artifact.tree), text);
    }

    #[test]
    fn test_large_alphabet_ratio_negative() {
        // 512 distinct symbols, each once: every code is 9 bits, so the
        // encoding grows and the ratio goes negative.
        let text: String = (0x4E00u32..0x5000).map(|cp| char::from_u32(cp).unwrap()).collect();
        let artifact = compress(&text).unwrap();
        assert!(artifact.ratio_percent < 0.0);
        assert_eq!(decompress(&artifact.bits, &artifact.tree), text);
    }

    #[test]
    fn test_empty_bits_decode_to_empty_text() {
        let artifact = compress("HELLO").unwrap();
        assert_eq!(decompress(&Bits::new(), &artifact.tree), "");
    }

    #[test]
    fn test_misaligned_trailing_bits_drop_partial_code() {
        // "HELLO" encodes to 10 bits; cutting one mid-code bit leaves the
        // walk inside the tree and the trailing symbol is silently lost.
        let artifact = compress("HELLO").unwrap();
        let mut cut = artifact.bits.clone();
        cut.truncate(9);
        assert_eq!(decompress(&cut, &artifact.tree), "HELL");
    }

    #[test]
    fn test_aligned_truncation_keeps_whole_codes() {
        // Cutting exactly on a code boundary loses whole symbols only.
        let artifact = compress("HELLO").unwrap();
        let mut cut = artifact.bits.clone();
        cut.truncate(8);
        assert_eq!(decompress(&cut, &artifact.tree), "HELL");
    }

    #[test]
    fn test_artifact_serializes() {
        let artifact = compress("abab").unwrap();
        let json = serde_json::to_string(&artifact).unwrap();
        let back: CompressedArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(artifact, back);
    }

    proptest! {
        #[test]
        fn prop_roundtrip(text in "\\PC{1,64}") {
            let artifact = compress(&text).unwrap();
            prop_assert_eq!(decompress(&artifact.bits, &artifact.tree), text);
        }

        #[test]
        fn prop_compressed_never_exceeds_symbol_depth_bound(text in "[a-p]{1,48}") {
            // With at most 16 distinct symbols no code exceeds 15 bits.
            let artifact = compress(&text).unwrap();
            let longest = artifact
                .codebook
                .iter()
                .map(|(_, code)| code.len())
                .max()
                .unwrap_or(0);
            prop_assert!(longest <= 15);
        }
    }
}
