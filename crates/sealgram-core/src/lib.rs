//! # Sealgram Core
//!
//! Pure primitives for sealgram: content fingerprints, prefix-code trees,
//! and the bitstream codec.
//!
//! This crate contains no I/O and no key material. It is pure computation
//! over in-memory text and bit sequences.
//!
//! ## Key Types
//!
//! - [`Fingerprint`] - 32-bit FNV-1 content fingerprint
//! - [`CodeTree`] - immutable prefix-code tree stored as an index arena
//! - [`CodeBook`] - per-symbol bit codes derived from a tree
//! - [`Bits`] - a sequence of bits, the compressed payload representation
//! - [`CompressedArtifact`] - the output of [`compress`]
//!
//! ## Codec
//!
//! [`compress`] counts symbol frequencies, builds the tree, and encodes the
//! input symbol by symbol. [`decompress`] walks the same tree bit by bit.
//! Decoding has no end-of-stream marker: a sequence that ends in the middle
//! of a code drops the partial trailing code. See [`codec`].

pub mod bits;
pub mod codec;
pub mod error;
pub mod fingerprint;
pub mod tree;

pub use bits::Bits;
pub use codec::{compress, decompress, CompressedArtifact};
pub use error::CodecError;
pub use fingerprint::Fingerprint;
pub use tree::{CodeBook, CodeTree, FrequencyTable, Node, NodeId};
