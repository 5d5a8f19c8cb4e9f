//! Prefix-code trees.
//!
//! A [`CodeTree`] is built bottom-up from a symbol frequency table: the two
//! lowest-weight nodes are repeatedly merged under a fresh parent until one
//! root remains. The tree is stored as an arena of nodes addressed by index,
//! so it is plain owned data, immutable once built and freely shareable.
//!
//! Walking left contributes a `0` bit, walking right a `1`. Every leaf sits
//! at a distinct path from the root, which makes the derived [`CodeBook`]
//! prefix-free.

use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use crate::bits::Bits;

/// Index of a node within a [`CodeTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// The arena index.
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// A single tree node.
///
/// Leaves own exactly one symbol; internal nodes own no symbol and exactly
/// two children whose weights they sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The symbol, for leaves. `None` for internal nodes.
    pub symbol: Option<char>,
    /// Occurrence count (leaves) or sum of child weights (internal nodes).
    pub weight: u64,
    /// Left child (`0` edge).
    pub left: Option<NodeId>,
    /// Right child (`1` edge).
    pub right: Option<NodeId>,
}

impl Node {
    /// Check whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }
}

/// Per-symbol occurrence counts, in first-appearance order.
///
/// The order matters: it is the tie-break for equal-weight nodes during
/// tree construction, which keeps one input mapping to one tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    entries: Vec<(char, u64)>,
}

impl FrequencyTable {
    /// Count symbol frequencies over a text.
    pub fn from_text(text: &str) -> Self {
        let mut positions: HashMap<char, usize> = HashMap::new();
        let mut entries: Vec<(char, u64)> = Vec::new();
        for symbol in text.chars() {
            match positions.get(&symbol) {
                Some(&at) => entries[at].1 += 1,
                None => {
                    positions.insert(symbol, entries.len());
                    entries.push((symbol, 1));
                }
            }
        }
        Self { entries }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table has no symbols.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(symbol, count)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &(char, u64)> {
        self.entries.iter()
    }
}

/// Heap entry during construction. Ordered by `(weight, order)` where
/// `order` is the arena insertion index, so equal-weight nodes pop in
/// insertion order.
#[derive(Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    weight: u64,
    order: usize,
    id: NodeId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An immutable prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl CodeTree {
    /// Build a tree from a frequency table.
    ///
    /// Returns `None` for an empty table. A table with one distinct symbol
    /// yields a single-leaf tree; [`CodeTree::codebook`] handles the
    /// degenerate code for it.
    pub fn build(freq: &FrequencyTable) -> Option<Self> {
        if freq.is_empty() {
            return None;
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(freq.len() * 2 - 1);
        let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::with_capacity(freq.len());

        for &(symbol, weight) in freq.iter() {
            let id = NodeId(nodes.len());
            nodes.push(Node {
                symbol: Some(symbol),
                weight,
                left: None,
                right: None,
            });
            heap.push(Reverse(HeapEntry {
                weight,
                order: id.0,
                id,
            }));
        }

        while heap.len() > 1 {
            let Reverse(low) = heap.pop().expect("heap holds at least two entries");
            let Reverse(high) = heap.pop().expect("heap holds at least two entries");

            let id = NodeId(nodes.len());
            let weight = low.weight + high.weight;
            nodes.push(Node {
                symbol: None,
                weight,
                left: Some(low.id),
                right: Some(high.id),
            });
            heap.push(Reverse(HeapEntry {
                weight,
                order: id.0,
                id,
            }));
        }

        let Reverse(root) = heap.pop().expect("non-empty table yields a root");
        Some(Self {
            nodes,
            root: root.id,
        })
    }

    /// The root node index.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by index.
    ///
    /// # Panics
    /// Panics if `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total number of nodes (leaves plus internal).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Derive the per-symbol codebook.
    ///
    /// Left edges contribute `0`, right edges `1`. If the root is itself a
    /// leaf (one-symbol alphabet), the natural code would be the empty
    /// path, which cannot appear in a bit stream; it gets the single-bit
    /// code `0` instead.
    pub fn codebook(&self) -> CodeBook {
        let mut codes: BTreeMap<char, Bits> = BTreeMap::new();
        let mut path = Bits::new();
        self.collect_codes(self.root, &mut path, &mut codes);
        CodeBook { codes }
    }

    fn collect_codes(&self, id: NodeId, path: &mut Bits, codes: &mut BTreeMap<char, Bits>) {
        let node = self.node(id);

        if let Some(symbol) = node.symbol {
            let code = if path.is_empty() {
                // Root-is-leaf case: assign "0".
                std::iter::once(false).collect()
            } else {
                path.clone()
            };
            codes.insert(symbol, code);
            return;
        }

        if let Some(left) = node.left {
            path.push(false);
            self.collect_codes(left, path, codes);
            path.pop();
        }
        if let Some(right) = node.right {
            path.push(true);
            self.collect_codes(right, path, codes);
            path.pop();
        }
    }
}

/// A mapping from symbol to its prefix-free bit code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBook {
    codes: BTreeMap<char, Bits>,
}

impl CodeBook {
    /// Look up the code for a symbol.
    pub fn code(&self, symbol: char) -> Option<&Bits> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check whether the codebook holds no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Bits)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }
}
