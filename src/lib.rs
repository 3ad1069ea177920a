//! # Treegene
//!
//! Treegene converts between explicit ordered trees and a flat, index-referencing encoding
//! in which every node occupies one slot holding its value and the slot positions of its
//! children.
//!
//! The flat form lets tree-shaped individuals (program trees, expression trees) be stored,
//! copied and mutated as plain arrays, while operators that need a parent/child view can
//! decode them back into a [`TreeNode`].
//!
//! ```
//! use treegene::{decode, encode, GeneIndex, TreeNode};
//!
//! let mut root = TreeNode::new(1);
//! root.push(2);
//! root.push(3).push(4);
//!
//! let nodes: Vec<_> = root.iter_bfs().collect();
//! let genome = encode(nodes).unwrap();
//! assert_eq!(genome[GeneIndex(0)].child_indices(), &[GeneIndex(1), GeneIndex(2)]);
//!
//! assert_eq!(decode(&genome, GeneIndex(0)).unwrap(), root);
//! ```

pub mod genome;
pub mod tree;

pub use genome::{
    decode::{
        decode, decode_forest, decode_forest_with, decode_unchecked, decode_with, validate,
        validate_with, DecodeOptions,
    },
    encode::{encode, encode_tree, encode_with, LinearEncoder, Traversal},
    error::{DecodeError, EncodeError},
    GeneIndex, GeneRecord, Genome,
};
pub use tree::TreeNode;
