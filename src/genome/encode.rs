//! Encoding of caller-ordered tree nodes into a [`Genome`].
//!
//! The encoder is an explicit two-phase fold. Nodes are first gathered, by reference, into an
//! ordered buffer ([`LinearEncoder`]); buffers built independently (say one per source tree)
//! can be concatenated with [`LinearEncoder::append`] or [`LinearEncoder::merge`]. Only
//! [`LinearEncoder::finish`] assigns positions, so child references always resolve against
//! the final concatenated order.
//!
//! Positions are keyed by node *identity* ([`ByAddress`]), never by value: two distinct nodes
//! holding equal values get distinct records.
//!
//! The encoder does not pick a traversal. Record `i` of the output is node `i` of the input.

use std::collections::hash_map::Entry;

use ahash::AHashMap;
use by_address::ByAddress;

use crate::tree::TreeNode;

use super::{error::EncodeError, GeneIndex, GeneRecord, Genome};

/// Order in which [`encode_tree`] flattens a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Traversal {
    #[default]
    PreOrder,
    BreadthFirst,
    PostOrder,
}

/// Ordered buffer of borrowed nodes awaiting encoding.
#[derive(Debug)]
pub struct LinearEncoder<'a, A> {
    nodes: Vec<&'a TreeNode<A>>,
}

impl<A> Clone for LinearEncoder<'_, A> {
    fn clone(&self) -> Self {
        LinearEncoder {
            nodes: self.nodes.clone(),
        }
    }
}

impl<A> Default for LinearEncoder<'_, A> {
    fn default() -> Self {
        Self::new()
    }
}

type PositionIndex<'a, A> = AHashMap<ByAddress<&'a TreeNode<A>>, GeneIndex>;

impl<'a, A> LinearEncoder<'a, A> {
    pub fn new() -> Self {
        LinearEncoder { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LinearEncoder {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends `node` to the buffer. It will occupy the next position.
    pub fn push(&mut self, node: &'a TreeNode<A>) -> GeneIndex {
        self.nodes.push(node);
        GeneIndex(self.nodes.len() - 1)
    }

    /// Moves all nodes of `other` to the end of this buffer, leaving `other` empty.
    pub fn append(&mut self, other: &mut LinearEncoder<'a, A>) {
        self.nodes.append(&mut other.nodes);
    }

    /// Concatenation of two partial batches: `self` first, then `other`.
    pub fn merge(mut self, mut other: LinearEncoder<'a, A>) -> Self {
        self.append(&mut other);
        self
    }

    /// Position the given node instance would be encoded at, if it is in the buffer.
    ///
    /// Linear in the buffer length; resolution inside [`Self::finish`] is hashed.
    pub fn position_of(&self, node: &TreeNode<A>) -> Option<GeneIndex> {
        self.nodes
            .iter()
            .position(|n| TreeNode::ptr_eq(n, node))
            .map(GeneIndex)
    }

    fn position_index(&self) -> PositionIndex<'a, A> {
        let mut index = PositionIndex::with_capacity(self.nodes.len());
        for (i, &node) in self.nodes.iter().enumerate() {
            match index.entry(ByAddress(node)) {
                Entry::Occupied(first) => {
                    log::warn!(
                        "node at position {i} is the same instance as position {}; child references resolve to the first",
                        first.get()
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(GeneIndex(i));
                }
            }
        }
        index
    }

    /// Resolves every child reference against the buffered order and emits one record per node.
    ///
    /// Fails with [`EncodeError::DanglingChild`] on the first child that is not itself in the
    /// buffer.
    pub fn finish(self) -> Result<Genome<A>, EncodeError>
    where
        A: Clone,
    {
        self.finish_with(GeneRecord::new).map(Genome::from)
    }

    /// Like [`finish`](Self::finish), but builds each gene with `new_gene` from its allele
    /// and child positions. The genes come out in buffer order.
    pub fn finish_with<G>(
        self,
        mut new_gene: impl FnMut(A, Vec<GeneIndex>) -> G,
    ) -> Result<Vec<G>, EncodeError>
    where
        A: Clone,
    {
        log::debug!("encoding {} tree nodes", self.nodes.len());
        let index = self.position_index();

        self.nodes
            .iter()
            .enumerate()
            .map(|(i, &node)| {
                let parent = GeneIndex(i);
                let child_indices = node
                    .children
                    .iter()
                    .enumerate()
                    .map(|(child, c)| {
                        index
                            .get(&ByAddress(c))
                            .copied()
                            .ok_or(EncodeError::DanglingChild { parent, child })
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .inspect_err(|e| log::warn!("{e}"))?;
                log::trace!("record {parent}: children {child_indices:?}");
                Ok(new_gene(node.value.clone(), child_indices))
            })
            .collect()
    }
}

impl<'a, A> Extend<&'a TreeNode<A>> for LinearEncoder<'a, A> {
    fn extend<I: IntoIterator<Item = &'a TreeNode<A>>>(&mut self, iter: I) {
        self.nodes.extend(iter);
    }
}

impl<'a, A> FromIterator<&'a TreeNode<A>> for LinearEncoder<'a, A> {
    fn from_iter<I: IntoIterator<Item = &'a TreeNode<A>>>(iter: I) -> Self {
        LinearEncoder {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// Encodes `nodes`, in the order given, into a genome.
///
/// `nodes` must contain every child of every node it contains. Equal values are fine;
/// the same node instance twice is tolerated but only the first occurrence is referenced.
pub fn encode<'a, A: Clone + 'a>(
    nodes: impl IntoIterator<Item = &'a TreeNode<A>>,
) -> Result<Genome<A>, EncodeError> {
    nodes.into_iter().collect::<LinearEncoder<'a, A>>().finish()
}

/// Encodes `nodes` like [`encode`], building each gene with `new_gene`.
pub fn encode_with<'a, A: Clone + 'a, G>(
    nodes: impl IntoIterator<Item = &'a TreeNode<A>>,
    new_gene: impl FnMut(A, Vec<GeneIndex>) -> G,
) -> Result<Vec<G>, EncodeError> {
    nodes
        .into_iter()
        .collect::<LinearEncoder<'a, A>>()
        .finish_with(new_gene)
}

/// Flattens the tree under `root` in the given traversal order and encodes it.
///
/// Returns the genome together with the position of `root` in it.
pub fn encode_tree<A: Clone>(
    root: &TreeNode<A>,
    traversal: Traversal,
) -> Result<(Genome<A>, GeneIndex), EncodeError> {
    let encoder: LinearEncoder<'_, A> = match traversal {
        Traversal::PreOrder => root.iter_preorder().collect(),
        Traversal::BreadthFirst => root.iter_bfs().collect(),
        Traversal::PostOrder => root.iter_postorder().collect(),
    };
    let root_index = match traversal {
        Traversal::PreOrder | Traversal::BreadthFirst => GeneIndex(0),
        Traversal::PostOrder => GeneIndex(encoder.len() - 1),
    };
    Ok((encoder.finish()?, root_index))
}
