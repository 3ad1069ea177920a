//! Flat, index-referencing encoding of trees.
//!
//! A [`Genome<A>`] is a sequence of [`GeneRecord<A>`]s, one per tree node. Every record holds
//! a copy of the node value (its *allele*) and the positions, within the same genome, of the
//! node's children in their original order.
//!
//! A well-formed genome encoding a single tree has exactly one position that no record
//! references as a child (the root), and the child references form a tree reachable from
//! that root. Several trees may share one genome, in which case there is one root per tree.
//!
//! *   [`encode`] turns a caller-ordered sequence of nodes into a genome.
//! *   [`decode`] rebuilds a [`TreeNode`] from a genome and a root position.

use std::fmt::{self, Display};
use std::ops::Index;

use bitvec::vec::BitVec;
use itertools::Itertools;

use crate::tree::TreeNode;

pub mod decode;
pub mod encode;
pub mod error;

/// A type-safe position within a [`Genome`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct GeneIndex(pub usize);

impl From<usize> for GeneIndex {
    fn from(value: usize) -> Self {
        GeneIndex(value)
    }
}

impl From<GeneIndex> for usize {
    fn from(value: GeneIndex) -> Self {
        value.0
    }
}

impl Display for GeneIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One encoded node: the node value plus the genome positions of its children.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct GeneRecord<A> {
    pub(crate) allele: A,
    pub(crate) child_indices: Vec<GeneIndex>,
}

impl<A> GeneRecord<A> {
    /// Builds a record by hand. Genomes assembled this way are not known to be well-formed
    /// and should be read back with [`decode`], which validates.
    pub fn new(allele: A, child_indices: Vec<GeneIndex>) -> Self {
        GeneRecord {
            allele,
            child_indices,
        }
    }

    pub fn allele(&self) -> &A {
        &self.allele
    }

    pub fn child_indices(&self) -> &[GeneIndex] {
        &self.child_indices
    }

    pub fn child_count(&self) -> usize {
        self.child_indices.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.child_indices.is_empty()
    }

    pub fn child_at(&self, i: usize) -> Option<GeneIndex> {
        self.child_indices.get(i).copied()
    }

    /// The child records of this record within `genome`.
    ///
    /// Indices that fall outside `genome` are skipped; [`decode::validate`] reports them.
    pub fn children<'g>(
        &'g self,
        genome: &'g Genome<A>,
    ) -> impl Iterator<Item = &'g GeneRecord<A>> + 'g {
        self.child_indices.iter().filter_map(|&c| genome.get(c))
    }

    pub fn into_parts(self) -> (A, Vec<GeneIndex>) {
        (self.allele, self.child_indices)
    }
}

/// A flat sequence of [`GeneRecord`]s indexed by [`GeneIndex`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct Genome<A> {
    records: Vec<GeneRecord<A>>,
}

impl<A> Default for Genome<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Genome<A> {
    pub fn new() -> Self {
        Genome {
            records: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Genome {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: GeneRecord<A>) -> GeneIndex {
        self.records.push(record);
        GeneIndex(self.records.len() - 1)
    }

    pub fn get(&self, index: GeneIndex) -> Option<&GeneRecord<A>> {
        self.records.get(index.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GeneIndex, &GeneRecord<A>)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (GeneIndex(i), r))
    }

    pub fn records(&self) -> &[GeneRecord<A>] {
        &self.records
    }

    /// The child records of the record at `index`, in child order.
    pub fn children(&self, index: GeneIndex) -> impl Iterator<Item = &GeneRecord<A>> {
        self.get(index)
            .into_iter()
            .flat_map(move |record| record.children(self))
    }

    /// Positions that no record references as a child, in ascending order.
    ///
    /// A well-formed encoding of a single tree has exactly one; a forest has one per tree.
    /// Child indices outside the genome are ignored.
    pub fn roots(&self) -> Vec<GeneIndex> {
        let mut referenced: BitVec = BitVec::repeat(false, self.len());
        for record in &self.records {
            for child in &record.child_indices {
                if child.0 < self.len() {
                    referenced.set(child.0, true);
                }
            }
        }
        referenced.iter_zeros().map(GeneIndex).collect()
    }

    /// Rebuilds the tree rooted at `root`, validating the genome first.
    /// See [`decode::decode`].
    pub fn to_tree(&self, root: GeneIndex) -> Result<TreeNode<A>, error::DecodeError>
    where
        A: Clone,
    {
        decode::decode(self, root)
    }
}

impl<A> Index<GeneIndex> for Genome<A> {
    type Output = GeneRecord<A>;
    fn index(&self, index: GeneIndex) -> &Self::Output {
        &self.records[index.0]
    }
}

impl<A> FromIterator<GeneRecord<A>> for Genome<A> {
    fn from_iter<I: IntoIterator<Item = GeneRecord<A>>>(iter: I) -> Self {
        Genome {
            records: iter.into_iter().collect(),
        }
    }
}

impl<A> From<Vec<GeneRecord<A>>> for Genome<A> {
    fn from(records: Vec<GeneRecord<A>>) -> Self {
        Genome { records }
    }
}

impl<A> IntoIterator for Genome<A> {
    type Item = GeneRecord<A>;
    type IntoIter = std::vec::IntoIter<GeneRecord<A>>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, A> IntoIterator for &'a Genome<A> {
    type Item = &'a GeneRecord<A>;
    type IntoIter = std::slice::Iter<'a, GeneRecord<A>>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<A: Display> Display for GeneRecord<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> [{}]",
            self.allele,
            self.child_indices.iter().join(", ")
        )
    }
}

impl<A: Display> Display for Genome<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.iter() {
            if i.0 != 0 {
                writeln!(f)?;
            }
            write!(f, "{i}: {record}")?;
        }
        Ok(())
    }
}
