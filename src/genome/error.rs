use thiserror::Error;

use super::GeneIndex;

/// Errors that can occur while encoding trees into a genome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodeError {
    /// Child number `child` of the node at `parent` is not among the encoded nodes.
    #[error("Dangling child reference: child {child} of node {parent} is not in the node sequence")]
    DanglingChild { parent: GeneIndex, child: usize },
}

/// Errors found while validating a genome for decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodeError {
    #[error("Root index {root} out of bounds for genome of length {len}")]
    RootOutOfBounds { root: GeneIndex, len: usize },
    #[error("Child index {child} of record {parent} out of bounds for genome of length {len}")]
    ChildOutOfBounds {
        parent: GeneIndex,
        child: GeneIndex,
        len: usize,
    },
    #[error("Cycle: record {parent} references its ancestor {child}")]
    Cycle { parent: GeneIndex, child: GeneIndex },
    #[error("Record {child} referenced by {parent} was already reached through another parent")]
    SharedChild { parent: GeneIndex, child: GeneIndex },
    #[error("Record {at} lies deeper than the depth limit {limit}")]
    DepthExceeded { limit: usize, at: GeneIndex },
    #[error("Record {index} is not reachable from any root")]
    Unreachable { index: GeneIndex },
    #[error("Non-empty genome without a root")]
    NoRoot,
}
