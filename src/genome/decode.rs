//! Reconstruction of [`TreeNode`]s from a [`Genome`].
//!
//! Two variants are offered:
//!
//! *   [`decode_unchecked`]: plain recursive expansion of child references. For genomes known
//!     to be well-formed, typically ones just produced by [`super::encode::encode`]. An
//!     out-of-range index panics, a reachable cycle recurses until the stack overflows, and a
//!     record shared by two parents is expanded twice.
//! *   [`decode`] / [`decode_with`]: first runs [`validate`], then builds the tree with an
//!     explicit worklist. Never recurses, so any depth the validator accepts can be decoded.
//!
//! Every call returns a freshly built tree that shares nothing with the genome or with the
//! output of any other call.

use bitvec::vec::BitVec;

use crate::tree::TreeNode;

use super::{error::DecodeError, GeneIndex, Genome};

/// Limits applied by the validating decoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeOptions {
    /// Maximum number of levels, counting the root as level 1. `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Recursively expands the record at `root` into a tree.
///
/// # Panics
///
/// If `root` or any reachable child index is out of bounds. A cycle reachable from `root`
/// overflows the stack. Use [`decode`] for genomes that are not known to be well-formed.
pub fn decode_unchecked<A: Clone>(genome: &Genome<A>, root: GeneIndex) -> TreeNode<A> {
    let record = &genome[root];
    TreeNode::with_children(
        record.allele.clone(),
        record
            .child_indices
            .iter()
            .map(|&c| decode_unchecked(genome, c))
            .collect(),
    )
}

/// Checks that the records reachable from `root` form a tree.
///
/// The walk reports the first of: `root` out of bounds, a child index out of bounds, a
/// reference back to an ancestor (cycle), a record reached through a second parent.
pub fn validate<A>(genome: &Genome<A>, root: GeneIndex) -> Result<(), DecodeError> {
    validate_with(genome, root, &DecodeOptions::default())
}

/// [`validate`] with a depth limit taken from `options`.
pub fn validate_with<A>(
    genome: &Genome<A>,
    root: GeneIndex,
    options: &DecodeOptions,
) -> Result<(), DecodeError> {
    walk(genome, root, options, &mut Marks::new(genome.len())).map(|_| ())
}

/// Validating, stack-safe decode with default options.
pub fn decode<A: Clone>(genome: &Genome<A>, root: GeneIndex) -> Result<TreeNode<A>, DecodeError> {
    decode_with(genome, root, &DecodeOptions::default())
}

pub fn decode_with<A: Clone>(
    genome: &Genome<A>,
    root: GeneIndex,
    options: &DecodeOptions,
) -> Result<TreeNode<A>, DecodeError> {
    log::debug!(
        "decoding from root {root} of a genome with {} records",
        genome.len()
    );
    let order = walk(genome, root, options, &mut Marks::new(genome.len()))?;
    Ok(build(genome, &order))
}

/// Decodes every tree of a genome, one per entry of [`Genome::roots`], in ascending root order.
///
/// The trees must be disjoint: a record reachable from two roots is a
/// [`DecodeError::SharedChild`]. Every record must belong to some tree; records only reachable
/// from each other (a detached cycle) are reported as [`DecodeError::Unreachable`].
pub fn decode_forest<A: Clone>(genome: &Genome<A>) -> Result<Vec<TreeNode<A>>, DecodeError> {
    decode_forest_with(genome, &DecodeOptions::default())
}

pub fn decode_forest_with<A: Clone>(
    genome: &Genome<A>,
    options: &DecodeOptions,
) -> Result<Vec<TreeNode<A>>, DecodeError> {
    if genome.is_empty() {
        return Ok(Vec::new());
    }
    let roots = genome.roots();
    if roots.is_empty() {
        log::warn!("genome of {} records has no root", genome.len());
        return Err(DecodeError::NoRoot);
    }
    log::debug!("decoding forest of {} trees", roots.len());

    let mut marks = Marks::new(genome.len());
    let orders = roots
        .iter()
        .map(|&root| walk(genome, root, options, &mut marks))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(index) = marks.visited.iter_zeros().next() {
        let err = DecodeError::Unreachable {
            index: GeneIndex(index),
        };
        log::warn!("{err}");
        return Err(err);
    }

    Ok(orders.iter().map(|order| build(genome, order)).collect())
}

/// Per-record marks of a walk, one bit per record of the genome.
///
/// `visited` accumulates across walks so that several roots can be checked for disjointness.
/// `on_path` holds the records between the root and the current one, and is all clear again
/// after every successful walk.
struct Marks {
    visited: BitVec,
    on_path: BitVec,
}

impl Marks {
    fn new(len: usize) -> Self {
        Marks {
            visited: BitVec::repeat(false, len),
            on_path: BitVec::repeat(false, len),
        }
    }
}

/// Iterative DFS over the records reachable from `root`, returning them in pre-order.
fn walk<A>(
    genome: &Genome<A>,
    root: GeneIndex,
    options: &DecodeOptions,
    marks: &mut Marks,
) -> Result<Vec<GeneIndex>, DecodeError> {
    walk_tree(genome, root, options, marks).inspect_err(|e| log::warn!("genome rejected: {e}"))
}

fn walk_tree<A>(
    genome: &Genome<A>,
    root: GeneIndex,
    options: &DecodeOptions,
    marks: &mut Marks,
) -> Result<Vec<GeneIndex>, DecodeError> {
    let Marks { visited, on_path } = marks;
    let len = genome.len();
    if root.0 >= len {
        return Err(DecodeError::RootOutOfBounds { root, len });
    }
    if visited[root.0] {
        return Err(DecodeError::SharedChild {
            parent: root,
            child: root,
        });
    }
    if options.max_depth == Some(0) {
        return Err(DecodeError::DepthExceeded { limit: 0, at: root });
    }

    let mut order = vec![root];
    // (record, position of the next child to look at)
    let mut stack = vec![(root, 0)];
    visited.set(root.0, true);
    on_path.set(root.0, true);

    while let Some(frame) = stack.last_mut() {
        let parent = frame.0;
        let Some(child) = genome[parent].child_at(frame.1) else {
            on_path.set(parent.0, false);
            stack.pop();
            continue;
        };
        frame.1 += 1;

        if child.0 >= len {
            return Err(DecodeError::ChildOutOfBounds { parent, child, len });
        }
        if on_path[child.0] {
            return Err(DecodeError::Cycle { parent, child });
        }
        if visited[child.0] {
            return Err(DecodeError::SharedChild { parent, child });
        }
        if let Some(limit) = options.max_depth {
            if stack.len() >= limit {
                return Err(DecodeError::DepthExceeded { limit, at: child });
            }
        }

        visited.set(child.0, true);
        on_path.set(child.0, true);
        order.push(child);
        stack.push((child, 0));
    }
    Ok(order)
}

/// Builds the tree from a validated pre-order listing of its records.
///
/// Records are processed in reverse pre-order, so by the time a record is reached its children
/// sit on top of `done`: the first child on top, the last one deepest.
fn build<A: Clone>(genome: &Genome<A>, order: &[GeneIndex]) -> TreeNode<A> {
    let mut done: Vec<TreeNode<A>> = Vec::new();
    for &index in order.iter().rev() {
        let record = &genome[index];
        let mut children = done.split_off(done.len() - record.child_count());
        children.reverse();
        done.push(TreeNode::with_children(record.allele.clone(), children));
        log::trace!("built record {index}");
    }
    debug_assert_eq!(done.len(), 1);
    done.pop().expect("a validated walk yields exactly one tree")
}
