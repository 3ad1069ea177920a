//! An owned, ordered, rooted tree.
//!
//! [`TreeNode<A>`] owns its value and an ordered `Vec` of child nodes. The position of a
//! child in that `Vec` is part of the structure: two trees with the same children in a
//! different order are different trees.
//!
//! There is no parent pointer. Upward navigation, where needed, is the job of the caller.
//!
//! Two notions of sameness are in play and must not be confused:
//! *   Structural equality (`==`): same value at every node and same child order.
//! *   Identity ([`TreeNode::ptr_eq`]): the very same node instance. This is what the
//!     [`crate::genome`] encoder keys on, since distinct nodes may carry equal values.
//!
//! The traversal iterators in [`iterato`] produce the flattenings that the encoder consumes.

use std::fmt::{self, Display, Write};

use iterato::{BfsIter, PostorderIter, PreorderIter};

pub mod iterato;

/// A node of an ordered tree, owning its value and its children.
///
/// Dropping and `==` walk the tree with an explicit stack and handle any depth. `Clone`,
/// `Hash`, `Ord`, [`map_ref`](Self::map_ref) and the [`Display`]/[`debug_draw`](Self::debug_draw)
/// renderings recurse once per level, so on very deep trees (a chain of a few hundred thousand
/// nodes) they overflow the stack.
#[derive(Clone, Debug, Eq, Hash, PartialOrd, Ord)]
#[allow(clippy::derived_hash_with_manual_eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct TreeNode<A> {
    pub(crate) value: A,
    pub(crate) children: Vec<TreeNode<A>>,
}

impl<A> TreeNode<A> {
    /// Creates a leaf.
    pub fn new(value: A) -> Self {
        TreeNode {
            value,
            children: Vec::new(),
        }
    }

    pub fn with_children(value: A, children: Vec<TreeNode<A>>) -> Self {
        TreeNode { value, children }
    }

    pub fn value(&self) -> &A {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut A {
        &mut self.value
    }

    /// Replaces the value of this node, leaving the structure untouched. Returns the old value.
    pub fn set_value(&mut self, value: A) -> A {
        std::mem::replace(&mut self.value, value)
    }

    pub fn children(&self) -> &[TreeNode<A>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<TreeNode<A>> {
        &mut self.children
    }

    pub fn child(&self, i: usize) -> Option<&TreeNode<A>> {
        self.children.get(i)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Adds `node` as the *last* child and returns a handle to it.
    pub fn add_child(&mut self, node: TreeNode<A>) -> &mut TreeNode<A> {
        self.children.push(node);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Adds a new leaf holding `value` as the last child.
    pub fn push(&mut self, value: A) -> &mut TreeNode<A> {
        self.add_child(TreeNode::new(value))
    }

    /// Detaches and returns all children of this node.
    pub fn take_children(&mut self) -> Vec<TreeNode<A>> {
        std::mem::take(&mut self.children)
    }

    /// Instance identity, as opposed to the structural `==`.
    pub fn ptr_eq(a: &TreeNode<A>, b: &TreeNode<A>) -> bool {
        std::ptr::eq(a, b)
    }

    /// Number of nodes in the subtree rooted here, including this node.
    pub fn size(&self) -> usize {
        self.iter_preorder().count()
    }

    /// Number of levels of the subtree rooted here. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Returns a pre-order DFS iterator over this subtree.
    pub fn iter_preorder(&self) -> PreorderIter<'_, A> {
        PreorderIter::new(self)
    }

    /// Returns a BFS (level order) iterator over this subtree.
    pub fn iter_bfs(&self) -> BfsIter<'_, A> {
        BfsIter::new(self)
    }

    /// Returns a post-order DFS iterator over this subtree; the root comes last.
    pub fn iter_postorder(&self) -> PostorderIter<'_, A> {
        PostorderIter::new(self)
    }

    /// Builds a tree of the same shape with every value transformed by `transform`.
    pub fn map_ref<F, U>(&self, mut transform: F) -> TreeNode<U>
    where
        F: FnMut(&A) -> U,
    {
        self.map_ref_inner(&mut transform)
    }

    fn map_ref_inner<F, U>(&self, transform: &mut F) -> TreeNode<U>
    where
        F: FnMut(&A) -> U,
    {
        TreeNode {
            value: transform(&self.value),
            children: self
                .children
                .iter()
                .map(|c| c.map_ref_inner(transform))
                .collect(),
        }
    }

    /// Renders the tree, one node per line, with box-drawing connectors.
    pub fn debug_draw(&self, mut node_display: impl FnMut(&A) -> String) -> String {
        let mut output = String::new();
        let _ = self.write_tree(&mut output, &mut node_display);
        output
    }

    fn write_tree<W: Write>(
        &self,
        f: &mut W,
        node_display: &mut impl FnMut(&A) -> String,
    ) -> fmt::Result {
        fn draw_subtree_recursive<W: Write, A>(
            f: &mut W,
            node: &TreeNode<A>,
            prefix: &str,
            node_display: &mut impl FnMut(&A) -> String,
        ) -> fmt::Result {
            let num_children = node.children.len();
            for (i, child) in node.children.iter().enumerate() {
                let is_last_child = i + 1 == num_children;
                let connector = if is_last_child {
                    "└── "
                } else {
                    "├── "
                };
                write!(f, "\n{prefix}{connector}{}", node_display(&child.value))?;

                let child_prefix =
                    format!("{}{}", prefix, if is_last_child { "    " } else { "│   " });
                draw_subtree_recursive(f, child, &child_prefix, node_display)?;
            }
            Ok(())
        }

        write!(f, "{}", node_display(&self.value))?;
        draw_subtree_recursive(f, self, "", node_display)
    }
}

impl<A: Display> Display for TreeNode<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, &mut |v: &A| v.to_string())
    }
}

impl<A> From<A> for TreeNode<A> {
    fn from(value: A) -> Self {
        TreeNode::new(value)
    }
}

impl<A: PartialEq> PartialEq for TreeNode<A> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.value != b.value || a.children.len() != b.children.len() {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

// Decoded trees can be arbitrarily deep, so dropping must not recurse.
impl<A> Drop for TreeNode<A> {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod test;
