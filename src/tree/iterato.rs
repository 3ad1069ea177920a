//! Traversal iterators over a [`TreeNode`] subtree.
//!
//! Each iterator yields every node of the subtree exactly once, by reference, so its
//! output is a complete flattening suitable as encoder input.

use std::collections::VecDeque;

use super::TreeNode;

// --- Preorder Iterator ---

/// A pre–order DFS iterator state.
pub struct PreorderIter<'a, A> {
    /// Stack for DFS traversal. Stores nodes to visit.
    stack: Vec<&'a TreeNode<A>>,
}

impl<A> Clone for PreorderIter<'_, A> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, A> PreorderIter<'a, A> {
    /// Create a new pre-order iterator starting at `start`.
    pub fn new(start: &'a TreeNode<A>) -> Self {
        PreorderIter { stack: vec![start] }
    }
}

impl<'a, A> Iterator for PreorderIter<'a, A> {
    type Item = &'a TreeNode<A>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        // Push children in reverse order so the first child is processed next
        self.stack.extend(node.children.iter().rev());

        Some(node)
    }
}

// --- BFS Iterator ---

/// A Breadth-First Search (BFS) iterator state.
pub struct BfsIter<'a, A> {
    queue: VecDeque<&'a TreeNode<A>>,
}

impl<A> Clone for BfsIter<'_, A> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<'a, A> BfsIter<'a, A> {
    /// Create a new BFS iterator starting at `start`.
    pub fn new(start: &'a TreeNode<A>) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(start);
        BfsIter { queue }
    }
}

impl<'a, A> Iterator for BfsIter<'a, A> {
    type Item = &'a TreeNode<A>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children.iter());
        Some(node)
    }
}

// --- Postorder Iterator ---

/// A post–order DFS iterator state.
pub struct PostorderIter<'a, A> {
    /// Nodes paired with whether their children were already pushed.
    stack: Vec<(&'a TreeNode<A>, bool)>,
}

impl<A> Clone for PostorderIter<'_, A> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, A> PostorderIter<'a, A> {
    /// Create a new post-order iterator starting at `start`.
    pub fn new(start: &'a TreeNode<A>) -> Self {
        PostorderIter {
            stack: vec![(start, false)],
        }
    }
}

impl<'a, A> Iterator for PostorderIter<'a, A> {
    type Item = &'a TreeNode<A>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded || node.is_leaf() {
                return Some(node);
            }
            self.stack.push((node, true));
            self.stack
                .extend(node.children.iter().rev().map(|c| (c, false)));
        }
    }
}
