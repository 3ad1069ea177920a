use super::TreeNode;

/// root(1) -> [A(2), B(3) -> [C(4)]]
fn small_tree() -> TreeNode<i32> {
    let mut root = TreeNode::new(1);
    root.push(2);
    root.push(3).push(4);
    root
}

fn values<'a>(nodes: impl Iterator<Item = &'a TreeNode<i32>>) -> Vec<i32> {
    nodes.map(|n| *n.value()).collect()
}

#[test]
fn traversals() {
    let tree = small_tree();

    assert_eq!(values(tree.iter_preorder()), vec![1, 2, 3, 4]);
    assert_eq!(values(tree.iter_bfs()), vec![1, 2, 3, 4]);
    assert_eq!(values(tree.iter_postorder()), vec![2, 4, 3, 1]);
}

#[test]
fn traversals_differ_on_wider_trees() {
    // 0 -> [1 -> [3, 4], 2 -> [5]]
    let tree = TreeNode::with_children(
        0,
        vec![
            TreeNode::with_children(1, vec![TreeNode::new(3), TreeNode::new(4)]),
            TreeNode::with_children(2, vec![TreeNode::new(5)]),
        ],
    );

    assert_eq!(values(tree.iter_preorder()), vec![0, 1, 3, 4, 2, 5]);
    assert_eq!(values(tree.iter_bfs()), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(values(tree.iter_postorder()), vec![3, 4, 1, 5, 2, 0]);
}

#[test]
fn size_and_depth() {
    let tree = small_tree();
    assert_eq!(tree.size(), 4);
    assert_eq!(tree.depth(), 3);

    let leaf = TreeNode::new('x');
    assert_eq!(leaf.size(), 1);
    assert_eq!(leaf.depth(), 1);
    assert!(leaf.is_leaf());
}

#[test]
fn identity_is_not_equality() {
    let tree = TreeNode::with_children(0, vec![TreeNode::new(7), TreeNode::new(7)]);
    let a = &tree.children()[0];
    let b = &tree.children()[1];

    assert_eq!(a, b);
    assert!(!TreeNode::ptr_eq(a, b));
    assert!(TreeNode::ptr_eq(a, tree.child(0).unwrap()));
}

#[test]
fn child_order_is_structural() {
    let ab = TreeNode::with_children(0, vec![TreeNode::new(1), TreeNode::new(2)]);
    let ba = TreeNode::with_children(0, vec![TreeNode::new(2), TreeNode::new(1)]);
    assert_ne!(ab, ba);
}

#[test]
fn set_value_keeps_structure() {
    let mut tree = small_tree();
    let old = tree.children_mut()[1].set_value(30);

    assert_eq!(old, 3);
    assert_eq!(values(tree.iter_preorder()), vec![1, 2, 30, 4]);
    assert_eq!(tree.child(1).unwrap().child_count(), 1);
}

#[test]
fn map_ref_keeps_shape() {
    let tree = small_tree();
    let mapped = tree.map_ref(|v| v.to_string());

    assert_eq!(mapped.child(1).unwrap().child(0).unwrap().value(), "4");
    assert_eq!(mapped.size(), tree.size());
}

#[test]
fn take_children_detaches() {
    let mut tree = small_tree();
    let children = tree.take_children();

    assert!(tree.is_leaf());
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].size(), 2);
}

#[test]
fn deep_tree_drops() {
    let mut tree = TreeNode::new(0u32);
    let mut cursor = &mut tree;
    for i in 1..200_000 {
        cursor = cursor.push(i);
    }
    assert_eq!(tree.depth(), 200_000);
}

fn chain(len: u32, last: u32) -> TreeNode<u32> {
    let mut tree = TreeNode::new(0u32);
    let mut cursor = &mut tree;
    for i in 1..len - 1 {
        cursor = cursor.push(i);
    }
    cursor.push(last);
    tree
}

#[test]
fn deep_trees_compare() {
    let a = chain(200_000, 7);
    let b = chain(200_000, 7);
    let c = chain(200_000, 8);
    assert!(a == b);
    assert!(a != c);
}

#[test]
fn equality_checks_child_count() {
    let mut a = TreeNode::new(1);
    a.push(2);
    let mut b = a.map_ref(|v| *v);
    b.push(3);
    assert_ne!(a, b);
    b.take_children();
    b.push(2);
    assert_eq!(a, b);
}

#[test]
fn display() {
    let tree = small_tree();
    insta::assert_snapshot!(tree.to_string(), @r"
    1
    ├── 2
    └── 3
        └── 4
    ");
}

#[test]
fn debug_draw_nested_prefixes() {
    // 0 -> [1 -> [3], 2]
    let tree = TreeNode::with_children(
        0,
        vec![
            TreeNode::with_children(1, vec![TreeNode::new(3)]),
            TreeNode::new(2),
        ],
    );
    insta::assert_snapshot!(tree.debug_draw(|v| format!("<{v}>")), @r"
    <0>
    ├── <1>
    │   └── <3>
    └── <2>
    ");
}
