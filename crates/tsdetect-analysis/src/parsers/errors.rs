//! Syntax error and nesting discovery in tree-sitter trees.
//!
//! Both walks run on a `TreeCursor` so that arbitrarily deep trees cannot
//! exhaust the stack before they are rejected.

use tree_sitter::Node;

/// Deepest nesting the lowering pass accepts. Lowering and the detector
/// visitors recurse once per level.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Count ERROR and MISSING nodes in a tree-sitter tree.
pub fn count_errors(root: Node) -> u32 {
    let mut count = 0u32;
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            count += 1;
        }
        // clean subtrees hold no errors
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return count;
            }
        }
    }
}

/// Number of levels below `root`; a leaf root has depth 0.
pub fn max_depth(root: Node) -> usize {
    let mut cursor = root.walk();
    let mut depth = 0usize;
    let mut deepest = 0usize;
    loop {
        if cursor.goto_first_child() {
            depth += 1;
            deepest = deepest.max(depth);
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return deepest;
            }
            depth -= 1;
        }
    }
}
