// File: fairway-router/src/path/ancestry.rs
// Purpose: Lazy iterator over a node's ancestor chain

use crate::{NodeId, RouteTree};

/// Lazy iterator over the ancestor chain of a route node.
///
/// For a node at `/internal/proposal/:proposal_id`, yields the node itself,
/// then `proposal`, then `internal`, then the root. Parent links are stored
/// arena indices, so the walk is zero-allocation and stops as soon as a
/// caller's `find`/`any` is satisfied.
///
/// # Examples
///
/// ```
/// use fairway_router::{RouteDecl, RouteTree};
///
/// let tree = RouteTree::build(vec![
///     RouteDecl::new("proposal").child(RouteDecl::new(":proposal_id").named("draft_proposal")),
/// ])
/// .unwrap();
///
/// let leaf = tree.find_by_name("draft_proposal").unwrap();
/// // leaf, "proposal" group, root
/// assert_eq!(tree.ancestry(leaf).count(), 3);
/// ```
#[derive(Clone)]
pub struct Ancestry<'a> {
    tree: &'a RouteTree,
    current: Option<NodeId>,
}

impl<'a> Ancestry<'a> {
    pub(crate) fn new(tree: &'a RouteTree, start: NodeId) -> Self {
        Self {
            tree,
            current: Some(start),
        }
    }
}

impl Iterator for Ancestry<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.tree.node(current).parent();
        Some(current)
    }
}
