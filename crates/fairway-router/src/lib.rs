//! # Fairway Router
//!
//! Hierarchical route resolution for client-side portals:
//! - nested route declarations with static (`vessels`), dynamic
//!   (`:proposal_id`), catch-all (`*rest`), and default (empty-path index)
//!   segments
//! - a compiled, immutable [`RouteTree`] with arena storage and parent
//!   back-references
//! - deterministic top-down matching into a [`MatchedChain`] (root-to-leaf
//!   node sequence plus extracted parameters)
//! - reverse resolution from a route name and parameter set back to a
//!   concrete path
//!
//! Matching precedence at every level: an exact static literal always beats
//! a dynamic sibling, regardless of declaration order; among dynamic
//! candidates declaration order decides; catch-alls come last. A default
//! child matches only when no input remains at its level.
//!
//! ## Example
//!
//! ```
//! use fairway_router::{RouteDecl, RouteTree};
//!
//! let tree = RouteTree::build(vec![RouteDecl::new("proposal")
//!     .child(RouteDecl::index().named("apply_proposal"))
//!     .child(RouteDecl::new("submit").named("submit_proposal"))
//!     .child(RouteDecl::new(":proposal_id").named("draft_proposal"))])
//! .unwrap();
//!
//! // The literal wins over the dynamic sibling.
//! let chain = tree.match_path("/proposal/submit").unwrap();
//! assert_eq!(tree.node(chain.leaf().node).name(), Some("submit_proposal"));
//!
//! let chain = tree.match_path("/proposal/42").unwrap();
//! assert_eq!(chain.param("proposal_id"), Some("42"));
//!
//! // Reverse resolution is the exact inverse.
//! let params = std::iter::once(("proposal_id".to_string(), "42".to_string())).collect();
//! assert_eq!(tree.resolve_named("draft_proposal", &params).unwrap(), "/proposal/42");
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

mod component;
mod decl;
mod error;
mod segment;
pub mod path;

pub use component::{Component, ComponentLoader, ComponentRef};
pub use decl::{BlueprintSet, RouteBlueprint, RouteDecl, RouterConfig};
pub use error::{CompileError, ResolveError, RouteNotFound};
pub use path::Ancestry;
pub use segment::{classify_segment, SegmentPattern};

/// Parameter bindings extracted by a match: dynamic-segment name to the
/// literal captured at that position. Never mutated after matching.
pub type Params = HashMap<String, String>;

/// Arena index of a route node. Stable for the lifetime of its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    fn index(self) -> usize {
        self.0
    }
}

/// One entry in the compiled route tree.
#[derive(Debug)]
pub struct RouteNode {
    pattern: Vec<SegmentPattern>,
    name: Option<String>,
    component: ComponentRef,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl RouteNode {
    /// The declared segment patterns of this node, in order. Empty for the
    /// root and for default (index) children.
    pub fn pattern(&self) -> &[SegmentPattern] {
        &self.pattern
    }

    /// The route name, if this node is a reverse-resolution target.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The component handle rendered at this nesting level.
    pub fn component(&self) -> &ComponentRef {
        &self.component
    }

    /// Child nodes in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent back-reference; `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether this is a default (empty-path index) child.
    pub fn is_default(&self) -> bool {
        self.pattern.is_empty() && self.parent.is_some()
    }
}

/// One matched level: the node, the parameters bound while consuming its
/// pattern, and the consumed portion of the requested path.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedNode {
    pub node: NodeId,
    pub params: Params,
    pub consumed: String,
}

/// Result of resolving one path: the root-to-leaf sequence of matched
/// nodes. Every visited node joins the chain, pass-through placeholders
/// included, because each contributes a nesting level to the rendered view.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedChain {
    nodes: Vec<MatchedNode>,
    path: String,
}

impl MatchedChain {
    /// Matched levels from root to leaf. Never empty: the root is always
    /// the first entry.
    pub fn nodes(&self) -> &[MatchedNode] {
        &self.nodes
    }

    /// The deepest matched level.
    pub fn leaf(&self) -> &MatchedNode {
        self.nodes.last().expect("chain always contains the root")
    }

    /// Number of levels in the chain.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A chain always contains at least the root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The normalized requested path this chain was resolved from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All parameter bindings, merged across levels.
    pub fn params(&self) -> Params {
        let mut merged = Params::new();
        for level in &self.nodes {
            merged.extend(level.params.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Looks up one bound parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.nodes
            .iter()
            .find_map(|level| level.params.get(name))
            .map(String::as_str)
    }

    /// Length of the longest common prefix of identical nodes with
    /// identical parameter bindings. The commit diff reuses exactly this
    /// prefix of mounted levels.
    pub fn common_prefix_len(&self, other: &MatchedChain) -> usize {
        self.nodes
            .iter()
            .zip(&other.nodes)
            .take_while(|(a, b)| a.node == b.node && a.params == b.params)
            .count()
    }
}

/// Immutable compiled representation of the nested route declarations.
///
/// Nodes live in an arena (`Vec` indexed by [`NodeId`]); parent links are
/// stored indices, never owning references. Built once at startup,
/// read-only afterwards, cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
    names: HashMap<String, NodeId>,
    config: RouterConfig,
}

impl RouteTree {
    /// Compiles a declaration list with default configuration.
    pub fn build(decls: Vec<RouteDecl>) -> Result<Self, CompileError> {
        Self::build_with_config(decls, RouterConfig::default())
    }

    /// Compiles a declaration list.
    ///
    /// Validation is eager: duplicate route names, identical static
    /// siblings, duplicate default children, and catch-alls with children
    /// all fail here rather than at match time.
    pub fn build_with_config(
        decls: Vec<RouteDecl>,
        config: RouterConfig,
    ) -> Result<Self, CompileError> {
        if decls.is_empty() {
            return Err(CompileError::EmptyTree);
        }

        let root = RouteNode {
            pattern: Vec::new(),
            name: None,
            component: ComponentRef::Passthrough,
            children: Vec::new(),
            parent: None,
        };
        let mut tree = Self {
            nodes: vec![root],
            names: HashMap::new(),
            config,
        };

        for decl in decls {
            tree.insert(decl, NodeId(0))?;
        }
        tree.check_siblings(NodeId(0))?;

        debug!(
            nodes = tree.nodes.len(),
            named = tree.names.len(),
            "route tree compiled"
        );
        Ok(tree)
    }

    /// The (synthetic, pass-through) root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrows a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different tree.
    pub fn node(&self, id: NodeId) -> &RouteNode {
        &self.nodes[id.index()]
    }

    /// Number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Reverse index lookup: route name to node.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// The active matcher configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Iterates from `id` up to the root along parent links.
    pub fn ancestry(&self, id: NodeId) -> Ancestry<'_> {
        Ancestry::new(self, id)
    }

    /// The normalized full pattern path of a node, dynamic segments shown
    /// as declared (`/proposal/:proposal_id`).
    pub fn full_path(&self, id: NodeId) -> String {
        let mut parts: Vec<String> = Vec::new();
        for node_id in self.ancestry(id) {
            for seg in self.node(node_id).pattern().iter().rev() {
                parts.push(seg.to_string());
            }
        }
        if parts.is_empty() {
            "/".to_string()
        } else {
            parts.reverse();
            format!("/{}", parts.join("/"))
        }
    }

    // ------------------------------------------------------------------
    // Compilation
    // ------------------------------------------------------------------

    fn insert(&mut self, decl: RouteDecl, parent: NodeId) -> Result<NodeId, CompileError> {
        let mut pattern = Vec::new();
        for raw in path::segments(&decl.path) {
            pattern.push(classify_segment(raw, &decl.path)?);
        }

        if let Some(pos) = pattern
            .iter()
            .position(|seg| matches!(seg, SegmentPattern::CatchAll(_)))
        {
            let name = pattern[pos]
                .param_name()
                .unwrap_or_default()
                .to_string();
            if pos + 1 != pattern.len() {
                return Err(CompileError::InvalidSegment {
                    segment: format!("*{name}"),
                    path: decl.path.clone(),
                    reason: "catch-all must be the last segment".to_string(),
                });
            }
            if !decl.children.is_empty() {
                return Err(CompileError::CatchAllWithChildren(name));
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(RouteNode {
            pattern,
            name: decl.name.clone(),
            component: decl.component,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.index()].children.push(id);

        if let Some(name) = decl.name {
            if self.names.insert(name.clone(), id).is_some() {
                return Err(CompileError::DuplicateRouteName(name));
            }
        }

        for child in decl.children {
            self.insert(child, id)?;
        }
        self.check_siblings(id)?;
        Ok(id)
    }

    fn check_siblings(&self, parent: NodeId) -> Result<(), CompileError> {
        let children = self.node(parent).children();

        let defaults = children
            .iter()
            .filter(|&&c| self.node(c).pattern().is_empty())
            .count();
        if defaults > 1 {
            return Err(CompileError::AmbiguousDefaultChild(self.full_path(parent)));
        }

        for (i, &a) in children.iter().enumerate() {
            for &b in &children[i + 1..] {
                if self.statically_identical(a, b) {
                    return Err(CompileError::AmbiguousStaticSibling {
                        literal: self
                            .node(a)
                            .pattern()
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("/"),
                        parent: self.full_path(parent),
                    });
                }
            }
        }
        Ok(())
    }

    /// Two siblings are ambiguous when their patterns are all-static and
    /// segment-for-segment equal; dynamic overlap is legal and resolved by
    /// declaration order.
    fn statically_identical(&self, a: NodeId, b: NodeId) -> bool {
        let (pa, pb) = (self.node(a).pattern(), self.node(b).pattern());
        if pa.is_empty() || pa.len() != pb.len() {
            return false;
        }
        pa.iter().zip(pb).all(|(x, y)| match (x, y) {
            (SegmentPattern::Static(l), SegmentPattern::Static(r)) => self.literal_eq(l, r),
            _ => false,
        })
    }

    // ------------------------------------------------------------------
    // Matching
    // ------------------------------------------------------------------

    /// Matches a requested path against the tree.
    ///
    /// Returns the root-to-leaf [`MatchedChain`], or [`RouteNotFound`] when
    /// input remains that no child can consume. Matching is synchronous,
    /// deterministic, and total over valid paths: for a fixed tree and path
    /// the same chain always comes back.
    pub fn match_path(&self, requested: &str) -> Result<MatchedChain, RouteNotFound> {
        let normalized = path::normalize(requested);
        let mut rel: &str = &normalized;
        if let Some(base) = &self.config.base_path {
            let base = base.trim_end_matches('/');
            if !base.is_empty() {
                match rel.strip_prefix(base) {
                    Some("") => rel = "/",
                    // Only strip at a segment boundary: `/app` must not
                    // truncate `/application`.
                    Some(stripped) if stripped.starts_with('/') => rel = stripped,
                    _ => {}
                }
            }
        }

        let input: Vec<&str> = path::segments(rel).collect();
        match self.descend(self.root(), &input) {
            Some(tail) => {
                let mut nodes = vec![MatchedNode {
                    node: self.root(),
                    params: Params::new(),
                    consumed: String::new(),
                }];
                nodes.extend(tail);
                trace!(path = %normalized, depth = nodes.len(), "path matched");
                Ok(MatchedChain {
                    nodes,
                    path: normalized.into_owned(),
                })
            }
            None => {
                trace!(path = %normalized, "no matching chain");
                Err(RouteNotFound {
                    requested: normalized.into_owned(),
                })
            }
        }
    }

    /// Walks one node: consumes the remaining input against its children
    /// and returns the chain tail below `node`, or `None` if unconsumed
    /// input remains.
    fn descend(&self, node: NodeId, input: &[&str]) -> Option<Vec<MatchedNode>> {
        if input.is_empty() {
            // Exhausted input: fall into the default child if there is one,
            // otherwise the current node is the terminus.
            let default = self
                .node(node)
                .children()
                .iter()
                .copied()
                .find(|&c| self.node(c).pattern().is_empty());
            return Some(match default {
                Some(def) => {
                    let mut chain = vec![MatchedNode {
                        node: def,
                        params: Params::new(),
                        consumed: String::new(),
                    }];
                    if let Some(rest) = self.descend(def, input) {
                        chain.extend(rest);
                    }
                    chain
                }
                None => Vec::new(),
            });
        }

        // Candidates in precedence order; a candidate whose own pattern
        // consumes a prefix but whose subtree rejects the rest yields to
        // the next one (`access` vs `access/:access_id` siblings).
        for child in self.candidates(node, input) {
            if let Some((params, used)) = self.consume(child, input) {
                if let Some(rest) = self.descend(child, &input[used..]) {
                    let mut chain = vec![MatchedNode {
                        node: child,
                        params,
                        consumed: input[..used].join("/"),
                    }];
                    chain.extend(rest);
                    return Some(chain);
                }
            }
        }
        None
    }

    /// Children able to start consuming `input`, ranked: exact static
    /// first, then dynamic, then catch-all; declaration order within each
    /// class. Default children are excluded (they need exhausted input).
    fn candidates(&self, node: NodeId, input: &[&str]) -> Vec<NodeId> {
        let head = input[0];
        let mut ranked: Vec<(u8, usize, NodeId)> = Vec::new();
        for (order, &child) in self.node(node).children().iter().enumerate() {
            let class = match self.node(child).pattern().first() {
                None => continue,
                Some(SegmentPattern::Static(lit)) => {
                    if self.literal_eq(lit, head) {
                        0
                    } else {
                        continue;
                    }
                }
                Some(SegmentPattern::Param(_)) => 1,
                Some(SegmentPattern::CatchAll(_)) => 2,
            };
            ranked.push((class, order, child));
        }
        ranked.sort_by_key(|&(class, order, _)| (class, order));
        ranked.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Consumes a child's whole pattern against the input prefix, binding
    /// parameters. Returns the bindings and the number of segments used.
    fn consume(&self, child: NodeId, input: &[&str]) -> Option<(Params, usize)> {
        let mut params = Params::new();
        let mut used = 0;
        for seg in self.node(child).pattern() {
            match seg {
                SegmentPattern::Static(lit) => {
                    if used >= input.len() || !self.literal_eq(lit, input[used]) {
                        return None;
                    }
                    used += 1;
                }
                SegmentPattern::Param(name) => {
                    if used >= input.len() {
                        return None;
                    }
                    params.insert(name.clone(), input[used].to_string());
                    used += 1;
                }
                SegmentPattern::CatchAll(name) => {
                    if used >= input.len() {
                        return None;
                    }
                    params.insert(name.clone(), input[used..].join("/"));
                    used = input.len();
                }
            }
        }
        Some((params, used))
    }

    fn literal_eq(&self, declared: &str, requested: &str) -> bool {
        if self.config.case_insensitive {
            declared.eq_ignore_ascii_case(requested)
        } else {
            declared == requested
        }
    }

    // ------------------------------------------------------------------
    // Reverse resolution
    // ------------------------------------------------------------------

    /// Synthesizes the concrete path of a named node.
    ///
    /// Walks root-to-node along parent links: literals pass through,
    /// dynamic segments substitute from `params`. The exact inverse of
    /// [`Self::match_path`]: matching the resolved path yields a chain
    /// whose leaf is the named node with the same bindings.
    pub fn resolve_named(&self, name: &str, params: &Params) -> Result<String, ResolveError> {
        let id = self
            .find_by_name(name)
            .ok_or_else(|| ResolveError::UnknownRouteName(name.to_string()))?;

        let mut ids: Vec<NodeId> = self.ancestry(id).collect();
        ids.reverse();

        let mut parts: Vec<String> = Vec::new();
        for node_id in ids {
            for seg in self.node(node_id).pattern() {
                match seg {
                    SegmentPattern::Static(lit) => parts.push(lit.clone()),
                    SegmentPattern::Param(p) | SegmentPattern::CatchAll(p) => {
                        let value = params
                            .get(p)
                            .ok_or_else(|| ResolveError::MissingParam(p.clone()))?;
                        parts.push(value.clone());
                    }
                }
            }
        }

        let joined = parts.join("/");
        let rel = if joined.is_empty() {
            "/".to_string()
        } else {
            format!("/{joined}")
        };
        Ok(match &self.config.base_path {
            Some(base) => {
                let base = base.trim_end_matches('/');
                if base.is_empty() {
                    rel
                } else {
                    format!("{base}{rel}")
                }
            }
            None => rel,
        })
    }
}
