// File: fairway-nav/src/composer.rs
// Purpose: Nested viewport composition with common-prefix reuse

use std::sync::Arc;

use fairway_router::{Component, MatchedChain, NodeId, Params};

/// One mounted viewport level. `component` is `None` for pass-through
/// placeholders, which render a transparent container only.
struct Level {
    node: NodeId,
    params: Params,
    component: Option<Arc<dyn Component>>,
}

/// Renders a matched chain as nested viewport containers.
///
/// Each non-leaf level renders its own component (or a transparent
/// container if it has none) with an embedded placeholder the next level
/// fills; the leaf terminates the chain. On every commit only the
/// divergent suffix changes: the longest prefix of levels with identical
/// node and parameter bindings keeps its mounted component instances
/// untouched.
pub struct ViewComposer {
    levels: Vec<Level>,
}

impl ViewComposer {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Number of currently mounted levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Applies a resolved chain to the mounted view tree.
    ///
    /// `resolved` runs parallel to `chain.nodes()`: the loaded component
    /// for each level, `None` for pass-through placeholders. The divergent
    /// suffix is unmounted leaf-to-root before the replacement mounts
    /// root-to-leaf, so a parent is never torn down while a child it hosts
    /// a viewport for is still live.
    pub fn apply(&mut self, chain: &MatchedChain, resolved: &[Option<Arc<dyn Component>>]) {
        let keep = self
            .levels
            .iter()
            .zip(chain.nodes())
            .take_while(|(level, new)| level.node == new.node && level.params == new.params)
            .count();

        for level in self.levels.drain(keep..).rev() {
            if let Some(component) = &level.component {
                component.on_unmount();
            }
        }

        for (new, component) in chain.nodes().iter().zip(resolved).skip(keep) {
            if let Some(component) = component {
                component.on_mount();
            }
            self.levels.push(Level {
                node: new.node,
                params: new.params.clone(),
                component: component.clone(),
            });
        }
    }

    /// Nested container outline of the mounted view, root wrapping leaf:
    /// `viewport(viewport(ProposalSubmit))`. Pass-through levels print as
    /// `viewport`.
    pub fn render_outline(&self) -> String {
        self.levels.iter().rev().fold(String::new(), |inner, level| {
            let label = level
                .component
                .as_ref()
                .map(|c| c.label())
                .unwrap_or("viewport");
            if inner.is_empty() {
                label.to_string()
            } else {
                format!("{label}({inner})")
            }
        })
    }
}

impl Default for ViewComposer {
    fn default() -> Self {
        Self::new()
    }
}
