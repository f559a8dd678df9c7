// File: fairway-router/src/component.rs
// Purpose: Capability-tagged component handles stored on route nodes

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

/// A renderable unit supplied by the embedding application.
///
/// The engine never inspects a component beyond these capabilities; any
/// concrete UI framework binds its own component type behind this trait.
pub trait Component: Send + Sync {
    /// Stable display label, used for view outlines and logging.
    fn label(&self) -> &str;

    /// Called when the component enters the mounted view tree.
    fn on_mount(&self) {}

    /// Called when the component leaves the mounted view tree.
    fn on_unmount(&self) {}
}

/// Asynchronous source for a lazily loaded component module.
///
/// Loading is the only suspension point of a navigation; a load that loses
/// the last-request-wins race still runs to completion, its result is just
/// discarded.
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    async fn load(&self) -> Arc<dyn Component>;
}

/// Capability-tagged handle carried by every route node.
#[derive(Clone, Default)]
pub enum ComponentRef {
    /// Transparent container that only hosts its matched child's viewport.
    ///
    /// Nesting groups in the observed route tables carry no content of
    /// their own; this variant generalizes them so the composer treats
    /// pass-through levels uniformly instead of special-casing per node.
    #[default]
    Passthrough,
    /// Eagerly available component.
    Ready(Arc<dyn Component>),
    /// Component resolved asynchronously on first navigation into the node.
    Lazy(Arc<dyn ComponentLoader>),
}

impl ComponentRef {
    /// Wraps an eagerly available component.
    pub fn ready(component: impl Component + 'static) -> Self {
        Self::Ready(Arc::new(component))
    }

    /// Wraps an asynchronous component loader.
    pub fn lazy(loader: impl ComponentLoader + 'static) -> Self {
        Self::Lazy(Arc::new(loader))
    }

    /// Whether this node renders only a pass-through viewport.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough)
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passthrough => f.write_str("Passthrough"),
            Self::Ready(c) => write!(f, "Ready({})", c.label()),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}
