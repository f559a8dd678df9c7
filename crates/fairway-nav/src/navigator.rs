// File: fairway-nav/src/navigator.rs
// Purpose: Navigation state machine with last-request-wins cancellation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use fairway_router::{
    Component, ComponentRef, MatchedChain, Params, ResolveError, RouteNotFound, RouteTree,
};

use crate::composer::ViewComposer;

/// Coarse observable phase of the navigator state machine, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigatorPhase {
    #[default]
    Idle,
    Resolving,
    Committing,
}

/// A navigation that reached the view: the chain was committed and the
/// active chain replaced atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    /// The final resolved, normalized path.
    pub path: String,
}

/// Failure kinds surfaced by [`Navigator::navigate_to`] and
/// [`Navigator::navigate_to_named`].
///
/// Always returned, never panicked past the navigator boundary; on any
/// failure the active chain and the mounted view stay intact.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error(transparent)]
    NotFound(#[from] RouteNotFound),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A newer navigation request won the race. The stale chain was
    /// discarded after its loads completed; the view never observed it.
    #[error("navigation to `{0}` superseded by a newer request")]
    Superseded(String),
}

/// Outcome of one navigation request.
pub type NavigationResult = Result<Committed, NavigationError>;

struct NavState {
    phase: NavigatorPhase,
    active: Option<MatchedChain>,
    composer: ViewComposer,
}

/// Orchestrates a navigation request end-to-end: resolve the path (or name
/// plus parameters) into a chain, load any lazy components, diff against
/// the active chain, and commit through the [`ViewComposer`].
///
/// One navigation is in flight at a time from the caller's perspective, but
/// a newer request may arrive before an older one finishes; only the chain
/// of the most recently issued request is ever committed. Matching itself
/// is synchronous; the only suspension point is lazy component loading.
pub struct Navigator {
    tree: Arc<RouteTree>,
    epoch: AtomicU64,
    state: Mutex<NavState>,
}

impl Navigator {
    pub fn new(tree: Arc<RouteTree>) -> Self {
        Self {
            tree,
            epoch: AtomicU64::new(0),
            state: Mutex::new(NavState {
                phase: NavigatorPhase::Idle,
                active: None,
                composer: ViewComposer::new(),
            }),
        }
    }

    /// The shared route tree this navigator resolves against.
    pub fn tree(&self) -> &Arc<RouteTree> {
        &self.tree
    }

    /// Navigates to a concrete path.
    pub async fn navigate_to(&self, path: &str) -> NavigationResult {
        // Issue order decides the winner, not resolution order.
        let ticket = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_phase(NavigatorPhase::Resolving).await;
        let outcome = self.run(ticket, path).await;
        if outcome.is_err() {
            self.set_phase(NavigatorPhase::Idle).await;
        }
        outcome
    }

    /// Navigates to a named route, reverse-resolving the path first.
    pub async fn navigate_to_named(&self, name: &str, params: &Params) -> NavigationResult {
        let path = self.tree.resolve_named(name, params)?;
        self.navigate_to(&path).await
    }

    /// The currently committed chain, if any navigation succeeded yet.
    pub async fn current_chain(&self) -> Option<MatchedChain> {
        self.state.lock().await.active.clone()
    }

    /// The committed path, if any.
    pub async fn current_path(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .active
            .as_ref()
            .map(|chain| chain.path().to_string())
    }

    /// Diagnostic phase snapshot.
    pub async fn phase(&self) -> NavigatorPhase {
        self.state.lock().await.phase
    }

    /// Nested outline of the mounted view.
    pub async fn view_outline(&self) -> String {
        self.state.lock().await.composer.render_outline()
    }

    async fn run(&self, ticket: u64, path: &str) -> NavigationResult {
        let chain = self.tree.match_path(path)?;
        // Suspension point: lazy component modules resolve here. A request
        // superseded while suspended still finishes its loads; only the
        // commit is withheld.
        let resolved = self.load_components(&chain).await;
        self.commit(ticket, chain, resolved).await
    }

    async fn load_components(&self, chain: &MatchedChain) -> Vec<Option<Arc<dyn Component>>> {
        let mut resolved = Vec::with_capacity(chain.len());
        for level in chain.nodes() {
            let handle = match self.tree.node(level.node).component() {
                ComponentRef::Passthrough => None,
                ComponentRef::Ready(component) => Some(component.clone()),
                ComponentRef::Lazy(loader) => Some(loader.load().await),
            };
            resolved.push(handle);
        }
        resolved
    }

    async fn commit(
        &self,
        ticket: u64,
        chain: MatchedChain,
        resolved: Vec<Option<Arc<dyn Component>>>,
    ) -> NavigationResult {
        let mut state = self.state.lock().await;
        if ticket != self.epoch.load(Ordering::SeqCst) {
            // Last request wins: the stale chain never reaches the view.
            warn!(path = chain.path(), "navigation superseded");
            return Err(NavigationError::Superseded(chain.path().to_string()));
        }

        state.phase = NavigatorPhase::Committing;
        state.composer.apply(&chain, &resolved);
        let path = chain.path().to_string();
        state.active = Some(chain);
        state.phase = NavigatorPhase::Idle;
        info!(%path, depth = state.composer.depth(), "navigation committed");
        Ok(Committed { path })
    }

    async fn set_phase(&self, phase: NavigatorPhase) {
        self.state.lock().await.phase = phase;
    }
}
