//! # Fairway Nav
//!
//! The asynchronous navigation shell over [`fairway_router`]: a
//! [`Navigator`] that resolves requests (by path or by route name), loads
//! lazy components, and commits the result through a [`ViewComposer`] that
//! mounts only the divergent suffix of the view tree.
//!
//! Concurrency model: single-threaded, cooperative. Navigations issued
//! concurrently all resolve, but only the most recently issued request is
//! committed — stale results are discarded after the fact, so a superseded
//! navigation's only side effect is wasted load work, never a view flash.
//!
//! ```no_run
//! use std::sync::Arc;
//! use fairway_nav::Navigator;
//! use fairway_router::{RouteDecl, RouteTree};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let tree = Arc::new(RouteTree::build(vec![
//!     RouteDecl::new("vessels").named("vessels-dashboard"),
//! ])?);
//! let nav = Navigator::new(tree);
//!
//! let committed = nav.navigate_to("/vessels").await?;
//! assert_eq!(committed.path, "/vessels");
//! # Ok(())
//! # }
//! ```

mod composer;
mod navigator;

pub use composer::ViewComposer;
pub use navigator::{Committed, NavigationError, NavigationResult, Navigator, NavigatorPhase};
