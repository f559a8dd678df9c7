// File: fairway-router/src/error.rs
// Purpose: Error taxonomy for tree compilation and route resolution

use thiserror::Error;

/// Fatal errors raised while compiling a route tree.
///
/// These indicate a misconfigured route table and are meant to abort
/// application startup, never to be recovered locally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Two nodes in the tree share the same route name.
    #[error("duplicate route name `{0}`")]
    DuplicateRouteName(String),

    /// Two static siblings at one level declare identical literals.
    #[error("ambiguous static siblings `{literal}` under `{parent}`")]
    AmbiguousStaticSibling { literal: String, parent: String },

    /// More than one empty-path child at one level.
    #[error("more than one default child under `{0}`")]
    AmbiguousDefaultChild(String),

    /// A catch-all segment consumes the rest of the path, so nothing can
    /// nest below it.
    #[error("catch-all `*{0}` cannot have children")]
    CatchAllWithChildren(String),

    /// A blueprint referenced a component key with no binding.
    #[error("no component bound for key `{0}`")]
    UnboundComponent(String),

    /// The declaration list was empty.
    #[error("route table is empty")]
    EmptyTree,

    /// A declared segment could not be parsed.
    #[error("invalid segment `{segment}` in `{path}`: {reason}")]
    InvalidSegment {
        segment: String,
        path: String,
        reason: String,
    },

    /// A blueprint document failed to deserialize.
    #[error("blueprint parse error: {0}")]
    BlueprintSyntax(String),
}

/// Recoverable errors from named-route reverse resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No node in the tree carries the requested name.
    #[error("no route named `{0}`")]
    UnknownRouteName(String),

    /// A dynamic segment on the path to the named node had no value in the
    /// supplied parameter set.
    #[error("missing value for parameter `{0}`")]
    MissingParam(String),
}

/// The requested path has no matching chain in the tree.
///
/// Recoverable: callers typically render a not-found view and leave the
/// active chain untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no route matches `{requested}`")]
pub struct RouteNotFound {
    /// The normalized path that failed to match.
    pub requested: String,
}
