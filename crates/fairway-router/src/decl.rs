// File: fairway-router/src/decl.rs
// Purpose: Route declarations, serde blueprints, and matcher configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::component::ComponentRef;
use crate::error::CompileError;

/// One route declaration: a path pattern, optional name, a component
/// handle, and nested children in match-precedence (declaration) order.
///
/// This mirrors the record shape of the observed route tables: a nesting
/// group is a declaration with a pass-through component and children, an
/// index page is a child with an empty path.
///
/// # Examples
///
/// ```
/// use fairway_router::RouteDecl;
///
/// let proposal = RouteDecl::new("proposal")
///     .child(RouteDecl::index().named("apply_proposal"))
///     .child(RouteDecl::new("submit").named("submit_proposal"))
///     .child(RouteDecl::new(":proposal_id").named("draft_proposal"));
/// assert_eq!(proposal.children.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteDecl {
    /// Declared path pattern, possibly spanning several segments
    /// (`"organisations/manage/:org_id"`). Leading and trailing slashes are
    /// insignificant; an empty (or `"/"`) path declares a default child.
    pub path: String,
    /// Globally unique identifier for reverse resolution.
    pub name: Option<String>,
    /// Component handle; defaults to a pass-through viewport.
    pub component: ComponentRef,
    /// Nested declarations in declaration order.
    pub children: Vec<RouteDecl>,
}

impl RouteDecl {
    /// Starts a declaration for the given path pattern.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Starts a default (index) child declaration: empty path, matched when
    /// no input remains at its level.
    pub fn index() -> Self {
        Self::new("")
    }

    /// Sets the route name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the component handle.
    pub fn component(mut self, component: ComponentRef) -> Self {
        self.component = component;
        self
    }

    /// Appends one child declaration.
    pub fn child(mut self, child: RouteDecl) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several child declarations at once.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = RouteDecl>,
    {
        self.children.extend(children);
        self
    }
}

/// Serde shape of one declaration, with the component referenced by a
/// string key instead of a live handle.
///
/// Blueprints let the route table live in configuration while the
/// application supplies the actual components at startup, the same split
/// the observed system makes between its route files and its component
/// imports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteBlueprint {
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub children: Vec<RouteBlueprint>,
}

impl RouteBlueprint {
    /// Resolves component keys through `bindings`, producing a live
    /// declaration tree.
    ///
    /// A blueprint without a component key becomes a pass-through node; an
    /// unknown key fails with [`CompileError::UnboundComponent`].
    pub fn bind(
        &self,
        bindings: &HashMap<String, ComponentRef>,
    ) -> Result<RouteDecl, CompileError> {
        let component = match &self.component {
            None => ComponentRef::Passthrough,
            Some(key) => bindings
                .get(key)
                .cloned()
                .ok_or_else(|| CompileError::UnboundComponent(key.clone()))?,
        };

        let mut decl = RouteDecl::new(&self.path).component(component);
        decl.name = self.name.clone();
        for child in &self.children {
            decl.children.push(child.bind(bindings)?);
        }
        Ok(decl)
    }
}

/// A whole blueprint document: top-level `[[route]]` tables in TOML.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BlueprintSet {
    #[serde(default, rename = "route")]
    pub routes: Vec<RouteBlueprint>,
}

impl BlueprintSet {
    /// Parses a blueprint document from TOML.
    pub fn from_toml_str(input: &str) -> Result<Self, CompileError> {
        toml::from_str(input).map_err(|e| CompileError::BlueprintSyntax(e.to_string()))
    }

    /// Binds every top-level blueprint, preserving declaration order.
    pub fn bind(
        &self,
        bindings: &HashMap<String, ComponentRef>,
    ) -> Result<Vec<RouteDecl>, CompileError> {
        self.routes.iter().map(|b| b.bind(bindings)).collect()
    }
}

/// Matcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RouterConfig {
    /// Compare static literals case-insensitively. Parameter values always
    /// keep the requested spelling.
    #[serde(default)]
    pub case_insensitive: bool,

    /// Prefix stripped from requested paths and prepended to resolved
    /// paths, for portals mounted below the site root.
    #[serde(default)]
    pub base_path: Option<String>,
}

impl RouterConfig {
    /// Parses configuration from TOML.
    pub fn from_toml_str(input: &str) -> Result<Self, CompileError> {
        toml::from_str(input).map_err(|e| CompileError::BlueprintSyntax(e.to_string()))
    }
}
