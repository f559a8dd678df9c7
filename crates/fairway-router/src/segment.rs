// File: fairway-router/src/segment.rs
// Purpose: Classification of declared path segments into typed patterns

use std::fmt;

use crate::error::CompileError;

/// One declared segment pattern.
///
/// Sum type covering the whole declaration grammar: static literals,
/// `:name` dynamic segments, `*name` catch-alls, and the empty pattern of a
/// default (index) child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentPattern {
    /// Exact literal segment.
    Static(String),
    /// `:name` — matches any single non-empty segment and binds it.
    Param(String),
    /// `*name` — matches one or more remaining segments and binds the
    /// joined remainder. Must be the last segment of its pattern.
    CatchAll(String),
}

impl SegmentPattern {
    /// Whether this segment binds a parameter.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Param(_) | Self::CatchAll(_))
    }

    /// The bound parameter name, if any.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::Param(name) | Self::CatchAll(name) => Some(name),
            Self::Static(_) => None,
        }
    }
}

impl fmt::Display for SegmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(lit) => f.write_str(lit),
            Self::Param(name) => write!(f, ":{name}"),
            Self::CatchAll(name) => write!(f, "*{name}"),
        }
    }
}

/// Classifies one declared segment (pure function).
///
/// Dispatches on the first character, like the URL grammars this mirrors:
/// `:` introduces a dynamic segment, `*` a catch-all, anything else is a
/// literal.
///
/// # Examples
///
/// ```
/// use fairway_router::{classify_segment, SegmentPattern};
///
/// assert_eq!(
///     classify_segment("submit", "proposal/submit").unwrap(),
///     SegmentPattern::Static("submit".into()),
/// );
/// assert_eq!(
///     classify_segment(":proposal_id", "proposal/:proposal_id").unwrap(),
///     SegmentPattern::Param("proposal_id".into()),
/// );
/// assert_eq!(
///     classify_segment("*rest", "docs/*rest").unwrap(),
///     SegmentPattern::CatchAll("rest".into()),
/// );
/// ```
pub fn classify_segment(segment: &str, declared_path: &str) -> Result<SegmentPattern, CompileError> {
    let invalid = |reason: &str| CompileError::InvalidSegment {
        segment: segment.to_string(),
        path: declared_path.to_string(),
        reason: reason.to_string(),
    };

    match segment.chars().next() {
        None => Err(invalid("empty segment")),
        Some(':') => {
            let name = &segment[1..];
            if name.is_empty() {
                return Err(invalid("dynamic segment needs a name"));
            }
            Ok(SegmentPattern::Param(name.to_string()))
        }
        Some('*') => {
            let name = &segment[1..];
            if name.is_empty() {
                return Err(invalid("catch-all segment needs a name"));
            }
            Ok(SegmentPattern::CatchAll(name.to_string()))
        }
        Some(_) => Ok(SegmentPattern::Static(segment.to_string())),
    }
}
