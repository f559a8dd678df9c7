//! Matching and reverse-resolution tests over the public API, exercising
//! the portal-shaped route tables the engine was designed around.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use rstest::rstest;

use fairway_router::{
    Component, ComponentRef, Params, RouteDecl, RouteTree, RouterConfig,
};

struct Stub(&'static str);

impl Component for Stub {
    fn label(&self) -> &str {
        self.0
    }
}

fn page(label: &'static str) -> ComponentRef {
    ComponentRef::ready(Stub(label))
}

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// The applicant-portal table, without its mount prefix: a default
/// dashboard, flat pages, and two nesting groups.
fn external_portal() -> Vec<RouteDecl> {
    vec![
        RouteDecl::index()
            .component(page("ExternalDashboard"))
            .named("external-dashboard"),
        RouteDecl::new("organisations/manage/:org_id").component(page("Organisation")),
        RouteDecl::new("proposal")
            .child(
                RouteDecl::index()
                    .component(page("ProposalApply"))
                    .named("apply_proposal"),
            )
            .child(
                RouteDecl::new("submit")
                    .component(page("ProposalSubmit"))
                    .named("submit_proposal"),
            )
            .child(
                RouteDecl::new(":proposal_id")
                    .component(page("Proposal"))
                    .named("draft_proposal"),
            ),
        RouteDecl::new("dcv_permit")
            .component(page("DcvPermit"))
            .named("dcv_permit"),
        RouteDecl::new("vessels")
            .component(page("VesselsDashboard"))
            .named("vessels-dashboard"),
        RouteDecl::new("vesselownership")
            .child(
                RouteDecl::index()
                    .component(page("ManageVessel"))
                    .named("new-vessel"),
            )
            .child(
                RouteDecl::new(":id")
                    .component(page("ManageVessel"))
                    .named("manage-vessel"),
            ),
    ]
}

/// The staff-portal table: deeper nesting, sibling precedence between
/// `access`, `access/:access_id`, and `:org_id`, and a three-level
/// pass-through group ending in a default leaf.
fn internal_portal() -> Vec<RouteDecl> {
    vec![
        RouteDecl::index().component(page("InternalDashboard")),
        RouteDecl::new("moorings")
            .child(
                RouteDecl::index()
                    .component(page("MooringsDash"))
                    .named("internal-moorings-dash"),
            )
            .child(
                RouteDecl::new(":mooring_id")
                    .component(page("MooringDetail"))
                    .named("internal-mooring-detail"),
            ),
        RouteDecl::new("vessel").child(
            RouteDecl::new(":vessel_id")
                .component(page("VesselDetail"))
                .named("internal-vessel-detail"),
        ),
        RouteDecl::new("organisations")
            .child(
                RouteDecl::new("access")
                    .component(page("OrgAccessTable"))
                    .named("org-access-dash"),
            )
            .child(
                RouteDecl::new("access/:access_id")
                    .component(page("OrgAccess"))
                    .named("org-access"),
            )
            .child(
                RouteDecl::new(":org_id")
                    .component(page("Organisation"))
                    .named("internal-org-detail"),
            ),
        RouteDecl::new("proposal").child(
            RouteDecl::new(":proposal_id").child(
                RouteDecl::index()
                    .component(page("Proposal"))
                    .named("internal-proposal"),
            ),
        ),
    ]
}

fn leaf_name(tree: &RouteTree, path: &str) -> Option<String> {
    let chain = tree.match_path(path).ok()?;
    tree.node(chain.leaf().node).name().map(str::to_string)
}

// ----------------------------------------------------------------------
// Core matching
// ----------------------------------------------------------------------

#[test]
fn bare_root_matches_default_child() {
    let tree = RouteTree::build(external_portal()).unwrap();
    let chain = tree.match_path("/").unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.nodes()[0].node, tree.root());
    assert_eq!(
        tree.node(chain.leaf().node).name(),
        Some("external-dashboard")
    );
}

#[test]
fn bare_root_without_default_matches_root_itself() {
    let tree = RouteTree::build(vec![RouteDecl::new("vessels")]).unwrap();
    let chain = tree.match_path("/").unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain.leaf().node, tree.root());
}

#[test]
fn static_page_matches() {
    let tree = RouteTree::build(external_portal()).unwrap();
    let chain = tree.match_path("/dcv_permit").unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(tree.node(chain.leaf().node).name(), Some("dcv_permit"));
    assert!(chain.params().is_empty());
}

#[test]
fn multi_segment_declaration_matches_as_one_level() {
    let tree = RouteTree::build(external_portal()).unwrap();
    let chain = tree.match_path("/organisations/manage/12").unwrap();
    // Root plus the single compound node: one nesting level, not three.
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.param("org_id"), Some("12"));
    assert_eq!(chain.leaf().consumed, "organisations/manage/12");
}

#[test]
fn dynamic_segment_binds_value() {
    let tree = RouteTree::build(external_portal()).unwrap();
    let chain = tree.match_path("/proposal/42").unwrap();
    assert_eq!(tree.node(chain.leaf().node).name(), Some("draft_proposal"));
    assert_eq!(chain.params(), params(&[("proposal_id", "42")]));
}

#[rstest]
#[case("/proposal/submit", "submit_proposal")]
#[case("/proposal/42", "draft_proposal")]
#[case("/proposal/submission", "draft_proposal")]
#[case("/proposal", "apply_proposal")]
fn literal_beats_dynamic_sibling(#[case] path: &str, #[case] expected: &str) {
    // `submit` is also a syntactically valid value for `:proposal_id`; the
    // literal must win, and everything else falls through to the dynamic
    // node or the default child.
    let tree = RouteTree::build(external_portal()).unwrap();
    assert_eq!(leaf_name(&tree, path).as_deref(), Some(expected));
}

#[test]
fn literal_wins_regardless_of_declaration_order() {
    // Dynamic child declared first; the literal still takes the segment.
    let tree = RouteTree::build(vec![RouteDecl::new("proposal")
        .child(RouteDecl::new(":proposal_id").named("draft"))
        .child(RouteDecl::new("submit").named("submit"))])
    .unwrap();
    assert_eq!(leaf_name(&tree, "/proposal/submit").as_deref(), Some("submit"));
}

#[test]
fn default_fallthrough_includes_both_nodes() {
    let tree = RouteTree::build(external_portal()).unwrap();
    let chain = tree.match_path("/proposal").unwrap();
    // Root, the nesting node, and its default child.
    assert_eq!(chain.len(), 3);
    assert_eq!(tree.node(chain.nodes()[1].node).pattern().len(), 1);
    assert_eq!(tree.node(chain.leaf().node).name(), Some("apply_proposal"));
    assert_eq!(chain.leaf().consumed, "");
}

#[test]
fn nesting_node_without_default_is_its_own_terminus() {
    let tree = RouteTree::build(internal_portal()).unwrap();
    let chain = tree.match_path("/vessel").unwrap();
    assert_eq!(chain.len(), 2);
    assert!(tree.node(chain.leaf().node).component().is_passthrough());
}

#[test]
fn unconsumed_input_is_not_found() {
    let tree = RouteTree::build(external_portal()).unwrap();

    let err = tree.match_path("/nonexistent").unwrap_err();
    assert_eq!(err.requested, "/nonexistent");

    // The dynamic leaf has no children, so a trailing segment kills the
    // whole match; no partial chain comes back.
    assert!(tree.match_path("/proposal/42/extra").is_err());
}

#[test]
fn trailing_slashes_are_insignificant() {
    let tree = RouteTree::build(external_portal()).unwrap();
    let plain = tree.match_path("/proposal/submit").unwrap();
    let slashed = tree.match_path("/proposal/submit/").unwrap();
    assert_eq!(plain.nodes(), slashed.nodes());
}

#[test]
fn matching_is_deterministic() {
    let tree = RouteTree::build(internal_portal()).unwrap();
    let first = tree.match_path("/organisations/access/5").unwrap();
    let second = tree.match_path("/organisations/access/5").unwrap();
    assert_eq!(first, second);
}

// ----------------------------------------------------------------------
// Sibling precedence with compound patterns
// ----------------------------------------------------------------------

#[rstest]
#[case("/organisations/access", "org-access-dash")]
#[case("/organisations/access/5", "org-access")]
#[case("/organisations/west-bay", "internal-org-detail")]
fn organisation_sibling_precedence(#[case] path: &str, #[case] expected: &str) {
    let tree = RouteTree::build(internal_portal()).unwrap();
    assert_eq!(leaf_name(&tree, path).as_deref(), Some(expected));
}

#[test]
fn three_level_nesting_with_default_leaf() {
    let tree = RouteTree::build(internal_portal()).unwrap();
    let chain = tree.match_path("/proposal/7").unwrap();
    // Root, `proposal` group, `:proposal_id` group, default leaf.
    assert_eq!(chain.len(), 4);
    assert_eq!(tree.node(chain.leaf().node).name(), Some("internal-proposal"));
    assert_eq!(chain.param("proposal_id"), Some("7"));
}

// ----------------------------------------------------------------------
// Catch-all
// ----------------------------------------------------------------------

#[test]
fn catch_all_binds_joined_remainder() {
    let tree = RouteTree::build(vec![
        RouteDecl::new("docs").child(RouteDecl::new("*rest").named("docs-page")),
    ])
    .unwrap();

    let chain = tree.match_path("/docs/guides/moorings/fees").unwrap();
    assert_eq!(chain.param("rest"), Some("guides/moorings/fees"));

    // Requires at least one remaining segment; the bare group falls
    // through to its own terminus instead.
    let chain = tree.match_path("/docs").unwrap();
    assert_ne!(chain.leaf().node, tree.find_by_name("docs-page").unwrap());
    assert!(tree.node(chain.leaf().node).component().is_passthrough());
}

#[test]
fn static_sibling_beats_catch_all() {
    let tree = RouteTree::build(vec![RouteDecl::new("docs")
        .child(RouteDecl::new("*rest").named("docs-page"))
        .child(RouteDecl::new("index").named("docs-index"))])
    .unwrap();
    assert_eq!(leaf_name(&tree, "/docs/index").as_deref(), Some("docs-index"));
    assert_eq!(leaf_name(&tree, "/docs/other").as_deref(), Some("docs-page"));
}

// ----------------------------------------------------------------------
// Reverse resolution
// ----------------------------------------------------------------------

#[test]
fn resolve_static_named_route() {
    let tree = RouteTree::build(external_portal()).unwrap();
    assert_eq!(
        tree.resolve_named("submit_proposal", &Params::new()).unwrap(),
        "/proposal/submit"
    );
}

#[test]
fn resolve_substitutes_dynamic_segments() {
    let tree = RouteTree::build(external_portal()).unwrap();
    assert_eq!(
        tree.resolve_named("manage-vessel", &params(&[("id", "7")]))
            .unwrap(),
        "/vesselownership/7"
    );
}

#[test]
fn resolve_unknown_name_fails() {
    let tree = RouteTree::build(external_portal()).unwrap();
    let err = tree.resolve_named("no-such-name", &Params::new()).unwrap_err();
    assert_eq!(
        err,
        fairway_router::ResolveError::UnknownRouteName("no-such-name".to_string())
    );
}

#[test]
fn resolve_missing_param_fails() {
    let tree = RouteTree::build(external_portal()).unwrap();
    let err = tree
        .resolve_named("draft_proposal", &Params::new())
        .unwrap_err();
    assert_eq!(
        err,
        fairway_router::ResolveError::MissingParam("proposal_id".to_string())
    );
}

#[rstest]
#[case("manage-vessel", &[("id", "7")])]
#[case("draft_proposal", &[("proposal_id", "42")])]
#[case("internal-mooring-detail", &[("mooring_id", "ML-081")])]
#[case("org-access", &[("access_id", "9")])]
fn resolve_then_match_round_trips(#[case] name: &str, #[case] pairs: &[(&str, &str)]) {
    let external = RouteTree::build(external_portal()).unwrap();
    let internal = RouteTree::build(internal_portal()).unwrap();
    let tree = if external.find_by_name(name).is_some() {
        &external
    } else {
        &internal
    };

    let wanted = params(pairs);
    let path = tree.resolve_named(name, &wanted).unwrap();
    let chain = tree.match_path(&path).unwrap();

    assert_eq!(chain.leaf().node, tree.find_by_name(name).unwrap());
    assert_eq!(chain.params(), wanted);
}

// ----------------------------------------------------------------------
// Configuration
// ----------------------------------------------------------------------

#[test]
fn case_insensitive_literals_when_configured() {
    let config = RouterConfig {
        case_insensitive: true,
        base_path: None,
    };
    let tree = RouteTree::build_with_config(external_portal(), config).unwrap();

    assert_eq!(
        leaf_name(&tree, "/Proposal/SUBMIT").as_deref(),
        Some("submit_proposal")
    );
    // Parameter values keep the requested spelling.
    let chain = tree.match_path("/PROPOSAL/Ab12").unwrap();
    assert_eq!(chain.param("proposal_id"), Some("Ab12"));
}

#[test]
fn base_path_is_stripped_and_prepended() {
    let config = RouterConfig {
        case_insensitive: false,
        base_path: Some("/app".to_string()),
    };
    let tree = RouteTree::build_with_config(external_portal(), config).unwrap();

    let chain = tree.match_path("/app/vessels").unwrap();
    assert_eq!(tree.node(chain.leaf().node).name(), Some("vessels-dashboard"));

    assert_eq!(
        tree.resolve_named("manage-vessel", &params(&[("id", "7")]))
            .unwrap(),
        "/app/vesselownership/7"
    );
}
