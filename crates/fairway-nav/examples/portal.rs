//! Builds the external (applicant) and internal (staff) portal route
//! tables and walks a few representative navigations, printing the nested
//! view outline and the bound parameters for each.
//!
//! Run with `RUST_LOG=debug cargo run --example portal` to see the
//! navigator's commit logging.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use fairway_nav::Navigator;
use fairway_router::{Component, ComponentRef, RouteDecl, RouteTree};

struct Page(&'static str);

impl Component for Page {
    fn label(&self) -> &str {
        self.0
    }

    fn on_mount(&self) {
        tracing::debug!(page = self.0, "mount");
    }

    fn on_unmount(&self) {
        tracing::debug!(page = self.0, "unmount");
    }
}

fn page(label: &'static str) -> ComponentRef {
    ComponentRef::ready(Page(label))
}

fn external_portal() -> RouteDecl {
    RouteDecl::new("external")
        .child(
            RouteDecl::index()
                .component(page("ExternalDashboard"))
                .named("external-dashboard"),
        )
        .child(RouteDecl::new("organisations/manage/:org_id").component(page("Organisation")))
        .child(
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
        )
        .child(
            RouteDecl::new("dcv_permit")
                .component(page("DcvPermit"))
                .named("dcv_permit"),
        )
        .child(
            RouteDecl::new("dcv_admission")
                .component(page("DcvAdmission"))
                .named("dcv_admission"),
        )
        .child(
            RouteDecl::new("vessels")
                .component(page("VesselsDashboard"))
                .named("vessels-dashboard"),
        )
        .child(
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
        )
}

fn internal_portal() -> RouteDecl {
    RouteDecl::new("internal")
        .child(RouteDecl::index().component(page("InternalDashboard")))
        .child(
            RouteDecl::new("approvals")
                .component(page("ApprovalDash"))
                .named("internal-approvals-dash"),
        )
        .child(
            RouteDecl::new("approval/:approval_id")
                .component(page("Approval"))
                .named("internal-approval-detail"),
        )
        .child(
            RouteDecl::new("compliances")
                .component(page("ComplianceDash"))
                .named("internal-compliances-dash"),
        )
        .child(
            RouteDecl::new("waiting_list")
                .component(page("WaitingListDash"))
                .named("internal-waiting-list-dash"),
        )
        .child(
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
        )
        .child(
            RouteDecl::new("vessel").child(
                RouteDecl::new(":vessel_id")
                    .component(page("VesselDetail"))
                    .named("internal-vessel-detail"),
            ),
        )
        .child(
            RouteDecl::new("vesselownership").child(
                RouteDecl::new(":vessel_id")
                    .component(page("ManageVessel"))
                    .named("internal-manage-vessel"),
            ),
        )
        .child(
            RouteDecl::new("dcv_vessel").child(
                RouteDecl::new(":dcv_vessel_id")
                    .component(page("DcvVesselDetail"))
                    .named("internal-dcv-vessel-detail"),
            ),
        )
        .child(
            RouteDecl::new("sticker")
                .component(page("StickersDash"))
                .named("internal-stickers-dash"),
        )
        .child(
            RouteDecl::new("person/:email_user_id")
                .component(page("PersonDetail"))
                .named("internal-person-detail"),
        )
        .child(RouteDecl::new("compliance/:compliance_id").component(page("Compliance")))
        .child(
            RouteDecl::new("search")
                .component(page("Search"))
                .named("internal-search"),
        )
        .child(
            RouteDecl::new("reports")
                .component(page("Reports"))
                .named("reports"),
        )
        .child(
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
        )
        .child(
            RouteDecl::new("dcv").child(
                RouteDecl::index()
                    .component(page("DcvDashboard"))
                    .named("internal-dcv-dash"),
            ),
        )
        .child(
            RouteDecl::new("proposal").child(
                RouteDecl::new(":proposal_id").child(
                    RouteDecl::index()
                        .component(page("Proposal"))
                        .named("internal-proposal"),
                ),
            ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let tree = Arc::new(RouteTree::build(vec![external_portal(), internal_portal()])?);
    let nav = Navigator::new(tree.clone());

    for path in [
        "/external",
        "/external/proposal",
        "/external/proposal/submit",
        "/external/proposal/42",
        "/external/organisations/manage/12",
        "/internal/moorings",
        "/internal/moorings/ML-081",
        "/internal/organisations/access/5",
        "/internal/proposal/7",
    ] {
        nav.navigate_to(path).await?;
        let chain = nav.current_chain().await.expect("just committed");
        println!(
            "{path:<40} {:<60} params={}",
            nav.view_outline().await,
            serde_json::to_string(&chain.params())?
        );
    }

    // Reverse resolution drives link generation.
    let mut vessel = HashMap::new();
    vessel.insert("id".to_string(), "7".to_string());
    println!(
        "manage-vessel{{id: 7}} resolves to {}",
        tree.resolve_named("manage-vessel", &vessel)?
    );

    Ok(())
}
