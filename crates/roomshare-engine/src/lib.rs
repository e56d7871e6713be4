//! Roomshare assignment engine — mutual-preference grouping and greedy backfill.
//!
//! Turns one closed batch of students into finished rooms plus a residual
//! list of unmatched students. The run is a pure, deterministic function of
//! the validated batch: identical input order and content reproduce the
//! identical report.
//!
//! # Components
//!
//! - **`graph`** — Affinity graph loader (validation, id index, input order)
//! - **`context`** — Per-run allocation state (placed ids, singles, queue)
//! - **`grouper`** — Seed grouper (mutual clusters, pair policy)
//! - **`backfill`** — Backfill allocator (demand-ranked admission)
//! - **`report`** — Report emitter (room sizes, singles, outcomes)

pub mod backfill;
pub mod context;
pub mod graph;
pub mod grouper;
pub mod report;

use roomshare_core::{AssignmentPolicy, PolicyError};
use tracing::info;

pub use backfill::{backfill, rank_candidates};
pub use context::{AllocationContext, PendingGroup, Room, RoomOrigin};
pub use graph::AffinityGraph;
pub use grouper::seed_groups;
pub use report::{AssignmentReport, Placement, ReportError, StudentOutcome, format_report};

/// Run the full engine over a loaded batch. Fails before touching the
/// batch if the policy cannot hold a mutual pair.
pub fn assign(
    graph: &AffinityGraph,
    policy: &AssignmentPolicy,
) -> Result<AssignmentReport, PolicyError> {
    policy.validate()?;

    let mut ctx = AllocationContext::new();

    seed_groups(graph, policy, &mut ctx);
    backfill(graph, policy, &mut ctx);

    let report = AssignmentReport::build(graph, ctx);
    info!(
        students = graph.len(),
        rooms = report.rooms.len(),
        singles = report.singles.len(),
        "assignment complete"
    );
    Ok(report)
}
