//! Seed grouper — mutual-preference clusters and the pair policy.
//!
//! Walks the batch in input order. Each unplaced student seeds a cluster of
//! itself plus every unplaced student it shares a mutual nomination with,
//! and the cluster is classified:
//! 1. A mutual pair whose members nominated only each other (an exclusive
//!    pair) becomes a room when compatible, otherwise both become singles.
//! 2. Any other pair turns the seed into a single; the partner follows
//!    only if it nominated nobody else, and is otherwise released.
//! 3. Anything else keeps the seed's gender and queues for backfill.

use roomshare_core::{AssignmentPolicy, Student};
use tracing::{debug, info, warn};

use crate::context::{AllocationContext, PendingGroup};
use crate::graph::AffinityGraph;

/// Run the seeding pass, filling `ctx` with seeded rooms, singles and the
/// pending queue.
pub fn seed_groups(graph: &AffinityGraph, policy: &AssignmentPolicy, ctx: &mut AllocationContext) {
    for seed in graph.students() {
        if ctx.is_placed(seed.id) {
            continue;
        }

        let cluster = mutual_cluster(seed, graph, ctx);
        match cluster[..] {
            [seed, partner] => classify_pair(seed, partner, policy, ctx),
            _ => classify_cluster(cluster, policy, ctx),
        }
    }

    info!(
        seeded_rooms = ctx.rooms.len(),
        pending = ctx.pending.len(),
        singles = ctx.singles.len(),
        "seeding pass complete"
    );
}

/// The seed followed by its unplaced mutual partners, in the seed's
/// nomination order.
fn mutual_cluster<'g>(
    seed: &'g Student,
    graph: &'g AffinityGraph,
    ctx: &AllocationContext,
) -> Vec<&'g Student> {
    let mut cluster = vec![seed];
    cluster.extend(
        seed.relations
            .iter()
            .filter_map(|&id| graph.get(id))
            .filter(|other| !ctx.is_placed(other.id) && other.nominates(seed.id)),
    );
    cluster
}

/// Whether two students that nominated only each other may share a room.
pub fn exclusive_pair_compatible(a: &Student, b: &Student, policy: &AssignmentPolicy) -> bool {
    a.gender == b.gender || (a.is_adult(policy.adult_age) && b.is_adult(policy.adult_age))
}

fn classify_pair(
    seed: &Student,
    partner: &Student,
    policy: &AssignmentPolicy,
    ctx: &mut AllocationContext,
) {
    let exclusive = seed.relation_count() == 1 && partner.relation_count() == 1;

    if exclusive {
        if exclusive_pair_compatible(seed, partner, policy) {
            debug!(seed = seed.id, partner = partner.id, "exclusive pair roomed");
            ctx.finish_room(vec![seed.id, partner.id], seed.gender);
        } else {
            debug!(seed = seed.id, partner = partner.id, "incompatible exclusive pair");
            ctx.push_single(seed.id);
            ctx.push_single(partner.id);
        }
        return;
    }

    ctx.push_single(seed.id);
    if partner.relation_count() == 1 {
        ctx.push_single(partner.id);
    } else {
        // Left unplaced: the partner may still seed or join a later cluster.
        debug!(seed = seed.id, partner = partner.id, "partner released");
    }
}

fn classify_cluster(cluster: Vec<&Student>, policy: &AssignmentPolicy, ctx: &mut AllocationContext) {
    let Some((seed, rest)) = cluster.split_first() else {
        return;
    };

    let mut group = PendingGroup::new(seed.gender);
    group.members.push(seed.id);
    for member in rest {
        if member.gender != seed.gender {
            debug!(seed = seed.id, member = member.id, "dropped gender-mismatched member");
            continue;
        }
        if group.len() >= policy.capacity {
            warn!(seed = seed.id, member = member.id, "cluster over capacity, member released");
            continue;
        }
        group.members.push(member.id);
    }

    if group.len() == 1 {
        ctx.push_single(seed.id);
    } else {
        debug!(seed = seed.id, size = group.len(), "queued pending group");
        ctx.push_pending(group);
    }
}
