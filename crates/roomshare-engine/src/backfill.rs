//! Backfill allocator — tops pending groups up from the singles pool.
//!
//! Pending groups are resolved strictly in queue order. For each group the
//! singles its members nominated are ranked by demand (how many members
//! nominated them) and admitted best-first while the group has room. A
//! candidate whose gender differs from the group's anchor is skipped for
//! this group only; it stays in the pool for later groups.

use std::collections::HashSet;

use roomshare_core::{AssignmentPolicy, StudentId};
use tracing::{debug, info};

use crate::context::{AllocationContext, PendingGroup};
use crate::graph::AffinityGraph;

/// A single nominated by at least one member of the current group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub id: StudentId,
    /// Number of group members that nominated this single.
    pub demand: usize,
}

/// Drain the pending queue into finished rooms.
pub fn backfill(graph: &AffinityGraph, policy: &AssignmentPolicy, ctx: &mut AllocationContext) {
    let mut resolved = 0usize;
    let mut admitted = 0usize;

    while let Some(mut group) = ctx.pending.pop_front() {
        if group.len() < policy.capacity {
            admitted += fill_group(&mut group, graph, policy, ctx);
        }
        if group.len() < policy.capacity {
            debug!(
                anchor = %group.anchor,
                size = group.len(),
                capacity = policy.capacity,
                "room finished under capacity"
            );
        }
        ctx.rooms.push(group.into_room());
        resolved += 1;
    }

    info!(resolved, admitted, singles = ctx.singles.len(), "backfill pass complete");
}

/// Admit ranked singles into `group` until it is full or the ranking runs
/// out. Returns how many students were admitted.
fn fill_group(
    group: &mut PendingGroup,
    graph: &AffinityGraph,
    policy: &AssignmentPolicy,
    ctx: &mut AllocationContext,
) -> usize {
    let mut ranked = rank_candidates(&group.members, graph, &ctx.singles);
    let mut admitted = 0;

    while group.len() < policy.capacity {
        let Some(candidate) = ranked.pop() else {
            break;
        };
        let Some(student) = graph.get(candidate.id) else {
            continue;
        };

        if student.gender != group.anchor {
            debug!(
                candidate = candidate.id,
                demand = candidate.demand,
                anchor = %group.anchor,
                "skipped gender-mismatched candidate"
            );
            continue;
        }

        if ctx.take_single(candidate.id) {
            debug!(candidate = candidate.id, demand = candidate.demand, "admitted single");
            group.members.push(candidate.id);
            admitted += 1;
        }
    }

    admitted
}

/// Rank the singles nominated by `members` in ascending demand order, so
/// the best candidate sits at the end of the returned list.
///
/// Candidates are collected in encounter order (members in group order,
/// each member's relations in nomination order) and sorted stably, so among
/// equal demand the candidate encountered last is tried first.
pub fn rank_candidates(
    members: &[StudentId],
    graph: &AffinityGraph,
    singles: &[StudentId],
) -> Vec<Candidate> {
    let pool: HashSet<StudentId> = singles.iter().copied().collect();
    let mut ranked: Vec<Candidate> = Vec::new();

    for member in members.iter().filter_map(|&id| graph.get(id)) {
        for relation in member.relations.iter().filter(|r| pool.contains(r)) {
            match ranked.iter_mut().find(|c| c.id == *relation) {
                Some(candidate) => candidate.demand += 1,
                None => ranked.push(Candidate {
                    id: *relation,
                    demand: 1,
                }),
            }
        }
    }

    ranked.sort_by_key(|c| c.demand);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomshare_core::{Gender, Student};

    fn student(id: StudentId, gender: Gender, relations: &[StudentId]) -> Student {
        Student {
            id,
            name: format!("s{id}"),
            gender,
            age: 16,
            relations: relations.to_vec(),
        }
    }

    fn pending(members: &[StudentId], anchor: Gender) -> PendingGroup {
        PendingGroup {
            members: members.to_vec(),
            anchor,
        }
    }

    fn context(singles: &[StudentId], groups: Vec<PendingGroup>) -> AllocationContext {
        let mut ctx = AllocationContext::new();
        for &id in singles {
            ctx.push_single(id);
        }
        for group in groups {
            ctx.push_pending(group);
        }
        ctx
    }

    #[test]
    fn ranks_by_ascending_demand() {
        let graph = AffinityGraph::from_students(vec![
            student(1, Gender::Male, &[3, 4]),
            student(2, Gender::Male, &[4]),
            student(3, Gender::Male, &[]),
            student(4, Gender::Male, &[]),
        ])
        .unwrap();

        let ranked = rank_candidates(&[1, 2], &graph, &[3, 4]);

        assert_eq!(
            ranked,
            vec![Candidate { id: 3, demand: 1 }, Candidate { id: 4, demand: 2 }]
        );
    }

    #[test]
    fn ranking_ignores_non_singles() {
        let graph = AffinityGraph::from_students(vec![
            student(1, Gender::Male, &[2, 3]),
            student(2, Gender::Male, &[]),
            student(3, Gender::Male, &[]),
        ])
        .unwrap();

        let ranked = rank_candidates(&[1], &graph, &[3]);

        assert_eq!(ranked, vec![Candidate { id: 3, demand: 1 }]);
    }

    #[test]
    fn equal_demand_keeps_encounter_order() {
        let graph = AffinityGraph::from_students(vec![
            student(1, Gender::Male, &[5, 3]),
            student(3, Gender::Male, &[]),
            student(5, Gender::Male, &[]),
        ])
        .unwrap();

        let ranked = rank_candidates(&[1], &graph, &[3, 5]);
        let ids: Vec<StudentId> = ranked.iter().map(|c| c.id).collect();

        assert_eq!(ids, vec![5, 3]);
    }

    #[test]
    fn fills_group_to_capacity_best_first() {
        let graph = AffinityGraph::from_students(vec![
            student(1, Gender::Female, &[2, 3, 4, 5]),
            student(2, Gender::Female, &[1, 5]),
            student(3, Gender::Female, &[]),
            student(4, Gender::Female, &[]),
            student(5, Gender::Female, &[]),
        ])
        .unwrap();
        let policy = AssignmentPolicy {
            capacity: 3,
            ..AssignmentPolicy::default()
        };
        let mut ctx = context(&[3, 4, 5], vec![pending(&[1, 2], Gender::Female)]);

        backfill(&graph, &policy, &mut ctx);

        // 5 has demand 2 and goes in first; the room is then full.
        assert_eq!(ctx.rooms[0].members, vec![1, 2, 5]);
        assert_eq!(ctx.singles, vec![3, 4]);
    }

    #[test]
    fn mismatched_candidate_is_skipped_not_removed() {
        let graph = AffinityGraph::from_students(vec![
            student(1, Gender::Male, &[3, 4]),
            student(2, Gender::Male, &[3]),
            student(3, Gender::Female, &[]),
            student(4, Gender::Male, &[]),
        ])
        .unwrap();
        let mut ctx = context(&[3, 4], vec![pending(&[1, 2], Gender::Male)]);

        backfill(&graph, &AssignmentPolicy::default(), &mut ctx);

        assert_eq!(ctx.rooms[0].members, vec![1, 2, 4]);
        assert_eq!(ctx.singles, vec![3]);
    }

    #[test]
    fn skipped_candidate_stays_available_for_later_groups() {
        let graph = AffinityGraph::from_students(vec![
            student(1, Gender::Male, &[5]),
            student(2, Gender::Male, &[1]),
            student(3, Gender::Female, &[5]),
            student(4, Gender::Female, &[3]),
            student(5, Gender::Female, &[]),
        ])
        .unwrap();
        let mut ctx = context(
            &[5],
            vec![pending(&[1, 2], Gender::Male), pending(&[3, 4], Gender::Female)],
        );

        backfill(&graph, &AssignmentPolicy::default(), &mut ctx);

        assert_eq!(ctx.rooms[0].members, vec![1, 2]);
        assert_eq!(ctx.rooms[1].members, vec![3, 4, 5]);
        assert!(ctx.singles.is_empty());
    }

    #[test]
    fn full_group_is_emitted_as_is() {
        let graph = AffinityGraph::from_students(vec![
            student(1, Gender::Male, &[3]),
            student(2, Gender::Male, &[]),
            student(3, Gender::Male, &[]),
        ])
        .unwrap();
        let policy = AssignmentPolicy {
            capacity: 2,
            ..AssignmentPolicy::default()
        };
        let mut ctx = context(&[3], vec![pending(&[1, 2], Gender::Male)]);

        backfill(&graph, &policy, &mut ctx);

        assert_eq!(ctx.rooms[0].members, vec![1, 2]);
        assert_eq!(ctx.singles, vec![3]);
    }

    #[test]
    fn group_without_candidates_finishes_under_capacity() {
        let graph = AffinityGraph::from_students(vec![
            student(1, Gender::Male, &[2]),
            student(2, Gender::Male, &[1]),
        ])
        .unwrap();
        let mut ctx = context(&[], vec![pending(&[1, 2], Gender::Male)]);

        backfill(&graph, &AssignmentPolicy::default(), &mut ctx);

        assert_eq!(ctx.rooms.len(), 1);
        assert_eq!(ctx.rooms[0].members.len(), 2);
        assert!(ctx.pending.is_empty());
    }
}
