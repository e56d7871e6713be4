//! Report emitter — room sizes, residual singles and per-student outcomes.

use std::collections::{HashMap, HashSet};

use roomshare_core::{AssignmentPolicy, Gender, StudentId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::{AllocationContext, RoomOrigin};
use crate::graph::AffinityGraph;

/// A student as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: StudentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomReport {
    pub origin: RoomOrigin,
    pub anchor: Gender,
    pub members: Vec<Member>,
}

impl RoomReport {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Final result of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentReport {
    /// Seeded rooms in seeding order, then backfilled rooms in queue order.
    pub rooms: Vec<RoomReport>,
    /// Unmatched students in the order they entered the singles pool.
    pub singles: Vec<Member>,
}

/// Where a single student ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    Room {
        /// Position of the room in [`AssignmentReport::rooms`].
        index: usize,
        roommates: Vec<StudentId>,
    },
    Single,
}

/// One row handed to the notification sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentOutcome {
    pub id: StudentId,
    pub name: String,
    pub placement: Placement,
}

/// A broken report invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("student {0} is neither roomed nor single")]
    Missing(StudentId),

    #[error("student {0} appears more than once")]
    Duplicate(StudentId),

    #[error("student {0} is not part of the batch")]
    Unknown(StudentId),

    #[error("room {index} holds {size} students, capacity is {capacity}")]
    OverCapacity {
        index: usize,
        size: usize,
        capacity: usize,
    },
}

impl AssignmentReport {
    /// Resolve the ids held by a finished context into named members.
    pub fn build(graph: &AffinityGraph, ctx: AllocationContext) -> Self {
        let member = |id: &StudentId| {
            graph.get(*id).map(|s| Member {
                id: s.id,
                name: s.name.clone(),
            })
        };

        let rooms = ctx
            .rooms
            .iter()
            .map(|room| RoomReport {
                origin: room.origin,
                anchor: room.anchor,
                members: room.members.iter().filter_map(member).collect(),
            })
            .collect();
        let singles = ctx.singles.iter().filter_map(member).collect();

        Self { rooms, singles }
    }

    pub fn room_sizes(&self) -> Vec<usize> {
        self.rooms.iter().map(RoomReport::size).collect()
    }

    pub fn single_names(&self) -> Vec<&str> {
        self.singles.iter().map(|m| m.name.as_str()).collect()
    }

    /// One outcome per student, in the batch's input order.
    pub fn outcomes(&self, graph: &AffinityGraph) -> Vec<StudentOutcome> {
        let mut room_of: HashMap<StudentId, usize> = HashMap::new();
        for (index, room) in self.rooms.iter().enumerate() {
            for member in &room.members {
                room_of.insert(member.id, index);
            }
        }

        graph
            .students()
            .iter()
            .map(|student| {
                let placement = match room_of.get(&student.id) {
                    Some(&index) => Placement::Room {
                        index,
                        roommates: self.rooms[index]
                            .members
                            .iter()
                            .map(|m| m.id)
                            .filter(|&id| id != student.id)
                            .collect(),
                    },
                    None => Placement::Single,
                };
                StudentOutcome {
                    id: student.id,
                    name: student.name.clone(),
                    placement,
                }
            })
            .collect()
    }

    /// Check completeness and the capacity bound against the batch.
    pub fn verify(&self, graph: &AffinityGraph, policy: &AssignmentPolicy) -> Result<(), ReportError> {
        let mut seen: HashSet<StudentId> = HashSet::with_capacity(graph.len());

        for (index, room) in self.rooms.iter().enumerate() {
            if room.size() > policy.capacity {
                return Err(ReportError::OverCapacity {
                    index,
                    size: room.size(),
                    capacity: policy.capacity,
                });
            }
        }

        let everyone = self
            .rooms
            .iter()
            .flat_map(|room| room.members.iter())
            .chain(self.singles.iter());
        for member in everyone {
            if !graph.contains(member.id) {
                return Err(ReportError::Unknown(member.id));
            }
            if !seen.insert(member.id) {
                return Err(ReportError::Duplicate(member.id));
            }
        }

        match graph.students().iter().find(|s| !seen.contains(&s.id)) {
            Some(student) => Err(ReportError::Missing(student.id)),
            None => Ok(()),
        }
    }
}

/// Plain-text report: room sizes on one line, then one unmatched name per
/// line.
pub fn format_report(report: &AssignmentReport) -> String {
    let sizes: Vec<String> = report.room_sizes().iter().map(usize::to_string).collect();

    let mut out = sizes.join(" ");
    out.push('\n');
    for name in report.single_names() {
        out.push_str(name);
        out.push('\n');
    }
    out
}
