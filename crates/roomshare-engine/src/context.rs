//! Per-run allocation state shared by the grouper and the backfill pass.

use std::collections::{HashSet, VecDeque};

use roomshare_core::{Gender, StudentId};
use serde::{Deserialize, Serialize};

/// Which pass finished a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomOrigin {
    /// An exclusive pair accepted while seeding.
    Seeded,
    /// A pending group resolved by the backfill pass.
    Backfilled,
}

/// A finished room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub members: Vec<StudentId>,
    /// Gender of the first member.
    pub anchor: Gender,
    pub origin: RoomOrigin,
}

/// A same-gender mutual cluster waiting to be topped up by backfill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGroup {
    pub members: Vec<StudentId>,
    pub anchor: Gender,
}

impl PendingGroup {
    pub fn new(anchor: Gender) -> Self {
        Self {
            members: Vec::new(),
            anchor,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_room(self) -> Room {
        Room {
            members: self.members,
            anchor: self.anchor,
            origin: RoomOrigin::Backfilled,
        }
    }
}

/// Accumulators for one engine run. Owned by that run alone.
#[derive(Debug, Clone, Default)]
pub struct AllocationContext {
    placed: HashSet<StudentId>,
    /// Unmatched students in the order they entered the pool.
    pub singles: Vec<StudentId>,
    /// Groups awaiting backfill, resolved strictly FIFO.
    pub pending: VecDeque<PendingGroup>,
    /// Finished rooms in finalization order.
    pub rooms: Vec<Room>,
}

impl AllocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_placed(&self, id: StudentId) -> bool {
        self.placed.contains(&id)
    }

    /// Finalize a seeded room and mark its members placed.
    pub fn finish_room(&mut self, members: Vec<StudentId>, anchor: Gender) {
        self.placed.extend(members.iter().copied());
        self.rooms.push(Room {
            members,
            anchor,
            origin: RoomOrigin::Seeded,
        });
    }

    pub fn push_single(&mut self, id: StudentId) {
        self.placed.insert(id);
        self.singles.push(id);
    }

    pub fn push_pending(&mut self, group: PendingGroup) {
        self.placed.extend(group.members.iter().copied());
        self.pending.push_back(group);
    }

    /// Move a student out of the singles pool, keeping the pool's order.
    /// Returns `false` if the student was not a single.
    pub fn take_single(&mut self, id: StudentId) -> bool {
        match self.singles.iter().position(|&s| s == id) {
            Some(pos) => {
                self.singles.remove(pos);
                true
            }
            None => false,
        }
    }
}
