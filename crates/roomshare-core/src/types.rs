//! Shared types used across Roomshare crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, PolicyError};

/// Unique identifier for a student within one batch.
pub type StudentId = u64;

/// Default number of students a room can hold.
pub const DEFAULT_CAPACITY: usize = 5;

/// Default age at which two students may share a mixed-gender room.
pub const DEFAULT_ADULT_AGE: u32 = 18;

/// Smallest capacity that can still hold a mutual pair.
pub const MIN_CAPACITY: usize = 2;

// ── Gender ─────────────────────────────────────────────────────────

/// Closed two-variant gender tag used to gate room admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(other.to_string()),
        }
    }
}

// ── Student ────────────────────────────────────────────────────────

/// A student record exactly as the intake store hands it over.
///
/// Numeric fields are signed and `gender` is free text so that bad values
/// surface as typed validation errors instead of opaque parse failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub age: i64,
    /// Ids this student nominated as roommates, in nomination order.
    pub relations: Vec<i64>,
}

/// A validated student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    /// Nominated roommates. Never contains `id`, never repeats, and every
    /// entry resolves inside the same batch.
    pub relations: Vec<StudentId>,
}

impl Student {
    /// Whether this student listed `other` among their relations.
    pub fn nominates(&self, other: StudentId) -> bool {
        self.relations.contains(&other)
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn is_adult(&self, adult_age: u32) -> bool {
        self.age >= adult_age
    }
}

impl TryFrom<StudentRecord> for Student {
    type Error = LoadError;

    /// Check the fields of a single record. Cross-record checks (duplicate
    /// ids, unresolved relations) belong to the graph loader.
    fn try_from(record: StudentRecord) -> Result<Self, Self::Error> {
        let id = StudentId::try_from(record.id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or(LoadError::InvalidId(record.id))?;

        let gender = record
            .gender
            .parse::<Gender>()
            .map_err(|value| LoadError::InvalidGender { id, value })?;

        let age = u32::try_from(record.age)
            .map_err(|_| LoadError::InvalidAge { id, age: record.age })?;

        let relations = record
            .relations
            .iter()
            .map(|&relation| {
                StudentId::try_from(relation)
                    .ok()
                    .filter(|r| *r > 0)
                    .ok_or(LoadError::InvalidRelation { id, relation })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Student {
            id,
            name: record.name,
            gender,
            age,
            relations,
        })
    }
}

// ── Policy ─────────────────────────────────────────────────────────

/// Tunables for one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPolicy {
    /// Maximum number of members in a room.
    pub capacity: usize,
    /// Both members of an exclusive pair must be at least this old to share
    /// a mixed-gender room.
    pub adult_age: u32,
}

impl AssignmentPolicy {
    pub fn new(capacity: usize, adult_age: u32) -> Result<Self, PolicyError> {
        let policy = Self {
            capacity,
            adult_age,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Checked by the engine before every run.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.capacity < MIN_CAPACITY {
            return Err(PolicyError::CapacityTooSmall {
                capacity: self.capacity,
                min: MIN_CAPACITY,
            });
        }
        Ok(())
    }
}

impl Default for AssignmentPolicy {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            adult_age: DEFAULT_ADULT_AGE,
        }
    }
}
