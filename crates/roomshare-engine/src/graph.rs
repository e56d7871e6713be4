//! Affinity graph loader.
//!
//! Validates one closed batch and indexes it by student id. The original
//! input order is kept alongside the index because every later pass walks
//! students in that order, which is what makes a run reproducible.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use roomshare_core::{LoadError, LoadResult, Student, StudentId, StudentRecord};
use tracing::debug;

/// Read-only id → student lookup for one batch.
#[derive(Debug, Clone)]
pub struct AffinityGraph {
    students: Vec<Student>,
    index: HashMap<StudentId, usize>,
}

impl AffinityGraph {
    /// Read and validate a JSON array of student records.
    pub fn from_file(path: &Path) -> LoadResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> LoadResult<Self> {
        let records: Vec<StudentRecord> = serde_json::from_str(json)?;
        Self::load(records)
    }

    /// Validate raw records. The first bad record rejects the batch.
    pub fn load(records: Vec<StudentRecord>) -> LoadResult<Self> {
        let students = records
            .into_iter()
            .map(Student::try_from)
            .collect::<LoadResult<Vec<_>>>()?;
        Self::from_students(students)
    }

    /// Build the graph from typed students, running the cross-record checks.
    pub fn from_students(students: Vec<Student>) -> LoadResult<Self> {
        let mut index = HashMap::with_capacity(students.len());
        for (pos, student) in students.iter().enumerate() {
            if student.id == 0 {
                return Err(LoadError::InvalidId(0));
            }
            if index.insert(student.id, pos).is_some() {
                return Err(LoadError::DuplicateId(student.id));
            }
        }

        for student in &students {
            let mut seen = HashSet::with_capacity(student.relations.len());
            for &relation in &student.relations {
                if relation == student.id {
                    return Err(LoadError::SelfRelation(student.id));
                }
                if !seen.insert(relation) {
                    return Err(LoadError::DuplicateRelation {
                        id: student.id,
                        relation,
                    });
                }
                if !index.contains_key(&relation) {
                    return Err(LoadError::UnknownRelation {
                        id: student.id,
                        relation,
                    });
                }
            }
        }

        debug!(students = students.len(), "loaded affinity graph");
        Ok(Self { students, index })
    }

    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.index.get(&id).map(|&pos| &self.students[pos])
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.index.contains_key(&id)
    }

    /// Students in their original input order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Whether `a` and `b` each list the other.
    pub fn is_mutual(&self, a: StudentId, b: StudentId) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.nominates(b.id) && b.nominates(a.id),
            _ => false,
        }
    }
}
