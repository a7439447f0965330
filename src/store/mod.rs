//! In-memory teacher store
//!
//! Holds the ordered list of teacher records for the lifetime of the process.
//! The store is owned by `AppState` and mutated only through the API handlers.

use serde::{Deserialize, Serialize};

/// A single teacher record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: u64,
    pub name: String,
    pub age: i64,
    pub enroll: bool,
}

/// Id assignment policy for newly created records
///
/// `LengthPlusOne` assigns new id = current store length + 1. After deletions
/// this can hand out an id that already exists in the store; that collision
/// is the documented contract, not an accident.
/// `Monotonic` is the corrected variant that never reuses an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    #[default]
    LengthPlusOne,
    Monotonic,
}

/// Ordered collection of teacher records
#[derive(Debug)]
pub struct TeacherStore {
    teachers: Vec<Teacher>,
    policy: IdPolicy,
    /// Next id handed out under the `Monotonic` policy
    next_id: u64,
}

impl TeacherStore {
    /// Create an empty store with the given id policy
    pub const fn new(policy: IdPolicy) -> Self {
        Self {
            teachers: Vec::new(),
            policy,
            next_id: 1,
        }
    }

    /// Create a store pre-populated with the demo records
    pub fn seeded(policy: IdPolicy) -> Self {
        let mut store = Self::new(policy);
        for (name, age, enroll) in [("Santiago", 27, true), ("Luis", 23, false), ("Nelson", 24, false)] {
            store.insert(name.to_string(), age, enroll);
        }
        store
    }

    /// All records in insertion order
    pub fn list(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn len(&self) -> usize {
        self.teachers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty()
    }

    /// Linear scan for a record by id
    pub fn find(&self, id: u64) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Append a new record, assigning its id per the configured policy
    pub fn insert(&mut self, name: String, age: i64, enroll: bool) -> Teacher {
        let id = self.assign_id();
        let teacher = Teacher {
            id,
            name,
            age,
            enroll,
        };
        self.teachers.push(teacher.clone());
        teacher
    }

    /// Remove a record by id, returning its snapshot
    ///
    /// The sequence is replaced wholesale with a filtered copy. If the
    /// `LengthPlusOne` policy produced duplicate ids, every record carrying
    /// the id is removed.
    pub fn remove(&mut self, id: u64) -> Option<Teacher> {
        let snapshot = self.find(id)?.clone();
        self.teachers = self
            .teachers
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        Some(snapshot)
    }

    fn assign_id(&mut self) -> u64 {
        match self.policy {
            IdPolicy::LengthPlusOne => self.teachers.len() as u64 + 1,
            IdPolicy::Monotonic => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_store_order() {
        let store = TeacherStore::seeded(IdPolicy::LengthPlusOne);
        let names: Vec<&str> = store.list().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Santiago", "Luis", "Nelson"]);
        assert_eq!(store.list()[0].id, 1);
        assert_eq!(store.list()[2].id, 3);
    }

    #[test]
    fn test_find_and_remove() {
        let mut store = TeacherStore::seeded(IdPolicy::LengthPlusOne);
        assert_eq!(store.find(2).map(|t| t.name.as_str()), Some("Luis"));

        let removed = store.remove(2).unwrap();
        assert_eq!(removed.name, "Luis");
        assert_eq!(removed.age, 23);
        assert!(!removed.enroll);
        assert_eq!(store.len(), 2);
        assert!(store.find(2).is_none());
    }

    #[test]
    fn test_remove_missing_id() {
        let mut store = TeacherStore::seeded(IdPolicy::LengthPlusOne);
        assert!(store.remove(42).is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_length_plus_one_collides_after_delete() {
        let mut store = TeacherStore::seeded(IdPolicy::LengthPlusOne);
        store.remove(2).unwrap();

        // Length is now 2, so the next record gets id 3 even though a
        // record with id 3 (Nelson) is still present.
        let created = store.insert("Danny".to_string(), 25, true);
        assert_eq!(created.id, 3);
        assert_eq!(store.list().iter().filter(|t| t.id == 3).count(), 2);
    }

    #[test]
    fn test_monotonic_never_reuses_ids() {
        let mut store = TeacherStore::seeded(IdPolicy::Monotonic);
        store.remove(2).unwrap();

        let created = store.insert("Danny".to_string(), 25, true);
        assert_eq!(created.id, 4);
        assert_eq!(store.list().iter().filter(|t| t.id == created.id).count(), 1);
    }

    #[test]
    fn test_remove_drops_duplicate_ids() {
        let mut store = TeacherStore::seeded(IdPolicy::LengthPlusOne);
        store.remove(2).unwrap();
        store.insert("Danny".to_string(), 25, true); // duplicate id 3

        store.remove(3).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.find(3).is_none());
    }
}
