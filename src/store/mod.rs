//! Persistence surface.
//!
//! The core never does I/O itself; hosts hand it a [`KvStore`] and the
//! typed [`LearnerStore`] wrapper reads and writes one logical record per
//! key. Last write wins; every operation degrades to a sensible default
//! when a record is missing.

pub mod keys;

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::mastery::update_mastery;
use crate::types::{LevelRecord, MasteryRecord, PlacementArchive, PlanItem, SessionState, Subject};

/// Durable key-value storage supplied by the host application. A single
/// learner owns their keys, so no guarantees beyond read-your-writes and
/// last-write-wins are required.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn put(&self, key: &str, value: Value);
    fn remove(&self, key: &str);
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }
    fn put(&self, key: &str, value: Value) {
        (**self).put(key, value)
    }
    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// In-memory store, used in tests and as the default for hosts without a
/// durable backend.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: Value) {
        self.entries.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

/// Typed view over a [`KvStore`] for one learner's records.
pub struct LearnerStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> LearnerStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.store
            .get(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    fn write<T: Serialize>(&self, key: &str, record: &T) {
        match serde_json::to_value(record) {
            Ok(value) => self.store.put(key, value),
            Err(err) => tracing::warn!(key, error = %err, "failed to serialize record"),
        }
    }

    // ---- diagnostic session ----

    pub fn load_session(&self, subject: Subject) -> Option<SessionState> {
        self.read(&keys::session_key(subject))
    }

    pub fn save_session(&self, state: &SessionState) {
        self.write(&keys::session_key(state.subject), state);
    }

    /// Sessions are transient; drop the record once a placement exists.
    pub fn clear_session(&self, subject: Subject) {
        self.store.remove(&keys::session_key(subject));
    }

    // ---- placement + level ----

    pub fn load_placement(&self, subject: Subject) -> Option<PlacementArchive> {
        self.read(&keys::placement_key(subject))
    }

    pub fn save_placement(&self, archive: &PlacementArchive) {
        self.write(&keys::placement_key(archive.placement.subject), archive);
    }

    pub fn load_level(&self, subject: Subject) -> Option<LevelRecord> {
        self.read(&keys::level_key(subject))
    }

    pub fn save_level(&self, level: &LevelRecord) {
        self.write(&keys::level_key(level.subject), level);
    }

    // ---- mastery ----

    /// Missing record means "never practiced": an empty map, not an error.
    pub fn load_mastery(&self, subject: Subject) -> HashMap<String, MasteryRecord> {
        self.read(&keys::mastery_key(subject)).unwrap_or_default()
    }

    pub fn save_mastery(&self, subject: Subject, records: &HashMap<String, MasteryRecord>) {
        self.write(&keys::mastery_key(subject), records);
    }

    /// Load-update-save one practice outcome for a skill.
    pub fn record_practice(
        &self,
        subject: Subject,
        skill_id: &str,
        correct: bool,
        today: NaiveDate,
    ) -> MasteryRecord {
        let mut records = self.load_mastery(subject);
        let record = update_mastery(&mut records, skill_id, correct, today);
        self.save_mastery(subject, &records);
        record
    }

    // ---- plan ----

    pub fn load_plan(&self, subject: Subject) -> Vec<PlanItem> {
        self.read(&keys::plan_key(subject)).unwrap_or_default()
    }

    pub fn save_plan(&self, subject: Subject, items: &[PlanItem]) {
        self.write(&keys::plan_key(subject), &items);
    }
}
