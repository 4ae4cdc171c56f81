//! Profile store - persistent learning profile keyed by topic
//!
//! One JSON document (`profile.json`) under the data directory holds the
//! whole `UserProfile`. Reads never fail from the caller's perspective
//! and writes are best-effort; see the `store` module for the degraded
//! semantics.

use crate::profile::engine;
use crate::store::{read_json, write_json, StoreRead};
use crate::types::{SessionSummary, TopicProgress, UserProfile};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

const PROFILE_FILE: &str = "profile.json";

/// Persistent learning profile backed by a single JSON file
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Create a profile store at the default data directory
    pub fn new() -> Result<Self> {
        Self::with_dir(crate::config::data_dir()?)
    }

    /// Create with a custom base directory
    pub fn with_dir(base_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_dir)
            .context("Failed to create profile directory")?;
        Ok(Self {
            path: base_dir.join(PROFILE_FILE),
        })
    }

    /// Read the profile, reporting whether it was actually loaded
    pub fn load(&self) -> StoreRead<UserProfile> {
        read_json(&self.path)
    }

    /// Read the profile, degrading missing or corrupt data to empty
    pub fn get(&self) -> UserProfile {
        self.load().or_default()
    }

    /// Overwrite the stored profile. Persistence failure is logged and
    /// swallowed; the in-memory value stands for the rest of the process.
    pub fn put(&self, profile: &UserProfile) {
        write_json(&self.path, profile);
    }

    /// Progress for one topic, if any sessions were ever recorded
    pub fn progress_for(&self, topic_id: &str) -> Option<TopicProgress> {
        self.get().get(topic_id).cloned()
    }

    /// Fold a session summary into the topic's progress and persist.
    /// Creates the record lazily on the first completed session.
    pub fn record_session(&self, topic_id: &str, summary: &SessionSummary) -> TopicProgress {
        let mut profile = self.get();
        let current = profile
            .get(topic_id)
            .cloned()
            .unwrap_or_else(|| TopicProgress::new(topic_id));

        let updated = engine::apply_summary(&current, summary);
        info!(
            "Updated progress for '{}': proficiency {:.2} after {} session(s)",
            topic_id,
            updated.proficiency,
            updated.history.len()
        );

        profile.insert(topic_id.to_string(), updated.clone());
        self.put(&profile);
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(proficiency: f64, areas: &[&str]) -> SessionSummary {
        SessionSummary {
            proficiency,
            areas_for_improvement: areas.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_store_reads_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::with_dir(dir.path().to_path_buf()).unwrap();

        assert_eq!(store.load(), StoreRead::Missing);
        assert!(store.get().is_empty());
        assert!(store.progress_for("algebra").is_none());
    }

    #[test]
    fn test_record_session_creates_record_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::with_dir(dir.path().to_path_buf()).unwrap();

        let updated = store.record_session("algebra", &summary(0.6, &["X"]));
        assert!((updated.proficiency - 0.6).abs() < 1e-9);

        // Durable: a fresh read sees the same record
        let reread = store.progress_for("algebra").unwrap();
        assert_eq!(reread, updated);
        assert!(store.load().is_loaded());
    }

    #[test]
    fn test_record_session_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::with_dir(dir.path().to_path_buf()).unwrap();

        store.record_session("algebra", &summary(0.5, &["fractions"]));
        let second = store.record_session("algebra", &summary(1.0, &[]));

        assert!((second.proficiency - 0.75).abs() < 1e-9);
        assert_eq!(second.history.len(), 2);
        assert!(second.areas_for_improvement.is_empty());

        // Other topics are untouched
        store.record_session("trigonometry", &summary(0.3, &["sine rule"]));
        let profile = store.get();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile["algebra"].history.len(), 2);
        assert_eq!(profile["trigonometry"].history.len(), 1);
    }

    #[test]
    fn test_corrupt_profile_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::with_dir(dir.path().to_path_buf()).unwrap();
        std::fs::write(dir.path().join(PROFILE_FILE), "{{{{").unwrap();

        assert_eq!(store.load(), StoreRead::Unreadable);
        assert!(store.get().is_empty());

        // A session recorded over a corrupt store starts from scratch
        let updated = store.record_session("algebra", &summary(0.4, &[]));
        assert_eq!(updated.history.len(), 1);
    }
}
