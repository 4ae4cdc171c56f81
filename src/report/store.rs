//! Report store - durable newest-first list of saved session reports
//!
//! One JSON document (`reports.json`) under the data directory holds the
//! whole collection. Appending synthesizes the id and date, prepends,
//! and persists best-effort: the Report is returned even when the
//! durable save silently failed, an accepted trade-off so the caller
//! can still show the saved session.

use crate::store::{read_json, write_json, StoreRead};
use crate::types::{Report, ReportCollection, SessionEntry, Subject};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

const REPORTS_FILE: &str = "reports.json";

/// Report data supplied by the caller; id and date are synthesized
#[derive(Debug, Clone)]
pub struct NewReport {
    pub subject: Subject,
    pub topic_name: String,
    pub session_data: Vec<SessionEntry>,
}

/// Persistent report collection backed by a single JSON file
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    /// Create a report store at the default data directory
    pub fn new() -> Result<Self> {
        Self::with_dir(crate::config::data_dir()?)
    }

    /// Create with a custom base directory
    pub fn with_dir(base_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_dir)
            .context("Failed to create reports directory")?;
        Ok(Self {
            path: base_dir.join(REPORTS_FILE),
        })
    }

    /// Read the collection, reporting whether it was actually loaded
    pub fn list(&self) -> StoreRead<ReportCollection> {
        read_json(&self.path)
    }

    /// Read the collection, degrading missing or corrupt data to empty
    pub fn get_all(&self) -> ReportCollection {
        self.list().or_default()
    }

    /// Find one report by id
    pub fn find(&self, id: &str) -> Option<Report> {
        self.get_all().into_iter().find(|r| r.id == id)
    }

    /// Save a new report at the head of the collection.
    ///
    /// The id is the creation time in milliseconds, matching the
    /// stored-data convention; uniqueness holds under the one-report-
    /// per-completed-lesson usage pattern.
    pub fn append(&self, data: NewReport) -> Report {
        let now = Utc::now();
        let report = Report {
            id: now.timestamp_millis().to_string(),
            subject: data.subject,
            topic_name: data.topic_name,
            date: now,
            session_data: data.session_data,
        };

        let mut reports = self.get_all();
        reports.insert(0, report.clone());
        write_json(&self.path, &reports);
        info!("Saved report {} for '{}'", report.id, report.topic_name);

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Feedback, Question, QuestionType};

    fn entry(text: &str) -> SessionEntry {
        SessionEntry {
            question: Question {
                question_text: text.to_string(),
                question_type: QuestionType::Numeric,
                image_data: None,
            },
            answer: "42".to_string(),
            feedback: Feedback::Evaluative { is_correct: true, explanation: "Correct.".to_string() },
        }
    }

    #[test]
    fn test_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::with_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.list(), StoreRead::Missing);
        assert!(store.get_all().is_empty());
        assert!(store.find("123").is_none());
    }

    #[test]
    fn test_append_synthesizes_id_and_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::with_dir(dir.path().to_path_buf()).unwrap();

        let before = Utc::now();
        let report = store.append(NewReport {
            subject: Subject::Mathematics,
            topic_name: "Algebra".to_string(),
            session_data: vec![entry("Solve 2x = 8")],
        });

        assert!(!report.id.is_empty());
        assert!(report.date >= before);
        assert_eq!(store.find(&report.id).unwrap(), report);
    }

    #[test]
    fn test_newest_first_ordering() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::with_dir(dir.path().to_path_buf()).unwrap();

        store.append(NewReport {
            subject: Subject::Mathematics,
            topic_name: "Algebra".to_string(),
            session_data: vec![entry("first")],
        });
        store.append(NewReport {
            subject: Subject::English,
            topic_name: "Unfamiliar Text".to_string(),
            session_data: vec![entry("second")],
        });

        let all = store.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].topic_name, "Unfamiliar Text");
        assert_eq!(all[1].topic_name, "Algebra");
    }

    #[test]
    fn test_collection_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let report = {
            let store = ReportStore::with_dir(dir.path().to_path_buf()).unwrap();
            store.append(NewReport {
                subject: Subject::English,
                topic_name: "Of Mice and Men: Themes".to_string(),
                session_data: vec![entry("What does the dream farm represent?")],
            })
        };

        let reopened = ReportStore::with_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get_all(), vec![report]);
    }

    #[test]
    fn test_corrupt_collection_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::with_dir(dir.path().to_path_buf()).unwrap();
        std::fs::write(dir.path().join(REPORTS_FILE), "[{]").unwrap();

        assert_eq!(store.list(), StoreRead::Unreadable);
        assert!(store.get_all().is_empty());
    }
}
