//! Ace Tutor - adaptive quiz tutor library
//!
//! An AI-powered practice tool for NCEA Level 1 students:
//! - Gemini API integration for quiz generation, grading, hints, and
//!   session summaries
//! - Persistent per-topic learning profile with a running-mean mastery
//!   estimate and tracked weak areas
//! - Adaptive quiz shaping from stored progress
//! - Saved session reports with Markdown export
//!
//! # Example
//!
//! ```ignore
//! use ace_tutor::profile::{select_bias, AdaptiveBias, ProfileStore};
//!
//! let store = ProfileStore::new()?;
//! let progress = store.progress_for("algebra");
//! match select_bias(progress.as_ref()) {
//!     AdaptiveBias::TargetWeakAreas(areas) => println!("targeting {:?}", areas),
//!     bias => println!("{:?}", bias),
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod profile;
pub mod report;
pub mod security;
pub mod session;
pub mod store;
pub mod tutor;
pub mod types;

// Re-export commonly used types for convenience
pub use config::Config;
pub use profile::{select_bias, AdaptiveBias, ProfileStore};
pub use report::ReportStore;
pub use session::{LessonSession, SessionRecorder};
pub use store::StoreRead;
pub use tutor::{GeminiClient, TutorBackend, TutorError};
pub use types::{
    Feedback, Question, QuestionType, Report, SessionEntry, SessionSummary, Subject, Topic,
    TopicProgress, UserProfile,
};
