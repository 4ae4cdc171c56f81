//! External AI collaborator: quiz generation, grading, hints, summaries
//!
//! `TutorBackend` is the seam between the lesson flow and the remote
//! model. The production implementation is `GeminiClient`; tests drive
//! the flow with stub backends.

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

use crate::types::{Feedback, Question, SessionEntry, SessionSummary, Subject, Topic, TopicProgress};
use async_trait::async_trait;

/// Static apology shown when a hint cannot be fetched
pub const HINT_FALLBACK: &str = "Sorry, could not fetch a hint right now.";

/// Failures from the remote collaborator, classified by how the lesson
/// flow must react to them
#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    /// Fatal to starting the lesson; the user retries the whole action
    #[error("Failed to generate quiz. Please try again.")]
    Generation(#[source] anyhow::Error),

    /// Local to one answer; the session continues with no feedback
    /// recorded for it
    #[error("Could not get feedback. Please proceed to the next question.")]
    Grading(#[source] anyhow::Error),

    /// Caught by the caller; the lesson completes without a profile
    /// update
    #[error("Failed to summarize session performance")]
    Summarization(#[source] anyhow::Error),
}

/// Remote generation/grading contract. Long-latency calls; the lesson
/// flow issues at most one at a time.
#[async_trait]
pub trait TutorBackend: Send + Sync {
    /// Generate a 5-question quiz for a topic, shaped by the stored
    /// progress (see `profile::select_bias`). Any error aborts quiz
    /// generation.
    async fn generate_quiz(
        &self,
        subject: Subject,
        topic: &Topic,
        progress: Option<&TopicProgress>,
    ) -> Result<Vec<Question>, TutorError>;

    /// Grade one answer, producing the feedback variant matching the
    /// subject.
    async fn grade_answer(
        &self,
        subject: Subject,
        topic: &Topic,
        question: &Question,
        answer: &str,
    ) -> Result<Feedback, TutorError>;

    /// Best-effort hint; degrades to `HINT_FALLBACK` on failure.
    async fn hint(&self, subject: Subject, topic: &Topic, question: &Question) -> String;

    /// Holistic evaluation of a completed lesson.
    async fn summarize_session(
        &self,
        subject: Subject,
        entries: &[SessionEntry],
    ) -> Result<SessionSummary, TutorError>;
}
