//! Shared types used across modules
//!
//! The data model for quizzes, feedback, session records, and the
//! persistent learning profile. Everything here is serde-serializable
//! because both stores persist whole values as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Subject a student can practise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    English,
    Mathematics,
}

impl Subject {
    /// All supported subjects
    pub fn all() -> &'static [Subject] {
        &[Subject::English, Subject::Mathematics]
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::English => write!(f, "English"),
            Subject::Mathematics => write!(f, "Mathematics"),
        }
    }
}

impl std::str::FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" => Ok(Subject::English),
            "mathematics" | "maths" | "math" => Ok(Subject::Mathematics),
            other => Err(format!("unknown subject '{}' (expected english or mathematics)", other)),
        }
    }
}

/// A fixed syllabus subsection a learner can practise (e.g. "Algebra").
/// Defined in the static catalog, never user-mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Kind of answer a question expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Written,
    Numeric,
}

/// One quiz item, created by the generator and immutable thereafter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question_text: String,
    pub question_type: QuestionType,
    /// Base64 PNG payload for an optional diagram, opaque to the core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

/// Feedback on one answer, polymorphic over the subject being studied.
///
/// The variant is chosen by the subject at construction time and the
/// discriminant travels with the payload, so stored reports can be read
/// back without probing field presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    /// Free-text analytical subjects (English)
    Narrative { well_done: String, to_improve: String },
    /// Objectively gradable subjects (Mathematics)
    Evaluative { is_correct: bool, explanation: String },
}

/// One answered question within a lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub question: Question,
    pub answer: String,
    pub feedback: Feedback,
}

/// Holistic evaluation of a completed lesson, produced by the external
/// summarizer over the full entry sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Overall performance, 0.0 (no understanding) to 1.0 (mastery)
    pub proficiency: f64,
    /// Up to 3 specific skills the student struggled with
    pub areas_for_improvement: Vec<String>,
}

/// One completed session's score, kept as an audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub date: DateTime<Utc>,
    pub score: f64,
}

/// Persistent learning state for one topic.
///
/// `proficiency` is the running mean of all `history` scores; `history`
/// gains exactly one entry per completed-and-summarized session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicProgress {
    pub topic_id: String,
    pub proficiency: f64,
    /// Latest known weak points, replaced wholesale each session
    pub areas_for_improvement: Vec<String>,
    pub history: Vec<ScoreEntry>,
}

impl TopicProgress {
    /// The implicit default for a topic with no completed sessions yet
    pub fn new(topic_id: impl Into<String>) -> Self {
        Self {
            topic_id: topic_id.into(),
            proficiency: 0.0,
            areas_for_improvement: Vec::new(),
            history: Vec::new(),
        }
    }
}

/// Whole learning profile: topic id → progress record
pub type UserProfile = HashMap<String, TopicProgress>;

/// A saved, reviewable record of one past session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub subject: Subject,
    pub topic_name: String,
    pub date: DateTime<Utc>,
    pub session_data: Vec<SessionEntry>,
}

/// All saved reports, newest first
pub type ReportCollection = Vec<Report>;
