//! Proficiency update engine
//!
//! Folds one session summary into a topic's progress record. The
//! displayed proficiency is an unweighted running mean over all session
//! scores, recomputed incrementally from the count and the current mean
//! so one harsh or lenient AI grading cannot swing the estimate.

use crate::types::{ScoreEntry, SessionSummary, TopicProgress};
use chrono::Utc;

/// Compute the new progress record after a completed session.
///
/// The mean update is `(p * n + s) / (n + 1)` with `n` the number of
/// prior sessions. Clamping to [0, 1] is kept even though the mean of
/// in-range inputs cannot leave the range; it is part of the contract.
/// The weak-area list is replaced, not merged: the intent is "most
/// recent weaknesses", since skills rotate in and out as the student
/// improves.
pub fn apply_summary(current: &TopicProgress, summary: &SessionSummary) -> TopicProgress {
    let n = current.history.len() as f64;
    let new_proficiency = (current.proficiency * n + summary.proficiency) / (n + 1.0);

    let mut history = current.history.clone();
    history.push(ScoreEntry {
        date: Utc::now(),
        score: summary.proficiency,
    });

    TopicProgress {
        topic_id: current.topic_id.clone(),
        proficiency: new_proficiency.clamp(0.0, 1.0),
        areas_for_improvement: summary.areas_for_improvement.clone(),
        history,
    }
}
