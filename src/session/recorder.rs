//! Session recorder - in-memory accumulator for one lesson attempt
//!
//! Entries arrive in strict answer order and are never removed
//! individually; the recorder is cleared as a whole at the start of
//! each new lesson.

use crate::types::SessionEntry;

/// Ordered accumulator of answered questions for the active lesson
#[derive(Debug, Default)]
pub struct SessionRecorder {
    entries: Vec<SessionEntry>,
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one answered question, preserving answer order
    pub fn append(&mut self, entry: SessionEntry) {
        self.entries.push(entry);
    }

    /// The entries accumulated so far, in answer order
    pub fn snapshot(&self) -> &[SessionEntry] {
        &self.entries
    }

    /// Reset for a new lesson
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
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
                question_type: QuestionType::Written,
                image_data: None,
            },
            answer: format!("answer to {}", text),
            feedback: Feedback::Narrative {
                well_done: "Good".to_string(),
                to_improve: "More detail".to_string(),
            },
        }
    }

    #[test]
    fn test_preserves_answer_order() {
        let mut recorder = SessionRecorder::new();
        assert!(recorder.is_empty());

        recorder.append(entry("q1"));
        recorder.append(entry("q2"));
        recorder.append(entry("q3"));

        let texts: Vec<&str> = recorder
            .snapshot()
            .iter()
            .map(|e| e.question.question_text.as_str())
            .collect();
        assert_eq!(texts, vec!["q1", "q2", "q3"]);
        assert_eq!(recorder.len(), 3);
    }

    #[test]
    fn test_duplicate_entries_are_kept() {
        let mut recorder = SessionRecorder::new();
        recorder.append(entry("same"));
        recorder.append(entry("same"));
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_clear_resets_for_new_lesson() {
        let mut recorder = SessionRecorder::new();
        recorder.append(entry("q1"));
        recorder.clear();
        assert!(recorder.is_empty());
        assert!(recorder.snapshot().is_empty());
    }
}
