//! Lesson session - drives one lesson attempt end to end
//!
//! Serialized flow: generate the quiz, grade answers one at a time,
//! then summarize and fold the result into the learning profile. At
//! most one remote call is in flight at any moment. The stores are
//! injected so tests can run the whole flow against stub backends and
//! temp directories.

use crate::profile::ProfileStore;
use crate::report::{NewReport, ReportStore};
use crate::session::SessionRecorder;
use crate::tutor::{TutorBackend, TutorError};
use crate::types::{Feedback, Question, Report, SessionEntry, Subject, Topic, TopicProgress};
use std::sync::Arc;
use tracing::{info, warn};

/// One lesson attempt over a fixed batch of questions
pub struct LessonSession {
    subject: Subject,
    topic: Topic,
    backend: Arc<dyn TutorBackend>,
    profiles: ProfileStore,
    reports: ReportStore,
    recorder: SessionRecorder,
    questions: Vec<Question>,
    current: usize,
    completed: bool,
}

impl LessonSession {
    /// Generate the quiz and open the lesson. Generation failure aborts
    /// the lesson; nothing partial is kept.
    pub async fn start(
        subject: Subject,
        topic: Topic,
        backend: Arc<dyn TutorBackend>,
        profiles: ProfileStore,
        reports: ReportStore,
    ) -> Result<Self, TutorError> {
        let progress = profiles.progress_for(&topic.id);
        let questions = backend
            .generate_quiz(subject, &topic, progress.as_ref())
            .await?;
        info!("Started lesson on '{}' with {} questions", topic.id, questions.len());

        Ok(Self {
            subject,
            topic,
            backend,
            profiles,
            reports,
            recorder: SessionRecorder::new(),
            questions,
            current: 0,
            completed: false,
        })
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// The question currently awaiting an answer
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// 1-based position of the current question
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Entries recorded so far
    pub fn entries(&self) -> &[SessionEntry] {
        self.recorder.snapshot()
    }

    /// Grade the answer to the current question. On success the entry
    /// is recorded; on grading failure nothing is recorded and the
    /// caller may still advance to the next question.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<Feedback, TutorError> {
        let question = match self.current_question() {
            Some(q) => q.clone(),
            None => {
                return Err(TutorError::Grading(anyhow::anyhow!(
                    "no question awaiting an answer"
                )))
            }
        };

        let feedback = self
            .backend
            .grade_answer(self.subject, &self.topic, &question, answer)
            .await?;

        self.recorder.append(SessionEntry {
            question,
            answer: answer.to_string(),
            feedback: feedback.clone(),
        });

        Ok(feedback)
    }

    /// Best-effort hint for the current question
    pub async fn hint(&self) -> String {
        match self.current_question() {
            Some(question) => self.backend.hint(self.subject, &self.topic, question).await,
            None => crate::tutor::HINT_FALLBACK.to_string(),
        }
    }

    /// Move to the next question. Returns false once every question has
    /// been presented.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            true
        } else {
            self.current = self.questions.len();
            false
        }
    }

    /// Complete the lesson: summarize the recorded entries and fold the
    /// result into the profile. Summarization failure is logged and the
    /// profile is left untouched; the lesson still completes.
    pub async fn finish(&mut self) -> Option<TopicProgress> {
        let outcome = match self
            .backend
            .summarize_session(self.subject, self.recorder.snapshot())
            .await
        {
            Ok(summary) => Some(self.profiles.record_session(&self.topic.id, &summary)),
            Err(e) => {
                warn!("Failed to summarize session: {:#}", e);
                None
            }
        };

        self.completed = true;
        outcome
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Save the recorded session as a report. Explicit user action, not
    /// automatic on completion.
    pub fn save_report(&self) -> Report {
        self.reports.append(NewReport {
            subject: self.subject,
            topic_name: self.topic.name.clone(),
            session_data: self.recorder.snapshot().to_vec(),
        })
    }
}
