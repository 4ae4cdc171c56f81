//! Markdown export for saved reports
//!
//! Renders a report to a reviewable Markdown document: header, then one
//! block per question with the answer and the feedback it received.
//! Question diagrams are decoded from their base64 payloads into PNG
//! files next to the document.

use crate::types::{Feedback, Report};
use anyhow::{Context, Result};
use base64::Engine;
use std::path::{Path, PathBuf};

/// Render a report as a Markdown document. Diagram images are referenced
/// by the file names `export_report` writes next to the document.
pub fn render_markdown(report: &Report) -> String {
    let mut doc = String::with_capacity(4096);

    doc.push_str("# Ace Tutor Session Report\n\n");
    doc.push_str(&format!("- **Subject**: {}\n", report.subject));
    doc.push_str(&format!("- **Topic**: {}\n", report.topic_name));
    doc.push_str(&format!(
        "- **Date**: {}\n\n",
        report.date.format("%Y-%m-%d %H:%M UTC")
    ));

    for (index, entry) in report.session_data.iter().enumerate() {
        doc.push_str("---\n\n");
        doc.push_str(&format!("## Question {}\n\n", index + 1));

        if entry.question.image_data.is_some() {
            doc.push_str(&format!("![diagram]({})\n\n", image_file_name(report, index)));
        }

        doc.push_str(&format!("{}\n\n", entry.question.question_text));
        doc.push_str("**Your Answer:**\n\n");
        if entry.answer.is_empty() {
            doc.push_str("(No answer provided)\n\n");
        } else {
            doc.push_str(&format!("{}\n\n", entry.answer));
        }

        doc.push_str("**Feedback:**\n\n");
        match &entry.feedback {
            Feedback::Narrative { well_done, to_improve } => {
                doc.push_str(&format!("*What you did well:* {}\n\n", well_done));
                doc.push_str(&format!("*How to improve:* {}\n\n", to_improve));
            }
            Feedback::Evaluative { is_correct, explanation } => {
                let verdict = if *is_correct { "Correct" } else { "Incorrect" };
                doc.push_str(&format!("**{}**\n\n", verdict));
                doc.push_str(&format!("*Explanation:* {}\n\n", explanation));
            }
        }
    }

    doc
}

/// File name for the exported document
pub fn report_file_name(report: &Report) -> String {
    format!("ace-tutor-report-{}.md", report.topic_name.replace(' ', "_"))
}

fn image_file_name(report: &Report, index: usize) -> String {
    format!("ace-tutor-report-{}-q{}.png", report.id, index + 1)
}

/// Write the Markdown document (and any decoded diagrams) into `dir`,
/// returning the document path.
pub fn export_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).context("Failed to create export directory")?;

    for (index, entry) in report.session_data.iter().enumerate() {
        if let Some(data) = &entry.question.image_data {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(data)
                .with_context(|| format!("Invalid image data on question {}", index + 1))?;
            let path = dir.join(image_file_name(report, index));
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    let path = dir.join(report_file_name(report));
    std::fs::write(&path, render_markdown(report))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Question, QuestionType, SessionEntry, Subject};
    use chrono::Utc;

    fn sample_report() -> Report {
        Report {
            id: "1724380000000".to_string(),
            subject: Subject::Mathematics,
            topic_name: "Trigonometry".to_string(),
            date: Utc::now(),
            session_data: vec![
                SessionEntry {
                    question: Question {
                        question_text: "Find the hypotenuse of a 3-4-? triangle.".to_string(),
                        question_type: QuestionType::Numeric,
                        // 1x1 transparent PNG
                        image_data: Some("iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==".to_string()),
                    },
                    answer: "5".to_string(),
                    feedback: Feedback::Evaluative { is_correct: true, explanation: "Pythagoras: sqrt(9 + 16) = 5.".to_string() },
                },
                SessionEntry {
                    question: Question {
                        question_text: "Explain when to use the sine rule.".to_string(),
                        question_type: QuestionType::Written,
                        image_data: None,
                    },
                    answer: String::new(),
                    feedback: Feedback::Narrative {
                        well_done: "You attempted the question.".to_string(),
                        to_improve: "Name the matching angle-side pairs.".to_string(),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_render_contains_all_sections() {
        let doc = render_markdown(&sample_report());
        assert!(doc.contains("# Ace Tutor Session Report"));
        assert!(doc.contains("**Subject**: Mathematics"));
        assert!(doc.contains("## Question 1"));
        assert!(doc.contains("## Question 2"));
        assert!(doc.contains("**Correct**"));
        assert!(doc.contains("(No answer provided)"));
        assert!(doc.contains("What you did well"));
    }

    #[test]
    fn test_export_writes_document_and_images() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report();

        let path = export_report(&report, dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "ace-tutor-report-Trigonometry.md"
        );

        let image = dir.path().join(format!("ace-tutor-report-{}-q1.png", report.id));
        assert!(image.exists(), "decoded diagram missing");
        // PNG magic bytes
        let bytes = std::fs::read(image).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_export_rejects_invalid_image_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = sample_report();
        report.session_data[0].question.image_data = Some("not base64!!".to_string());

        assert!(export_report(&report, dir.path()).is_err());
    }
}
