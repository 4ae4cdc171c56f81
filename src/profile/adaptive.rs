//! Adaptive quiz request shaping
//!
//! Decides how the next quiz generation request is biased from the
//! stored progress. Pure decision logic; the prompt text it shapes
//! lives in `tutor::prompts` and the generator call in the backend.

use crate::types::TopicProgress;

/// Mastery level above which the quiz escalates in difficulty instead
/// of staying at baseline
pub const ESCALATION_THRESHOLD: f64 = 0.75;

/// How the next quiz generation request is shaped
#[derive(Debug, Clone, PartialEq)]
pub enum AdaptiveBias {
    /// Baseline difficulty, no adaptive instruction
    Baseline,
    /// Explicitly cover each named weak area
    TargetWeakAreas(Vec<String>),
    /// Harder questions and novel variations
    EscalateDifficulty,
}

/// Pick the bias for a topic's next quiz.
///
/// Branches are mutually exclusive and checked in priority order:
/// a first-ever attempt gets a baseline quiz; recorded weaknesses win
/// over difficulty escalation; escalation applies only above the
/// mastery threshold.
pub fn select_bias(progress: Option<&TopicProgress>) -> AdaptiveBias {
    let progress = match progress {
        Some(p) if !p.history.is_empty() => p,
        _ => return AdaptiveBias::Baseline,
    };

    if !progress.areas_for_improvement.is_empty() {
        AdaptiveBias::TargetWeakAreas(progress.areas_for_improvement.clone())
    } else if progress.proficiency > ESCALATION_THRESHOLD {
        AdaptiveBias::EscalateDifficulty
    } else {
        AdaptiveBias::Baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScoreEntry;
    use chrono::Utc;

    fn progress(proficiency: f64, areas: &[&str], sessions: usize) -> TopicProgress {
        TopicProgress {
            topic_id: "algebra".to_string(),
            proficiency,
            areas_for_improvement: areas.iter().map(|s| s.to_string()).collect(),
            history: (0..sessions)
                .map(|_| ScoreEntry { date: Utc::now(), score: proficiency })
                .collect(),
        }
    }

    #[test]
    fn test_no_record_is_baseline() {
        assert_eq!(select_bias(None), AdaptiveBias::Baseline);
    }

    #[test]
    fn test_empty_history_is_baseline() {
        // A record can exist with no completed sessions; still baseline,
        // even with leftover weak areas or high proficiency.
        let p = progress(0.9, &["something"], 0);
        assert_eq!(select_bias(Some(&p)), AdaptiveBias::Baseline);
    }

    #[test]
    fn test_weak_areas_take_priority_over_escalation() {
        let p = progress(0.95, &["Pythagoras", "rearranging"], 4);
        assert_eq!(
            select_bias(Some(&p)),
            AdaptiveBias::TargetWeakAreas(vec!["Pythagoras".to_string(), "rearranging".to_string()])
        );
    }

    #[test]
    fn test_high_proficiency_escalates() {
        let p = progress(0.8, &[], 3);
        assert_eq!(select_bias(Some(&p)), AdaptiveBias::EscalateDifficulty);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let p = progress(ESCALATION_THRESHOLD, &[], 3);
        assert_eq!(select_bias(Some(&p)), AdaptiveBias::Baseline);
    }

    #[test]
    fn test_moderate_proficiency_no_weaknesses_is_baseline() {
        let p = progress(0.5, &[], 2);
        assert_eq!(select_bias(Some(&p)), AdaptiveBias::Baseline);
    }
}
