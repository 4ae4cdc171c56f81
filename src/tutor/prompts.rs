//! Prompt builders for the Gemini calls
//!
//! Base quiz prompts per subject/topic plus the adaptive instruction
//! layered on top when stored progress biases the request.

use crate::profile::AdaptiveBias;
use crate::types::{Subject, Topic};

/// Topic id that gets the unfamiliar-text treatment (generated passage
/// embedded in every question)
const UNFAMILIAR_TEXT_TOPIC: &str = "unfamiliar-text";

/// Baseline quiz prompt for a subject/topic
pub fn base_quiz_prompt(subject: Subject, topic: &Topic) -> String {
    match subject {
        Subject::English => {
            if topic.id == UNFAMILIAR_TEXT_TOPIC {
                "Generate a 5-question quiz for an NCEA Level 1 English student in New Zealand \
                 on analyzing an unfamiliar text. First, create a short, engaging, previously \
                 unpublished text (a short poem, a prose excerpt, or a non-fiction snippet) \
                 suitable for a year-11 student, around 150-200 words. Then generate 5 \
                 analytical questions based on this text, focusing on language features, the \
                 author's purpose, and effect on the reader. For EACH question, the \
                 'questionText' field MUST contain the full unfamiliar text followed by the \
                 specific question, so the student has the context for every question."
                    .to_string()
            } else {
                format!(
                    "Generate a 5-question quiz for an NCEA Level 1 English student in New \
                     Zealand. The questions must be based on the novel 'Of Mice and Men' by \
                     John Steinbeck, focusing on the topic of \"{}\". Questions should require \
                     written, analytical answers suitable for aiming for an 'Excellence' \
                     grade. Keep vocabulary appropriate for a year-11 student.",
                    topic.name
                )
            }
        }
        Subject::Mathematics => format!(
            "Generate a 5-question quiz for an NCEA Level 1 Mathematics student in New \
             Zealand. The questions must cover the '{}' topic (e.g. NCEA Achievement \
             Standard AS91027 for Algebra), at a difficulty suitable for aiming for an \
             'Excellence' grade. Questions should have a numeric or simplified expression \
             as the answer. For each question, if a visual diagram would help the student \
             understand the problem, provide a detailed prompt for an AI image generator \
             in the 'imagePrompt' field; otherwise omit the field.",
            topic.name
        ),
    }
}

/// Wrap the base prompt with the adaptive instruction for the chosen
/// bias. `Baseline` leaves the request unshaped.
pub fn apply_bias(base: &str, proficiency: f64, bias: &AdaptiveBias) -> String {
    let instruction = match bias {
        AdaptiveBias::Baseline => return base.to_string(),
        AdaptiveBias::TargetWeakAreas(areas) => format!(
            "Their previous sessions indicate they need to work on the following areas: {}. \
             Please create a quiz that specifically targets these areas to help them improve.",
            areas.join(", ")
        ),
        AdaptiveBias::EscalateDifficulty => "They are doing well. Please generate a quiz with \
             more challenging questions to push them towards a deeper understanding and \
             prepare them for 'Excellence' level responses. Introduce complexity or \
             variations they may not have seen before."
            .to_string(),
    };

    format!(
        "You are an adaptive learning tutor for NCEA Level 1. This student has a current \
         mastery level of {:.0}% on this topic. {} Here is the original request for the \
         quiz: \"{}\"",
        proficiency * 100.0,
        instruction,
        base
    )
}

/// Grading prompt producing narrative feedback for English answers
pub fn grading_prompt_english(topic: &Topic, question: &str, answer: &str) -> String {
    if topic.id == UNFAMILIAR_TEXT_TOPIC {
        format!(
            "As an expert NCEA Level 1 English examiner in New Zealand, analyze the \
             following student response to an unfamiliar text question.\n\
             Full Context (Text and Question): \"{}\"\n\
             Student's Answer: \"{}\"\n\n\
             Provide feedback to help the student achieve an 'Excellence' grade, focusing \
             on the quality of analysis, use of evidence from the text provided in the \
             question, and understanding of language features. Keep your tone supportive \
             and constructive, structured for a year-11 student.",
            question, answer
        )
    } else {
        format!(
            "As an expert NCEA Level 1 English examiner in New Zealand, analyze the \
             following student response.\n\
             Familiar Text: 'Of Mice and Men' by John Steinbeck.\n\
             Question: \"{}\"\n\
             Student's Answer: \"{}\"\n\n\
             Provide feedback to help the student achieve an 'Excellence' grade. Keep your \
             tone supportive and constructive, structured for a year-11 student.",
            question, answer
        )
    }
}

/// Grading prompt producing an evaluative verdict for Maths answers
pub fn grading_prompt_maths(question: &str, answer: &str) -> String {
    format!(
        "As an NCEA Level 1 Mathematics tutor, evaluate the student's answer to the \
         following question.\n\
         Question: \"{}\"\n\
         Student's Answer: \"{}\"\n\n\
         Determine if the answer is correct and provide a clear, step-by-step explanation \
         for the solution. If the student's answer is wrong, gently point out the likely \
         error.",
        question, answer
    )
}

/// Hint prompt for either subject
pub fn hint_prompt(subject: Subject, topic: &Topic, question: &str) -> String {
    let context = match subject {
        Subject::Mathematics => String::new(),
        Subject::English => {
            if topic.id == UNFAMILIAR_TEXT_TOPIC {
                " This question is about analyzing an unfamiliar text; the hint should \
                 direct them to a specific language feature or the author's purpose \
                 without revealing the analysis."
                    .to_string()
            } else {
                format!(
                    " The question is about the novel 'Of Mice and Men' focusing on {}. \
                     The hint should prompt their thinking about key themes, characters, \
                     or literary devices to consider.",
                    topic.name
                )
            }
        }
    };

    format!(
        "A student is stuck on this NCEA Level 1 {} problem: \"{}\".{} Provide one \
         single, meaningful hint to guide them toward the solution without giving away \
         the final answer.",
        subject, question, context
    )
}

/// Session summary prompt over the full entry sequence (serialized as
/// JSON so the evaluator sees questions, answers, and feedback together)
pub fn summary_prompt(subject: Subject, session_json: &str) -> String {
    format!(
        "As an expert NCEA Level 1 {} tutor, analyze the following completed learning \
         session of questions, the student's answers, and the feedback they received. \
         Provide a holistic evaluation of the student's performance:\n\
         1. Calculate a single 'proficiency' score from 0.0 (no understanding) to 1.0 \
         (complete mastery). For Mathematics, base this heavily on correctness; for \
         English, on the quality of analysis and detail shown in the answers.\n\
         2. Identify up to 3 specific, concise 'areasForImprovement' as actionable \
         skills (e.g. 'Using textual evidence to support claims').\n\n\
         Session Data:\n{}",
        subject, session_json
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_baseline_bias_leaves_prompt_unshaped() {
        let topic = catalog::find_topic(Subject::Mathematics, "algebra").unwrap();
        let base = base_quiz_prompt(Subject::Mathematics, topic);
        assert_eq!(apply_bias(&base, 0.5, &AdaptiveBias::Baseline), base);
    }

    #[test]
    fn test_weak_area_bias_names_each_area() {
        let topic = catalog::find_topic(Subject::Mathematics, "algebra").unwrap();
        let base = base_quiz_prompt(Subject::Mathematics, topic);
        let bias = AdaptiveBias::TargetWeakAreas(vec![
            "Expanding brackets".to_string(),
            "Factorising".to_string(),
        ]);

        let shaped = apply_bias(&base, 0.42, &bias);
        assert!(shaped.contains("Expanding brackets, Factorising"));
        assert!(shaped.contains("mastery level of 42%"));
        assert!(shaped.contains(&base));
    }

    #[test]
    fn test_escalation_bias_requests_harder_questions() {
        let topic = catalog::find_topic(Subject::English, "of-mice-and-men-themes").unwrap();
        let base = base_quiz_prompt(Subject::English, topic);
        let shaped = apply_bias(&base, 0.8, &AdaptiveBias::EscalateDifficulty);
        assert!(shaped.contains("more challenging questions"));
    }

    #[test]
    fn test_unfamiliar_text_prompt_embeds_passage_requirement() {
        let topic = catalog::find_topic(Subject::English, "unfamiliar-text").unwrap();
        let prompt = base_quiz_prompt(Subject::English, topic);
        assert!(prompt.contains("150-200 words"));
        assert!(prompt.contains("questionText"));
    }
}
