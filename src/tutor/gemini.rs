//! Gemini API client for quiz generation, grading, hints, and summaries
//!
//! All structured calls use the generateContent endpoint with a JSON
//! response schema so the model output parses directly into the typed
//! payloads. Mathematics questions may carry an image prompt that a
//! second call to the image model resolves into base64 diagram data.

use crate::config::{Config, ModelsConfig};
use crate::profile::select_bias;
use crate::tutor::{prompts, TutorBackend, TutorError, HINT_FALLBACK};
use crate::types::{
    Feedback, Question, QuestionType, SessionEntry, SessionSummary, Subject, Topic, TopicProgress,
};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini REST API client
#[derive(Clone)]
pub struct GeminiClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    models: ModelsConfig,
}

/// Quiz item as the generator returns it, before image resolution
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuizItem {
    question_text: String,
    question_type: QuestionType,
    #[serde(default)]
    image_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNarrative {
    well_done: String,
    to_improve: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvaluative {
    is_correct: bool,
    explanation: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSummary {
    proficiency: f64,
    #[serde(default)]
    areas_for_improvement: Vec<String>,
}

fn quiz_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "questionText": {
                    "type": "STRING",
                    "description": "The full text of the quiz question."
                },
                "questionType": {
                    "type": "STRING",
                    "enum": ["written", "numeric"],
                    "description": "The type of question, written for English or numeric for Maths."
                },
                "imagePrompt": {
                    "type": "STRING",
                    "description": "A detailed prompt for an AI image generator to create a diagram for this question. Only include this field if an image is genuinely helpful."
                }
            },
            "required": ["questionText", "questionType"]
        }
    })
}

fn narrative_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "wellDone": {
                "type": "STRING",
                "description": "Positive feedback on what the student did well. Be encouraging."
            },
            "toImprove": {
                "type": "STRING",
                "description": "Constructive, actionable advice on structure, evidence, and analysis to reach an 'Excellence' grade."
            }
        },
        "required": ["wellDone", "toImprove"]
    })
}

fn evaluative_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "isCorrect": {
                "type": "BOOLEAN",
                "description": "Whether the student's answer is mathematically correct."
            },
            "explanation": {
                "type": "STRING",
                "description": "A step-by-step explanation of the correct answer, noting the student's likely mistake if they were wrong."
            }
        },
        "required": ["isCorrect", "explanation"]
    })
}

fn summary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "proficiency": {
                "type": "NUMBER",
                "description": "A score from 0.0 (no understanding) to 1.0 (mastery) for the student's overall performance this session."
            },
            "areasForImprovement": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Up to 3 specific skills or concepts the student struggled with during the session."
            }
        },
        "required": ["proficiency", "areasForImprovement"]
    })
}

impl GeminiClient {
    /// Create a client with the default model assignments
    pub fn new(api_key: String) -> Self {
        Self::with_models(api_key, ModelsConfig::default())
    }

    /// Create a client with explicit model assignments
    pub fn with_models(api_key: String, models: ModelsConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            models,
        }
    }

    /// Create a client from config (API key from env/keyring)
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = crate::security::get_api_key()?;
        Ok(Self::with_models(api_key, config.models.clone()))
    }

    /// Send a generateContent request and return the concatenated text
    /// parts of the first candidate
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        generation_config: Option<Value>,
    ) -> Result<String> {
        let raw = self.generate_raw(model, prompt, generation_config).await?;

        let text = first_candidate_parts(&raw)
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            bail!("Gemini returned no text content for model {}", model);
        }
        Ok(text)
    }

    /// Structured call: JSON response schema, parsed into `T`
    async fn generate_structured<T: serde::de::DeserializeOwned>(
        &self,
        model: &str,
        prompt: &str,
        schema: Value,
        temperature: Option<f32>,
    ) -> Result<T> {
        let mut config = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
        if let Some(t) = temperature {
            config["temperature"] = json!(t);
        }

        let text = self.generate_content(model, prompt, Some(config)).await?;
        serde_json::from_str(text.trim())
            .with_context(|| format!("Failed to parse structured response from {}", model))
    }

    /// Ask the image model for a diagram, returning its base64 payload
    /// if one came back
    async fn generate_image(&self, image_prompt: &str) -> Result<Option<String>> {
        let config = json!({ "responseModalities": ["IMAGE"] });
        let raw = self
            .generate_raw(&self.models.image, image_prompt, Some(config))
            .await?;

        let data = first_candidate_parts(&raw).and_then(|parts| {
            parts.iter().find_map(|part| {
                part.get("inlineData")
                    .and_then(|d| d.get("data"))
                    .and_then(|d| d.as_str())
                    .map(|s| s.to_string())
            })
        });

        Ok(data)
    }

    async fn generate_raw(
        &self,
        model: &str,
        prompt: &str,
        generation_config: Option<Value>,
    ) -> Result<Value> {
        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        if let Some(config) = generation_config {
            body["generationConfig"] = config;
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to the Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Gemini API error ({}): {}", status, body);
        }

        let body = response.text().await.context("Failed to read response body")?;
        serde_json::from_str(&body).context("Failed to parse Gemini response as JSON")
    }

    /// Resolve image prompts into question diagrams. An image failure is
    /// not fatal; the question is kept without a diagram.
    async fn resolve_images(&self, items: Vec<RawQuizItem>) -> Vec<Question> {
        let mut questions = Vec::with_capacity(items.len());
        for item in items {
            let image_data = match &item.image_prompt {
                Some(prompt) => match self.generate_image(prompt).await {
                    Ok(Some(data)) => Some(data),
                    Ok(None) => {
                        warn!("Image model returned no diagram for prompt: {}", prompt);
                        None
                    }
                    Err(e) => {
                        warn!("Failed to generate diagram: {:#}", e);
                        None
                    }
                },
                None => None,
            };
            questions.push(Question {
                question_text: item.question_text,
                question_type: item.question_type,
                image_data,
            });
        }
        questions
    }
}

/// Navigate to `candidates[0].content.parts`
fn first_candidate_parts(raw: &Value) -> Option<&Vec<Value>> {
    raw.get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
}

#[async_trait]
impl TutorBackend for GeminiClient {
    async fn generate_quiz(
        &self,
        subject: Subject,
        topic: &Topic,
        progress: Option<&TopicProgress>,
    ) -> Result<Vec<Question>, TutorError> {
        let base = prompts::base_quiz_prompt(subject, topic);
        let bias = select_bias(progress);
        let proficiency = progress.map(|p| p.proficiency).unwrap_or(0.0);
        let prompt = prompts::apply_bias(&base, proficiency, &bias);
        debug!("Generating quiz for '{}' with bias {:?}", topic.id, bias);

        let items: Vec<RawQuizItem> = self
            .generate_structured(&self.models.quiz, &prompt, quiz_schema(), Some(0.8))
            .await
            .map_err(TutorError::Generation)?;

        let questions = match subject {
            Subject::Mathematics => self.resolve_images(items).await,
            Subject::English => items
                .into_iter()
                .map(|item| Question {
                    question_text: item.question_text,
                    question_type: item.question_type,
                    image_data: None,
                })
                .collect(),
        };

        Ok(questions)
    }

    async fn grade_answer(
        &self,
        subject: Subject,
        topic: &Topic,
        question: &Question,
        answer: &str,
    ) -> Result<Feedback, TutorError> {
        match subject {
            Subject::English => {
                let prompt = prompts::grading_prompt_english(topic, &question.question_text, answer);
                let raw: RawNarrative = self
                    .generate_structured(&self.models.feedback, &prompt, narrative_schema(), Some(0.5))
                    .await
                    .map_err(TutorError::Grading)?;
                Ok(Feedback::Narrative {
                    well_done: raw.well_done,
                    to_improve: raw.to_improve,
                })
            }
            Subject::Mathematics => {
                let prompt = prompts::grading_prompt_maths(&question.question_text, answer);
                let raw: RawEvaluative = self
                    .generate_structured(&self.models.fast, &prompt, evaluative_schema(), None)
                    .await
                    .map_err(TutorError::Grading)?;
                Ok(Feedback::Evaluative {
                    is_correct: raw.is_correct,
                    explanation: raw.explanation,
                })
            }
        }
    }

    async fn hint(&self, subject: Subject, topic: &Topic, question: &Question) -> String {
        let prompt = prompts::hint_prompt(subject, topic, &question.question_text);
        match self.generate_content(&self.models.fast, &prompt, None).await {
            Ok(hint) => hint.trim().to_string(),
            Err(e) => {
                warn!("Failed to fetch hint: {:#}", e);
                HINT_FALLBACK.to_string()
            }
        }
    }

    async fn summarize_session(
        &self,
        subject: Subject,
        entries: &[SessionEntry],
    ) -> Result<SessionSummary, TutorError> {
        let session_json = serde_json::to_string_pretty(entries)
            .context("Failed to serialize session entries")
            .map_err(TutorError::Summarization)?;

        let prompt = prompts::summary_prompt(subject, &session_json);
        let raw: RawSummary = self
            .generate_structured(&self.models.quiz, &prompt, summary_schema(), None)
            .await
            .map_err(TutorError::Summarization)?;

        Ok(SessionSummary {
            proficiency: raw.proficiency,
            areas_for_improvement: raw.areas_for_improvement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_quiz_item_parses_generator_output() {
        let json = r#"[
            {"questionText": "Solve x + 1 = 3", "questionType": "numeric"},
            {"questionText": "Label the triangle", "questionType": "numeric", "imagePrompt": "A right-angled triangle"}
        ]"#;
        let items: Vec<RawQuizItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].question_type, QuestionType::Numeric);
        assert!(items[0].image_prompt.is_none());
        assert_eq!(items[1].image_prompt.as_deref(), Some("A right-angled triangle"));
    }

    #[test]
    fn test_raw_summary_defaults_missing_areas() {
        let raw: RawSummary = serde_json::from_str(r#"{"proficiency": 0.7}"#).unwrap();
        assert!((raw.proficiency - 0.7).abs() < 1e-9);
        assert!(raw.areas_for_improvement.is_empty());
    }

    #[test]
    fn test_first_candidate_parts_navigation() {
        let raw = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hello " }, { "text": "world" }] }
            }]
        });
        let parts = first_candidate_parts(&raw).unwrap();
        assert_eq!(parts.len(), 2);

        assert!(first_candidate_parts(&json!({ "candidates": [] })).is_none());
        assert!(first_candidate_parts(&json!({})).is_none());
    }

    #[test]
    fn test_schemas_are_well_formed() {
        for schema in [quiz_schema(), narrative_schema(), evaluative_schema(), summary_schema()] {
            assert!(schema.get("type").is_some());
        }
        assert_eq!(quiz_schema()["type"], "ARRAY");
        assert_eq!(summary_schema()["required"][0], "proficiency");
    }
}
