//! AI grading and flashcard generation over a text-generation service.
//!
//! One prompt in, plain text out. The response contract is three
//! labeled lines (`Grade:` / `Explanation:` / `Feedback:`) for grading
//! and an embedded JSON array for generation; both parsers live here
//! as pure functions so the fragile label extraction stays unit
//! tested. Missing labels degrade to placeholder strings rather than
//! erroring -- stricter validation is deliberately not applied.

use indoc::formatdoc;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{block_on, resolve_key};
use crate::error::{ParseError, Result, ServiceError, ValidationError};
use crate::storage::GradingConfig;
use crate::study::flashcard::{Flashcard, CATEGORY_GENERATED};

const SERVICE: &str = "grading";
const KEYRING_KEY: &str = "gemini_api_key";
const ENV_VAR: &str = "KOALA_GEMINI_API_KEY";

/// Parsed grading outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    /// Letter grade A-F, or "N/A" when the response carried none.
    pub grade: String,
    pub explanation: String,
    pub feedback: String,
    /// Unparsed response text, kept for display and debugging.
    pub full_response: String,
}

impl GradeReport {
    /// A, B and C count as a correct answer.
    pub fn passed(&self) -> bool {
        matches!(self.grade.as_str(), "A" | "B" | "C")
    }
}

pub struct GradingClient {
    base_url: String,
    model: String,
    api_key: String,
}

impl GradingClient {
    /// Resolve the API key from the keyring (`gemini_api_key`) or the
    /// `KOALA_GEMINI_API_KEY` environment variable. A missing key is a
    /// validation error; nothing is sent.
    pub fn new(config: &GradingConfig) -> Result<Self, ValidationError> {
        let api_key = resolve_key(KEYRING_KEY, ENV_VAR).ok_or(ValidationError::MissingApiKey {
            service: SERVICE,
            env_var: ENV_VAR,
        })?;
        Ok(Self::with_key(config, api_key))
    }

    /// Build with an explicit key (tests, embedding).
    pub fn with_key(config: &GradingConfig, api_key: impl Into<String>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
        }
    }

    /// Store the API key in the OS keyring.
    pub fn store_key(api_key: &str) -> Result<(), Box<dyn std::error::Error>> {
        super::keyring_store::set(KEYRING_KEY, api_key)
    }

    /// Single-shot text generation call.
    fn generate_text(&self, prompt: &str) -> Result<String, ServiceError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let client = Client::new();
        let resp = block_on(
            SERVICE,
            client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send(),
        )?
        .map_err(|e| ServiceError::RequestFailed {
            service: SERVICE,
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = block_on(SERVICE, resp.text())?.unwrap_or_default();
            return Err(ServiceError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body: text,
            });
        }

        let value: serde_json::Value =
            block_on(SERVICE, resp.json())?.map_err(|e| ServiceError::RequestFailed {
                service: SERVICE,
                message: e.to_string(),
            })?;

        value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ServiceError::UnexpectedResponse {
                service: SERVICE,
                message: "no candidate text in response".to_string(),
            })
    }

    /// Grade a student's answer against a card.
    pub fn grade(&self, card: &Flashcard, answer: &str) -> Result<GradeReport> {
        if answer.trim().is_empty() {
            return Err(ValidationError::EmptyAnswer.into());
        }
        let prompt = grading_prompt(card, answer.trim());
        let text = self.generate_text(&prompt)?;
        Ok(parse_grade_response(&text))
    }

    /// Generate a batch of flashcards on a topic.
    pub fn generate_cards(&self, topic: &str, count: usize) -> Result<Vec<Flashcard>> {
        let prompt = generation_prompt(topic, count);
        let text = self.generate_text(&prompt)?;
        let base_id = chrono::Utc::now().timestamp_millis();
        Ok(parse_generated_cards(&text, base_id)?)
    }
}

fn grading_prompt(card: &Flashcard, answer: &str) -> String {
    formatdoc! {r#"
        You are a helpful tutor grading a student's answer. Please grade the following:

        Question: "{front}"
        Correct Answer: "{back}"
        Student's Answer: "{answer}"

        Please provide:
        1. A grade (A, B, C, D, or F)
        2. A brief explanation of why this grade was given
        3. Constructive feedback to help the student improve; in your feedback, do not use any line breaks, and format it in plain text so do not use any markdown or html tags.

        Format your response as:
        Grade: [A/B/C/D/F]
        Explanation: [Brief explanation]
        Feedback: [Constructive feedback]"#,
        front = card.front,
        back = card.back,
        answer = answer,
    }
}

fn generation_prompt(topic: &str, count: usize) -> String {
    formatdoc! {r#"
        Create {count} study flashcards about the topic "{topic}".
        Respond with only a JSON array where each element is an object
        with a "front" field (the question) and a "back" field (the
        answer). Keep both fields to one short sentence."#,
        count = count,
        topic = topic,
    }
}

/// Extract the three labeled lines from a grading response. Absent
/// labels fall back to placeholder strings.
pub fn parse_grade_response(text: &str) -> GradeReport {
    let grade_re = Regex::new(r"(?i)Grade:\s*([A-F])").unwrap();
    let explanation_re = Regex::new(r"(?i)Explanation:\s*([^\n]+)").unwrap();
    let feedback_re = Regex::new(r"(?i)Feedback:\s*([^\n]+)").unwrap();

    let capture = |re: &Regex| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    };

    GradeReport {
        grade: capture(&grade_re)
            .map(|g| g.to_uppercase())
            .unwrap_or_else(|| "N/A".to_string()),
        explanation: capture(&explanation_re)
            .unwrap_or_else(|| "No explanation provided".to_string()),
        feedback: capture(&feedback_re).unwrap_or_else(|| "No feedback provided".to_string()),
        full_response: text.to_string(),
    }
}

#[derive(Deserialize)]
struct GeneratedCard {
    front: String,
    back: String,
    #[serde(default)]
    category: String,
}

/// Pull the JSON array out of a generation response. The service
/// wraps arrays in prose or code fences often enough that we slice
/// from the first `[` to the last `]` before parsing.
pub fn parse_generated_cards(text: &str, base_id: i64) -> Result<Vec<Flashcard>, ParseError> {
    let start = text.find('[').ok_or(ParseError::NoCardsInResponse)?;
    let end = text.rfind(']').ok_or(ParseError::NoCardsInResponse)?;
    if end < start {
        return Err(ParseError::NoCardsInResponse);
    }

    let parsed: Vec<GeneratedCard> =
        serde_json::from_str(&text[start..=end]).map_err(|_| ParseError::NoCardsInResponse)?;

    let cards: Vec<Flashcard> = parsed
        .into_iter()
        .filter(|c| !c.front.trim().is_empty() && !c.back.trim().is_empty())
        .enumerate()
        .map(|(i, c)| Flashcard {
            id: base_id + i as i64,
            front: c.front.trim().to_string(),
            back: c.back.trim().to_string(),
            category: if c.category.trim().is_empty() {
                CATEGORY_GENERATED.to_string()
            } else {
                c.category.trim().to_string()
            },
        })
        .collect();

    if cards.is_empty() {
        return Err(ParseError::NoCardsInResponse);
    }
    Ok(cards)
}
