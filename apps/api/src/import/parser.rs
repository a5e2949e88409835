//! Résumé Parser: turns extracted résumé text into a portfolio document.
//!
//! Walks a fixed list of models: an unknown model (404), a rate limit (429)
//! or an unusable answer moves on to the next one. Any other API failure is
//! returned at once.

use serde_json::Value;
use tracing::{info, warn};

use crate::import::prompts::RESUME_PARSE_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{strip_json_fences, GenerationRequest, GenerativeModel, LlmError, Turn};
use crate::models::{Locale, PortfolioDocument};
use crate::store::demo::demo_document;

/// Models to try, in order of preference and cost.
pub const PARSE_MODELS: [&str; 5] = [
    "gemini-1.5-flash",
    "gemini-1.5-flash-001",
    "gemini-1.5-flash-8b",
    "gemini-1.5-pro",
    "gemini-1.5-pro-001",
];

/// Strings longer than this are blanked in the schema reference.
const SCHEMA_TEXT_LIMIT: usize = 50;

/// Reduces a sample document to its shape: long strings become empty and
/// every non-empty array keeps only its first element.
pub fn schema_reference(sample: &Value) -> Value {
    match sample {
        Value::String(s) if s.chars().count() > SCHEMA_TEXT_LIMIT => Value::String(String::new()),
        Value::Array(items) => match items.first() {
            Some(first) => Value::Array(vec![schema_reference(first)]),
            None => Value::Array(Vec::new()),
        },
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), schema_reference(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

pub fn build_prompt(resume_text: &str) -> String {
    let schema = schema_reference(demo_document(Locale::En)).to_string();
    fill_template(
        RESUME_PARSE_PROMPT_TEMPLATE,
        &[
            ("schema", schema.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("resume_text", resume_text),
        ],
    )
}

/// Parses résumé text into a normalized portfolio document.
pub async fn parse_resume(llm: &dyn GenerativeModel, resume_text: &str) -> Result<Value, LlmError> {
    let request = GenerationRequest {
        system: None,
        turns: vec![Turn::user(build_prompt(resume_text))],
        temperature: None,
        json_output: true,
    };

    let mut last_error: Option<LlmError> = None;

    for model in PARSE_MODELS {
        info!("Attempting to parse resume with model: {model}");

        let result = match llm.generate(model, &request).await {
            Ok(text) => decode(&text),
            Err(e) => Err(e),
        };

        match result {
            Ok(doc) => return Ok(doc),
            Err(e) if e.is_model_fallback() => {
                warn!("Model {model} failed, trying next: {e}");
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(LlmError::ModelsExhausted {
        tried: PARSE_MODELS.len(),
        last: Box::new(last_error.unwrap_or(LlmError::EmptyContent)),
    })
}

fn decode(text: &str) -> Result<Value, LlmError> {
    let cleaned = strip_json_fences(text);
    if cleaned.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    let raw: Value = serde_json::from_str(cleaned)?;
    Ok(PortfolioDocument::normalize(raw)?)
}
