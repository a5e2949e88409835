//! Chat: answers one visitor message with the whole document as context.

use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::assistant::prompts::{APOLOGY_REPLY, CHAT_SYSTEM_TEMPLATE, NO_CLEAR_RESPONSE_REPLY};
use crate::llm_client::prompts::{fill_template, GROUNDING_INSTRUCTION};
use crate::llm_client::{GenerationRequest, GenerativeModel, LlmError, Turn};

const CHAT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub text: String,
    /// Set when `text` is the fallback apology rather than a model answer.
    pub is_error: bool,
}

impl ChatReply {
    fn answer(text: String) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    fn apology() -> Self {
        Self {
            text: APOLOGY_REPLY.to_string(),
            is_error: true,
        }
    }
}

/// Builds the system instruction priming the model with the document.
pub fn build_system_instruction(document: &Value) -> String {
    let basics = &document["basics"];
    let name = basics["name"].as_str().filter(|s| !s.is_empty()).unwrap_or("this person");
    let title = basics["title"].as_str().filter(|s| !s.is_empty()).unwrap_or("a professional");

    let document = document.to_string();
    fill_template(
        CHAT_SYSTEM_TEMPLATE,
        &[
            ("name", name),
            ("title", title),
            ("grounding", GROUNDING_INSTRUCTION),
            ("document", document.as_str()),
        ],
    )
}

/// Sends `message` (after `history`) to the model. Never fails: any error is
/// logged and turned into an apology reply.
pub async fn answer(
    llm: Option<&dyn GenerativeModel>,
    model: &str,
    document: &Value,
    history: &[Turn],
    message: &str,
) -> ChatReply {
    let Some(llm) = llm else {
        warn!("Chat requested but no Gemini API key is configured");
        return ChatReply::apology();
    };

    let mut turns = history.to_vec();
    turns.push(Turn::user(message));

    let request = GenerationRequest {
        system: Some(build_system_instruction(document)),
        turns,
        temperature: Some(CHAT_TEMPERATURE),
        json_output: false,
    };

    match llm.generate(model, &request).await {
        Ok(text) if text.trim().is_empty() => ChatReply::answer(NO_CLEAR_RESPONSE_REPLY.to_string()),
        Ok(text) => ChatReply::answer(text),
        Err(LlmError::EmptyContent) => ChatReply::answer(NO_CLEAR_RESPONSE_REPLY.to_string()),
        Err(e) => {
            error!("Error communicating with Gemini: {e}");
            ChatReply::apology()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::Role;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct ScriptedModel {
        reply: fn() -> Result<String, LlmError>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedModel {
        fn new(reply: fn() -> Result<String, LlmError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        async fn generate(&self, _model: &str, request: &GenerationRequest) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    fn document() -> Value {
        json!({ "basics": { "name": "Jordan Avery", "title": "Staff Engineer", "email": "j@example.com" } })
    }

    #[tokio::test]
    async fn test_answer_passes_document_and_history() {
        let model = ScriptedModel::new(|| Ok("Jordan knows Rust.".to_string()));
        let history = vec![Turn::user("Hi"), Turn { role: Role::Model, text: "Hello!".into() }];

        let reply = answer(Some(&model), "m", &document(), &history, "Skills?").await;
        assert_eq!(reply, ChatReply { text: "Jordan knows Rust.".into(), is_error: false });

        let seen = model.seen.lock().unwrap();
        let request = &seen[0];
        let system = request.system.as_deref().unwrap();
        assert!(system.contains("Jordan Avery, Staff Engineer"));
        assert!(system.contains("j@example.com"));
        assert_eq!(request.turns.len(), 3);
        assert_eq!(request.turns[2], Turn::user("Skills?"));
        assert_eq!(request.temperature, Some(0.7));
    }

    #[tokio::test]
    async fn test_model_failure_becomes_apology() {
        let model = ScriptedModel::new(|| Err(LlmError::Api { status: 500, message: "boom".into() }));
        let reply = answer(Some(&model), "m", &document(), &[], "Hi").await;
        assert!(reply.is_error);
        assert_eq!(reply.text, APOLOGY_REPLY);
    }

    #[tokio::test]
    async fn test_empty_answer_asks_to_retry() {
        let model = ScriptedModel::new(|| Ok("   ".to_string()));
        let reply = answer(Some(&model), "m", &document(), &[], "Hi").await;
        assert!(!reply.is_error);
        assert_eq!(reply.text, NO_CLEAR_RESPONSE_REPLY);
    }

    #[tokio::test]
    async fn test_missing_model_is_apology() {
        let reply = answer(None, "m", &document(), &[], "Hi").await;
        assert!(reply.is_error);
    }

    #[test]
    fn test_system_instruction_without_basics() {
        let system = build_system_instruction(&json!({}));
        assert!(system.contains("this person, a professional"));
    }

    #[test]
    fn test_placeholders_inside_document_values_are_not_expanded() {
        let doc = json!({ "basics": { "name": "{document} {grounding}", "title": "{name}" } });
        let system = build_system_instruction(&doc);
        assert!(system.contains("portfolio of {document} {grounding}, {name}."));
        assert_eq!(system.matches(GROUNDING_INSTRUCTION).count(), 1);
        assert_eq!(system.matches(&doc.to_string()).count(), 1);
    }
}
