// Portfolio assistant: answers visitor questions from the current document.
// All model calls go through llm_client::GenerativeModel.

pub mod chat;
pub mod handlers;
pub mod prompts;
