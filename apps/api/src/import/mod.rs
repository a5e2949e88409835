// Résumé import: PDF text extraction and AI parsing into a portfolio document.
// All model calls go through llm_client::GenerativeModel.

pub mod handlers;
pub mod parser;
pub mod pdf;
pub mod prompts;
