use serde_json::Value;
use thiserror::Error;

use crate::store::path::is_falsy;

/// Top-level sections a user-supplied document must carry.
pub const REQUIRED_SECTIONS: [&str; 4] = ["basics", "experience", "skills", "education"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON format: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid JSON: document must be an object")]
    NotAnObject,

    #[error("Invalid JSON: Missing required sections: {}", .0.join(", "))]
    MissingSections(Vec<String>),
}

/// Parses raw editor/upload text and checks the required sections.
pub fn parse_document(raw: &str) -> Result<Value, ImportError> {
    let doc: Value = serde_json::from_str(raw)?;
    validate_document(&doc)?;
    Ok(doc)
}

pub fn validate_document(doc: &Value) -> Result<(), ImportError> {
    let Some(map) = doc.as_object() else {
        return Err(ImportError::NotAnObject);
    };
    let missing: Vec<String> = REQUIRED_SECTIONS
        .iter()
        .filter(|key| map.get(**key).map_or(true, is_falsy))
        .map(|key| key.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingSections(missing))
    }
}
