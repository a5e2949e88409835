// Prompt constants for résumé parsing.

/// Résumé parse prompt. Replace `{resume_text}`, `{schema}` and
/// `{json_only}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"You are a resume parser. Extract data from the following Resume text and format it EXACTLY according to this JSON schema.

Resume text:
{resume_text}

Schema reference (filling instructions):
{schema}

INSTRUCTIONS:
1. Map the resume data to the schema fields as accurately as possible.
2. If a field is missing in the resume, leave it as an empty string or empty array.
3. {json_only}"#;
