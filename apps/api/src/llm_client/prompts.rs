// Shared prompt fragments.
// Each feature that calls the model keeps its own prompts.rs alongside it;
// only instructions common to several of them live here.

/// Appended to prompts that must come back as a bare JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    The output MUST be valid JSON. \
    Return ONLY the JSON object. No markdown formatting, \
    no text outside the object, no explanations.";

/// Instruction that keeps answers grounded in the supplied portfolio data.
pub const GROUNDING_INSTRUCTION: &str = "\
    Answer ONLY from the portfolio data provided. \
    If something is not in the data, say you don't have that information \
    and suggest contacting the person directly.";

/// Fills `{placeholder}` slots in one pass. Substituted text is never
/// rescanned, so values may safely contain braces of their own.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let slot = values.iter().find(|(key, _)| {
            tail[1..]
                .strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match slot {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
