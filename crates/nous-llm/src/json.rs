use serde_json::Value;

/// Extract a JSON object from a possibly chatty model reply.
///
/// Takes the substring from the first `{` to the last `}` and parses it,
/// ignoring any surrounding prose or markdown fences. Returns `None` when no
/// braces are present or the substring is not valid JSON; callers treat that
/// as "no structured result", not as an error.
pub fn extract_json(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
