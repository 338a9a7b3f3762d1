use serde_json::Value;

/// Strips a surrounding markdown code fence (```json ... ```) if present
pub fn unfence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the info string (e.g. `json`) on the opening line
    match body.find('\n') {
        Some(idx) => body[idx + 1..].trim(),
        None => body.trim(),
    }
}

/// Reads a 0-100 score from a number or a numeric string, clamping out-of-range values
pub fn score_from_value(v: &Value) -> Option<u8> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if n.is_nan() {
        return None;
    }
    Some(n.round().clamp(0.0, 100.0) as u8)
}
