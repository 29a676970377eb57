// src/core/sanitize.rs

/// Collapse every run of whitespace into one space and trim both ends.
/// Idempotent; empty in, empty out.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Keep only ASCII digits. Card serials arrive wrapped in labels and punctuation.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// "Cash value:" → "Cash value"
pub fn strip_label_colon(s: &str) -> String {
    normalize_ws(s).trim_end_matches(':').trim_end().to_string()
}

/// Split "Name: rest of text" at the first colon. `None` when there is no
/// colon or either side would be empty.
pub fn split_label(s: &str) -> Option<(String, String)> {
    let (name, value) = s.split_once(':')?;
    let (name, value) = (normalize_ws(name), normalize_ws(value));
    if name.is_empty() || value.is_empty() { return None; }
    Some((name, value))
}
