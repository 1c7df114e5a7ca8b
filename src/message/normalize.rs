//! Cleanup of raw model output into a commit message.

use std::fmt;

/// Label some models prepend to their answer. Matched case-sensitively.
const LABEL: &str = "commit message:";

/// A normalized, non-empty commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    /// Normalize raw model text, returning `None` if nothing usable remains.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let text = normalize(raw);
        if text.is_empty() { None } else { Some(Self(text)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip enclosing backticks, drop every `commit message:` label and trim.
///
/// Repeated until the text stops changing, so `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = normalize_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn normalize_once(text: &str) -> String {
    unwrap_backticks(text.trim()).replace(LABEL, "").trim().to_string()
}

/// Remove a backtick fence around the whole text.
///
/// The opening and closing runs must be the same length and the inside must
/// hold no other backtick; otherwise the backticks are inline code and stay.
fn unwrap_backticks(text: &str) -> &str {
    if text.chars().all(|c| c == '`') {
        return "";
    }

    let open = text.len() - text.trim_start_matches('`').len();
    let close = text.len() - text.trim_end_matches('`').len();
    if open == 0 || open != close {
        return text;
    }

    let inner = &text[open..text.len() - close];
    if inner.contains('`') { text } else { inner }
}
