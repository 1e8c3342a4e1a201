//! Splits a normalized bulletin into its base group and change groups.

use tracing::trace;

const CHANGE_MARKERS: &[&str] = &["BECMG", "TEMPO", "PROB30", "PROB40"];

/// Collapse newlines and whitespace runs to single spaces.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `FMddhhmm`.
pub fn is_from_time(token: &str) -> bool {
    token.len() == 8
        && token.starts_with("FM")
        && token[2..].bytes().all(|b| b.is_ascii_digit())
}

/// Whether `token` opens a new group. Only whole tokens count.
pub fn is_marker(token: &str) -> bool {
    is_from_time(token) || CHANGE_MARKERS.contains(&token)
}

/// Group texts in bulletin order, base group first. Empty input yields no groups.
pub fn segment(text: &str) -> Vec<String> {
    let mut groups = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for token in text.split_whitespace() {
        if is_marker(token) && !current.is_empty() {
            groups.push(current.join(" "));
            current.clear();
        }
        current.push(token);
    }
    if !current.is_empty() {
        groups.push(current.join(" "));
    }

    trace!(groups = groups.len(), "segmented bulletin");
    groups
}
