//! Query and cue text normalization for match comparison.

/// Normalize text for substring matching.
///
/// Lowercases, folds `ё` to `е` so both spellings match either way, replaces
/// every run of non-alphanumeric characters with a single space and trims the
/// ends. Applying the function twice gives the same result as applying it
/// once, so queries and cue text can be normalized independently.
pub fn normalize_for_search(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        let ch = if ch == 'ё' { 'е' } else { ch };
        if ch.is_alphanumeric() {
            if pending_space && !normalized.is_empty() {
                normalized.push(' ');
            }
            pending_space = false;
            normalized.push(ch);
        } else {
            pending_space = true;
        }
    }

    normalized
}
