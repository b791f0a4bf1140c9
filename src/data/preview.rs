// ============================================================
// Layer 4 — Upload Preview
// ============================================================
// The text shown right after an upload. Display only: the models
// always receive the raw extraction output.
//
// Extracted text is full of layout whitespace (justified runs of
// spaces, tabs, \r, blank lines between pages). The preview keeps
// one line per non-blank input line, with every whitespace run
// inside it collapsed to a single space, then cuts the result to
// a character budget.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

/// Marker appended when a preview is cut short
const ELLIPSIS: &str = "...";

/// Normalised text, at most `max_chars` characters plus "..." when
/// anything was dropped. Counts chars, never splits one.
pub fn preview(text: &str, max_chars: usize) -> String {
    let normalised = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    match normalised.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &normalised[..cut]),
        None           => normalised,
    }
}
