//! Line Normalizer
//!
//! Pure function from a raw text line to lowercase alphanumeric tokens.
//! Normalizing already-normalized output returns it unchanged.

/// Normalize one line of text into tokens.
///
/// Rules:
/// - lowercase the line
/// - keep only `[a-z0-9 -]`; every other character is dropped
/// - a pair of adjacent hyphens in the filtered stream becomes a single
///   space; a lone hyphen stays, so a hyphenated word remains one token
/// - split on spaces, dropping empty tokens
///
/// The pair rule runs on the filtered stream: two hyphens separated only by
/// dropped punctuation still form a break, so every emitted token is a
/// fixed point of the function.
pub fn normalize(line: &str) -> Vec<String> {
    let mut filtered = String::with_capacity(line.len());
    for c in line.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' || c == '-' {
            filtered.push(c);
        }
    }

    while let Some(i) = filtered.find("--") {
        filtered.replace_range(i..i + 2, " ");
    }

    filtered
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
