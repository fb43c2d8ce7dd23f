//! Text-matching primitives.
//!
//! # Invariants
//! - `like_with` always appends `%`; it prepends one only when asked.
//! - Input values are not validated or escaped. An empty value matches
//!   everything.

pub const WILDCARD_MULTIPLE_CHARS: &str = "%";
const WILDCARD_SINGLE_CHAR: char = '_';

/// Starts-with pattern: `value%`.
pub fn like(value: &str) -> String {
    like_with(false, value)
}

/// Builds a partial-match pattern, `%value%` when `left_like` is set.
pub fn like_with(left_like: bool, value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    if left_like {
        result.push_str(WILDCARD_MULTIPLE_CHARS);
    }
    result.push_str(value);
    result.push_str(WILDCARD_MULTIPLE_CHARS);
    result
}

/// Returns whether the value holds at least one non-whitespace character.
pub fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}

/// Evaluates a `LIKE` pattern against `text`.
///
/// Case folding is ASCII-only, matching SQLite's `LIKE`/`NOCASE` behavior.
pub fn like_matches(pattern: &str, text: &str, case_sensitive: bool) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let same = |p: char, t: char| {
        if case_sensitive {
            p == t
        } else {
            p.eq_ignore_ascii_case(&t)
        }
    };

    let (mut p, mut t) = (0, 0);
    // Last `%` position and the text index it is currently absorbing up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '%' {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len()
            && (pattern[p] == WILDCARD_SINGLE_CHAR || same(pattern[p], text[t]))
        {
            p += 1;
            t += 1;
        } else if let Some((star, absorbed)) = backtrack {
            p = star + 1;
            t = absorbed + 1;
            backtrack = Some((star, t));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '%')
}
