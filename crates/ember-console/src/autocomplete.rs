//! Prefix autocomplete over registered command names.

/// Result of an autocomplete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Input was empty or unchanged; nothing to do.
    None,
    /// Exactly one name matches; replace the input with it.
    Single(String),
    /// Several names match. `extended` carries the longest common prefix
    /// when it is strictly longer than the input; `candidates` always
    /// lists every match.
    Partial {
        extended: Option<String>,
        candidates: Vec<String>,
    },
    /// No registered name starts with the input.
    NoMatches,
}

/// Compute the completion for a partial input against a set of command
/// names. Pure: never mutates registry state.
pub fn complete<'a, I>(names: I, partial: &str) -> Completion
where
    I: IntoIterator<Item = &'a str>,
{
    let input = partial.trim().to_lowercase();
    if input.is_empty() {
        return Completion::None;
    }

    let mut candidates: Vec<String> = names
        .into_iter()
        .filter(|name| name.starts_with(&input))
        .map(str::to_string)
        .collect();

    if candidates.is_empty() {
        return Completion::NoMatches;
    }
    if candidates.len() == 1 {
        return Completion::Single(candidates.swap_remove(0));
    }

    let prefix = common_prefix(&candidates);
    let extended = (prefix.len() > input.len()).then_some(prefix);
    Completion::Partial {
        extended,
        candidates,
    }
}

/// Longest prefix shared by all candidates, stopping at the shortest
/// candidate's length or the first mismatch.
fn common_prefix(candidates: &[String]) -> String {
    let first = candidates[0].as_bytes();
    let min_len = candidates.iter().map(|c| c.len()).min().unwrap_or(0);
    let mut end = 0;
    while end < min_len && candidates.iter().all(|c| c.as_bytes()[end] == first[end]) {
        end += 1;
    }
    // Back off to a char boundary for multi-byte names.
    while !candidates[0].is_char_boundary(end) {
        end -= 1;
    }
    candidates[0][..end].to_string()
}
