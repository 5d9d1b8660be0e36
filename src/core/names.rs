//! Identifier normalization and "did you mean" ranking.
//!
//! `normalize` folds the naming conventions used for default-value holders
//! (`DEFAULT_HOST`, `defaultHost`, `host`) onto one canonical key so that
//! convention matching can compare a parameter name against a static member
//! name. `suggest` picks the closest candidate by edit distance, or nothing
//! when every candidate is too far away to be a plausible typo.

const UPPER_PREFIX: &str = "default_";
const VERB_PREFIX: &str = "default";

/// Canonical, case- and separator-insensitive form of an identifier with any
/// well-known default prefix removed.
pub fn normalize(identifier: &str) -> String {
    strip_default_prefix(identifier)
        .unwrap_or(identifier)
        .chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when the identifier follows a default-holder naming convention.
pub fn has_default_prefix(identifier: &str) -> bool {
    strip_default_prefix(identifier).is_some()
}

fn strip_default_prefix(identifier: &str) -> Option<&str> {
    // `DEFAULT_HOST` / `default_host`
    if identifier.len() > UPPER_PREFIX.len()
        && identifier.is_char_boundary(UPPER_PREFIX.len())
        && identifier[..UPPER_PREFIX.len()].eq_ignore_ascii_case(UPPER_PREFIX)
    {
        return Some(&identifier[UPPER_PREFIX.len()..]);
    }
    // `defaultHost`: the verb prefix only counts before a capitalized remainder.
    let rest = identifier.strip_prefix(VERB_PREFIX)?;
    rest.chars()
        .next()
        .is_some_and(char::is_uppercase)
        .then_some(rest)
}

/// Levenshtein distance over chars, single-row.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == *b_char { 0 } else { 1 };
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

/// Largest edit distance still treated as a typo for a name of this length.
fn max_distance(target: &str) -> usize {
    ((target.chars().count() + 2) / 3).clamp(1, 3)
}

/// Closest candidate within the typo threshold. Ties keep the earliest
/// candidate so suggestions are stable across runs.
pub fn suggest<'a, I>(target: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let folded_target = target.to_lowercase();
    let limit = max_distance(target);
    let mut best: Option<(usize, &str)> = None;
    for candidate in candidates {
        if candidate == target {
            continue;
        }
        let distance = edit_distance(&folded_target, &candidate.to_lowercase());
        if distance > limit {
            continue;
        }
        if best.is_none_or(|(best_distance, _)| distance < best_distance) {
            best = Some((distance, candidate));
        }
    }
    best.map(|(_, name)| name.to_string())
}

#[cfg(test)]
#[path = "../tests/names/t_names.rs"]
mod tests;
