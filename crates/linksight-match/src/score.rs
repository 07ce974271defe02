//! String similarity scoring for location names.
//!
//! Scores are integers in `0..=100`. The base measure is the normalized indel
//! similarity of the processed strings; token-sorted, token-set and
//! substring-window variants make the score tolerant to word order,
//! abbreviations and extra words ("City of Cebu" vs "Cebu City").

use rapidfuzz::distance::indel;

/// Scale applied to token-based ratios.
const TOKEN_SCALE: f64 = 0.95;
/// Scale applied to partial (substring window) ratios.
const PARTIAL_SCALE: f64 = 0.90;
/// Partial scale once one string is much longer than the other.
const LONG_PARTIAL_SCALE: f64 = 0.60;
/// Length ratio at which partial ratios are considered.
const PARTIAL_MIN_LENGTH_RATIO: f64 = 1.5;
/// Length ratio above which partial ratios are damped further.
const LONG_LENGTH_RATIO: f64 = 8.0;

/// A candidate string with its similarity score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredChoice<'a> {
    pub choice: &'a str,
    pub score: u8,
}

/// Lowercases, replaces non-alphanumeric characters with spaces and
/// collapses whitespace.
pub fn process(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect();
    replaced
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indel similarity of two strings in `0.0..=100.0`; 0 if either is empty.
pub fn ratio(left: &str, right: &str) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    indel::normalized_similarity(left.chars(), right.chars()) * 100.0
}

/// Best ratio of the shorter string against every equally long window of the longer one.
pub fn partial_ratio(left: &str, right: &str) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let (short, long) = if left.chars().count() <= right.chars().count() {
        (left, right)
    } else {
        (right, left)
    };
    let long_chars: Vec<char> = long.chars().collect();
    let width = short.chars().count();
    if width == long_chars.len() {
        return ratio(short, long);
    }

    let mut best = 0.0_f64;
    for window in long_chars.windows(width) {
        let score = indel::normalized_similarity(short.chars(), window.iter().copied()) * 100.0;
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

fn sorted_tokens(value: &str) -> String {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Ratio after sorting whitespace-separated tokens.
pub fn token_sort_ratio(left: &str, right: &str, partial: bool) -> f64 {
    let left = sorted_tokens(left);
    let right = sorted_tokens(right);
    if partial {
        partial_ratio(&left, &right)
    } else {
        ratio(&left, &right)
    }
}

/// Ratio comparing the shared tokens against each side's remainder.
pub fn token_set_ratio(left: &str, right: &str, partial: bool) -> f64 {
    use std::collections::BTreeSet;

    let left_tokens: BTreeSet<&str> = left.split_whitespace().collect();
    let right_tokens: BTreeSet<&str> = right.split_whitespace().collect();
    if left_tokens.is_empty() || right_tokens.is_empty() {
        return 0.0;
    }

    let shared = left_tokens
        .intersection(&right_tokens)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let left_only = left_tokens
        .difference(&right_tokens)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let right_only = right_tokens
        .difference(&left_tokens)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let combined_left = format!("{shared} {left_only}").trim().to_string();
    let combined_right = format!("{shared} {right_only}").trim().to_string();

    let compare = |a: &str, b: &str| {
        if partial {
            partial_ratio(a, b)
        } else {
            ratio(a, b)
        }
    };
    compare(&shared, &combined_left)
        .max(compare(&shared, &combined_right))
        .max(compare(&combined_left, &combined_right))
}

/// Weighted similarity of two already processed strings.
pub fn weighted_ratio(left: &str, right: &str) -> u8 {
    if left.is_empty() || right.is_empty() {
        return 0;
    }
    let left_len = left.chars().count() as f64;
    let right_len = right.chars().count() as f64;
    let length_ratio = left_len.max(right_len) / left_len.min(right_len);

    let base = ratio(left, right);
    let best = if length_ratio < PARTIAL_MIN_LENGTH_RATIO {
        base.max(token_sort_ratio(left, right, false) * TOKEN_SCALE)
            .max(token_set_ratio(left, right, false) * TOKEN_SCALE)
    } else {
        let partial_scale = if length_ratio > LONG_LENGTH_RATIO {
            LONG_PARTIAL_SCALE
        } else {
            PARTIAL_SCALE
        };
        base.max(partial_ratio(left, right) * partial_scale)
            .max(token_sort_ratio(left, right, true) * TOKEN_SCALE * partial_scale)
            .max(token_set_ratio(left, right, true) * TOKEN_SCALE * partial_scale)
    };
    best.round().clamp(0.0, 100.0) as u8
}

/// Similarity of two raw strings.
pub fn similarity(left: &str, right: &str) -> u8 {
    weighted_ratio(&process(left), &process(right))
}

/// Scores `query` against `choices` and returns the best ones.
///
/// At most `limit` results with `score >= cutoff`, ordered by descending
/// score. Equal scores keep the order of `choices`. A query that is empty
/// after processing yields nothing.
pub fn best_matches<'a, I>(query: &str, choices: I, cutoff: u8, limit: usize) -> Vec<ScoredChoice<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let processed_query = process(query);
    if processed_query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<ScoredChoice<'a>> = choices
        .into_iter()
        .filter_map(|choice| {
            let score = weighted_ratio(&processed_query, &process(choice));
            (score >= cutoff).then_some(ScoredChoice { choice, score })
        })
        .collect();

    // Stable sort keeps input order among equal scores.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}
