//! Approximate string matching for "did you mean" suggestions.
//!
//! Sequence-matcher style similarity: find the longest common block,
//! recurse on the pieces either side of it, and score
//! `2 * matched / (len_a + len_b)`. A candidate is only ever suggested
//! when its score clears the configured cutoff; ties keep the first
//! candidate in enumeration order.

/// Longest common substring of `a` and `b`: `(start_a, start_b, len)`.
/// Prefers the earliest block on ties.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // prev[j] = length of the common suffix ending at (i-1, j-1).
    let mut prev = vec![0usize; b.len() + 1];
    for i in 0..a.len() {
        let mut current = vec![0usize; b.len() + 1];
        for j in 0..b.len() {
            if a[i] == b[j] {
                let len = prev[j] + 1;
                current[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = current;
    }
    best
}

/// Total length of all matching blocks between `a` and `b`.
fn matched_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (i, j, len) = longest_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_len(&a[..i], &b[..j]) + matched_len(&a[i + len..], &b[j + len..])
}

/// Similarity ratio in `[0, 1]`. Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    2.0 * matched_len(&a, &b) as f64 / (a.len() + b.len()) as f64
}

/// Best candidate at or above `cutoff`, or `None`.
///
/// Scoring is case-insensitive; the returned name keeps its stored
/// casing. The first candidate wins ties (strictly-greater comparison),
/// so the result is deterministic in enumeration order.
pub fn best_match<'a, I>(query: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let folded_query = query.to_lowercase();
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = similarity(&folded_query, &candidate.to_lowercase());
        if score < cutoff {
            continue;
        }
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }
    best.map(|(name, _)| name)
}
