//! Fuzzy token matching over the indexed key set.
//!
//! Scoring is a normalized edit-distance similarity in `[0, 100]`:
//! `100 * (1 - levenshtein(a, b) / (|a| + |b|))`, computed over Unicode
//! scalar values. Every query scans the full key set, so cost is
//! O(keys x key length). That is fine for the working-set sizes this tool
//! targets (hundreds of thousands of tokens); a precomputed n-gram
//! structure could replace the scan without changing the ordering
//! contracts below.

/// Default cutoff for [`matches_above`].
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// Similarity score between two strings in the closed range `[0, 100]`.
/// Two empty strings are identical and score 100.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let distance = levenshtein(&a, &b);
    100.0 * (1.0 - distance as f64 / total as f64)
}

/// Single-row Levenshtein distance (insert, delete, substitute all cost 1)
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, &ca) in a.iter().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;

        for (j, &cb) in b.iter().enumerate() {
            let substitute = prev_diag + usize::from(ca != cb);
            let insert = row[j + 1] + 1;
            let delete = row[j] + 1;
            prev_diag = row[j + 1];
            row[j + 1] = substitute.min(insert).min(delete);
        }
    }

    row[b.len()]
}

/// Find the key most similar to `query`.
///
/// Comparison is strictly greater-than, so the first key seen wins ties.
/// Returns `None` when there are no keys (or when every key scores zero).
pub fn best_match<'a, I>(query: &str, keys: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best = None;
    let mut highest = 0.0f64;

    for key in keys {
        let score = similarity(query, key);
        if score > highest {
            highest = score;
            best = Some(key);
        }
    }

    best
}

/// Collect every key scoring at least `threshold`, sorted descending by
/// score. The sort is stable: equal scores keep their original relative
/// order.
pub fn matches_above<'a, I>(query: &str, keys: I, threshold: f64) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(&str, f64)> = keys
        .into_iter()
        .filter_map(|key| {
            let score = similarity(query, key);
            (score >= threshold).then_some((key, score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(key, _)| key).collect()
}
