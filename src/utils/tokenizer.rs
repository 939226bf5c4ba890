use regex::Regex;
use std::sync::LazyLock;

/// Matches a `class` keyword followed by one identifier.
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+(\w+)").expect("class pattern is valid"));

/// Tokens extracted from one compilation unit.
///
/// Type names and generic tokens are indexed under the same namespace;
/// the split only matters at extraction time because type names bypass
/// the generic-token filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Declared type names, in order of appearance. Duplicates allowed;
    /// dedup happens at ingestion.
    pub type_names: Vec<String>,
    /// Filtered whitespace-delimited tokens.
    pub tokens: Vec<String>,
}

/// Extract type names and generic tokens from source text.
///
/// Generic tokens are produced by replacing every parenthesis with a space
/// and splitting on whitespace, so other punctuation stays attached
/// (`total;` is indexed with its semicolon). A token survives the filter
/// iff it is longer than 3 characters, not purely numeric, and not a
/// string literal (does not start or end with a double quote).
///
/// Pure function: accepts any input, never fails, deterministic.
pub fn tokenize(text: &str) -> Extraction {
    let type_names = CLASS_RE
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .collect();

    let cleaned = text.replace(['(', ')'], " ");
    let tokens = cleaned
        .split_whitespace()
        .filter(|token| keep_token(token))
        .map(str::to_string)
        .collect();

    Extraction { type_names, tokens }
}

fn keep_token(token: &str) -> bool {
    token.chars().count() > 3
        && !token.starts_with('"')
        && !token.ends_with('"')
        && !token.chars().all(|c| c.is_ascii_digit())
}
