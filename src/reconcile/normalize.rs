//! Team name normalization.
//!
//! Both feeds spell teams differently ("The Los Angeles Lakers",
//! "los angeles lakers", "L.A. Lakers"). Everything that joins the feeds
//! compares the output of [`normalize`], never the raw strings.

/// Word dropped from names before comparison.
const ARTICLE: &str = "the";

/// Separator between the away and home keys of a composite key.
///
/// `_` never survives [`normalize`], so a composite key cannot be confused
/// with a single normalized name.
pub const KEY_SEPARATOR: &str = "__";

/// Canonicalize a free-text team name into a comparable key.
///
/// Lowercases, drops every standalone `the`, then keeps only `[a-z0-9]`.
/// Absent input yields an empty key. The function is total and idempotent.
pub fn normalize(name: Option<&str>) -> String {
    let mut key = words(name).concat();

    // "t-he" collapses to "the"; a second pass would strip it
    if key == ARTICLE {
        key.clear();
    }
    key
}

/// Whole-word trailing suffixes of a name's key, shortest first.
///
/// "The Los Angeles Lakers" yields `lakers`, `angeleslakers`,
/// `losangeleslakers`. The last entry equals [`normalize`]'s key; an
/// unmatchable name yields nothing.
pub fn word_suffixes(name: Option<&str>) -> Vec<String> {
    let words = words(name);
    let mut suffixes: Vec<String> = (0..words.len())
        .rev()
        .map(|start| words[start..].concat())
        .collect();
    suffixes.retain(|s| s != ARTICLE);
    suffixes
}

/// Composite lookup key for an (away, home) pair of normalized names.
pub fn composite_key(away_key: &str, home_key: &str) -> String {
    format!("{away_key}{KEY_SEPARATOR}{home_key}")
}

/// Lowercased words of `name` with `the` dropped, each reduced to `[a-z0-9]`.
///
/// Word characters for boundary purposes are ASCII letters, digits and `_`.
fn words(name: Option<&str>) -> Vec<String> {
    let Some(name) = name else {
        return Vec::new();
    };

    let lowered = name.to_lowercase();
    lowered
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty() && *word != ARTICLE)
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect()
}
