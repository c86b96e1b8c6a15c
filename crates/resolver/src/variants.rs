//! Search-string variants for a movie title.
//!
//! Shared files are named inconsistently (`Movie Title 2010`,
//! `MovieTitle.2010`, `MovieTitle.mkv`, ...), so one title expands into
//! several queries, least mangled first.

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

static CONTAINER_SUFFIXES: &[&str] = &[".mp4", ".mkv", ".avi"];

/// Strip accents and punctuation: `"Amélie!"` -> `"Amelie"`.
pub fn normalize_title(title: &str) -> String {
    let folded: String = title.nfd().filter(|c| !is_combining_mark(*c)).collect();
    folded
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Ordered, duplicate-free search queries for `title` released in `year`.
///
/// `year` may be empty, in which case year-bearing variants are skipped.
pub fn generate_variants(title: &str, year: &str) -> Vec<String> {
    let base = normalize_title(title);
    if base.is_empty() {
        return Vec::new();
    }
    let compact: String = base.chars().filter(|c| !c.is_whitespace()).collect();
    let year = year.trim();

    let mut candidates = vec![base.clone()];
    if !year.is_empty() {
        candidates.push(format!("{base} {year}"));
    }
    candidates.push(compact.clone());
    if !year.is_empty() {
        candidates.push(format!("{compact}{year}"));
        candidates.push(format!("{compact}.{year}"));
    }
    candidates.extend(CONTAINER_SUFFIXES.iter().map(|ext| format!("{compact}{ext}")));

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
