use std::sync::LazyLock;

use regex::Regex;

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Converts a display name into the URL slug used for card paths.
///
/// Lowercases, spells out `+` and `#` (so "C++" and "C#" stay distinct), collapses
/// every other run of non-alphanumerics into one `-`, then trims dashes at the ends.
pub fn slugify(name: &str) -> String {
    let lowered = name
        .to_lowercase()
        .replace('+', "plus")
        .replace('#', "sharp");
    NON_SLUG_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
