//! Stable identifiers derived from display names.

/// Identifier used when a display name contains no alphanumeric characters.
pub const PLACEHOLDER_SLUG: &str = "agent";

/// Derive a stable identifier from a display name.
///
/// The name is split on whitespace, each token keeps only its alphanumeric
/// characters (lowercased), and non-empty tokens are joined with hyphens.
/// A name that yields nothing maps to [`PLACEHOLDER_SLUG`].
///
/// ```
/// use planner_domain::slugify;
///
/// assert_eq!(slugify("Backend & Data Lead"), "backend-data-lead");
/// assert_eq!(slugify("  ?!  "), "agent");
/// ```
pub fn slugify(text: &str) -> String {
    let slug = text
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        PLACEHOLDER_SLUG.to_string()
    } else {
        slug
    }
}
