//! Path parameter extraction from URL templates.
//!
//! # Responsibilities
//! - Find `{name}` placeholders in a route pattern, left to right
//! - Keep dotted names (`{user.profile.id}`) verbatim
//!
//! # Design Decisions
//! - A placeholder body may not contain `/`, `{` or `}`; anything else
//!   (unbalanced or nested braces) simply fails to match
//! - Pure function over `&str`: no state, no allocation beyond the result

use std::sync::LazyLock;

use regex::Regex;

/// `{` + one or more chars excluding `/`, `{`, `}` + `}`.
pub(crate) static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([^/{}]+)\}").expect("placeholder expression is a valid regex")
});

/// Extract the path parameter names of `pattern`, in order of appearance.
///
/// Returns an empty vector when the pattern has no placeholders.
pub fn extract_params(pattern: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(pattern)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
