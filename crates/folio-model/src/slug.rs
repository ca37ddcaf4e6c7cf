//! Slug derivation for project titles.

use once_cell::sync::Lazy;
use regex::Regex;

/// Slug used when a title yields no usable characters
pub const UNTITLED_SLUG: &str = "untitled";

static NON_SLUG_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Derive a slug from a title.
///
/// Lower-cases and trims the title, collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, then strips leading and trailing dashes.
/// Falls back to [`UNTITLED_SLUG`] when nothing is left.
#[must_use]
pub fn derive_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let collapsed = NON_SLUG_RUN.replace_all(lowered.trim(), "-");
    let slug = collapsed.trim_matches('-');
    if slug.is_empty() {
        UNTITLED_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_slug_collapses_separators() {
        assert_eq!(derive_slug("My Cool Project!!"), "my-cool-project");
        assert_eq!(derive_slug("Hello---World"), "hello-world");
        assert_eq!(derive_slug("  Spaced   Out  "), "spaced-out");
    }

    #[test]
    fn derive_slug_keeps_digits() {
        assert_eq!(derive_slug("Repo 123"), "repo-123");
        assert_eq!(derive_slug("2048"), "2048");
    }

    #[test]
    fn derive_slug_strips_edges() {
        assert_eq!(derive_slug("--edge--"), "edge");
        assert_eq!(derive_slug("(Beta) Tool."), "beta-tool");
    }

    #[test]
    fn derive_slug_non_ascii_becomes_separator() {
        assert_eq!(derive_slug("Café Menu"), "caf-menu");
    }

    #[test]
    fn derive_slug_falls_back_when_empty() {
        assert_eq!(derive_slug(""), UNTITLED_SLUG);
        assert_eq!(derive_slug("   "), UNTITLED_SLUG);
        assert_eq!(derive_slug("!!!"), UNTITLED_SLUG);
    }
}
