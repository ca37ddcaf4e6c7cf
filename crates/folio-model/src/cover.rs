//! Cover image resolution
//!
//! A project's `cover` is either a hosted image URL, used verbatim, or an asset
//! slug that maps onto the local asset layout:
//!
//! ```text
//! assets/images/projects/{slug}/{slug}-800w.webp
//! assets/images/projects/{slug}/{slug}-800w.jpg
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Root directory of locally hosted project covers
pub const COVER_ASSET_ROOT: &str = "assets/images/projects";

/// Width of the generated cover renditions, in pixels
pub const COVER_WIDTH: u32 = 800;

static REMOTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:https?:)?//").expect("valid regex"));

/// One responsive image candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverSource {
    /// `srcset` value, including the width descriptor
    pub srcset: String,
    /// MIME type of the rendition
    #[serde(rename = "type")]
    pub mime: String,
}

/// Resolved cover image for a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverDescriptor {
    /// Preferred renditions, in priority order
    pub sources: Vec<CoverSource>,
    /// Image used when no source is picked
    pub fallback: String,
}

impl CoverDescriptor {
    /// Descriptor for an externally hosted image
    #[inline]
    #[must_use]
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            sources: Vec::new(),
            fallback: url.into(),
        }
    }

    /// Descriptor for a local, convention-based asset
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        let base = format!("{COVER_ASSET_ROOT}/{slug}/{slug}-{COVER_WIDTH}w");
        Self {
            sources: vec![
                CoverSource {
                    srcset: format!("{base}.webp {COVER_WIDTH}w"),
                    mime: "image/webp".to_string(),
                },
                CoverSource {
                    srcset: format!("{base}.jpg {COVER_WIDTH}w"),
                    mime: "image/jpeg".to_string(),
                },
            ],
            fallback: format!("{base}.jpg"),
        }
    }

    /// Image URL for the base `img` element
    ///
    /// The fallback wins; the first source's srcset is the last resort.
    #[must_use]
    pub fn img_src(&self) -> &str {
        if self.fallback.is_empty() {
            self.sources.first().map_or("", |s| s.srcset.as_str())
        } else {
            &self.fallback
        }
    }
}

/// Check whether a cover value is an absolute or protocol-relative URL
#[inline]
#[must_use]
pub fn is_remote_url(value: &str) -> bool {
    REMOTE_URL.is_match(value)
}

/// Resolve a raw cover value into a [`CoverDescriptor`]
///
/// A blank or missing cover falls back to `fallback_slug`.
#[must_use]
pub fn resolve(cover: Option<&str>, fallback_slug: &str) -> CoverDescriptor {
    match cover.map(str::trim).filter(|c| !c.is_empty()) {
        Some(url) if is_remote_url(url) => CoverDescriptor::remote(url),
        Some(slug) => CoverDescriptor::from_slug(slug),
        None => CoverDescriptor::from_slug(fallback_slug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolve_remote_url_verbatim() {
        let cover = resolve(Some("https://x/y.png"), "fallback");
        assert_eq!(cover, CoverDescriptor::remote("https://x/y.png"));
    }

    #[test]
    fn resolve_remote_url_variants() {
        assert!(resolve(Some("HTTP://cdn/img.jpg"), "s").sources.is_empty());
        assert!(resolve(Some("//cdn/img.jpg"), "s").sources.is_empty());
        assert!(!resolve(Some("ftp://cdn/img.jpg"), "s").sources.is_empty());
    }

    #[test]
    fn resolve_missing_cover_uses_slug() {
        let cover = resolve(None, "demo-slug");
        assert_eq!(cover.sources.len(), 2);
        assert!(cover.sources.iter().all(|s| s.srcset.contains("demo-slug")));
        assert!(cover.fallback.contains("demo-slug"));
        assert_eq!(cover.sources[0].mime, "image/webp");
        assert_eq!(cover.sources[1].mime, "image/jpeg");
    }

    #[test]
    fn resolve_explicit_cover_slug() {
        let cover = resolve(Some("retro-arcade"), "ignored");
        assert_eq!(
            cover.sources[0].srcset,
            "assets/images/projects/retro-arcade/retro-arcade-800w.webp 800w"
        );
        assert_eq!(
            cover.fallback,
            "assets/images/projects/retro-arcade/retro-arcade-800w.jpg"
        );
    }

    #[test]
    fn resolve_blank_cover_uses_slug() {
        let cover = resolve(Some("   "), "fallback");
        assert!(cover.fallback.contains("fallback"));
    }

    #[test]
    fn img_src_prefers_fallback() {
        let cover = CoverDescriptor::from_slug("a");
        assert_eq!(cover.img_src(), cover.fallback);

        let bare = CoverDescriptor {
            sources: vec![CoverSource {
                srcset: "x.webp".into(),
                mime: "image/webp".into(),
            }],
            fallback: String::new(),
        };
        assert_eq!(bare.img_src(), "x.webp");
    }
}
