//! Project normalization
//!
//! [`normalize`] is the only way from a [`RawProjectRecord`] to a
//! [`NormalizedProject`]. It is total: every input, however malformed,
//! produces a fully populated project.

use crate::cover::resolve;
use crate::project::{NormalizedProject, ProjectStatus};
use crate::record::RawProjectRecord;
use crate::slug::derive_slug;
use serde_json::Value;

/// Title used when none is provided
pub const DEFAULT_TITLE: &str = "Untitled Project";

/// Description used when none is provided
pub const DEFAULT_DESCRIPTION: &str = "No description provided.";

/// Link target used when a demo or code link is missing
pub const PLACEHOLDER_LINK: &str = "#";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn text_or(value: Option<&str>, default: &str) -> String {
    non_blank(value).unwrap_or(default).to_string()
}

/// Coerce a loosely typed star count into a non-negative integer
///
/// Numbers and numeric strings are accepted; fractions truncate; anything
/// negative, non-finite or non-numeric becomes zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_stars(value: Option<&Value>) -> u64 {
    let float = match value {
        Some(Value::Number(n)) => {
            if let Some(whole) = n.as_u64() {
                return whole;
            }
            n.as_f64()
        }
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match float {
        Some(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}

/// Convert a raw record into the display model
#[must_use]
pub fn normalize(raw: &RawProjectRecord) -> NormalizedProject {
    let title = text_or(raw.title_str(), DEFAULT_TITLE);
    let slug = match non_blank(raw.slug_str()) {
        Some(explicit) => explicit.to_string(),
        None => derive_slug(raw.title_str().unwrap_or_default()),
    };
    let cover = resolve(raw.cover_str(), &slug);
    let alt = match non_blank(raw.alt_str()) {
        Some(alt) => alt.to_string(),
        None => format!("{title} cover"),
    };

    NormalizedProject {
        description: text_or(raw.description_str(), DEFAULT_DESCRIPTION),
        status: raw
            .status_str()
            .map_or(ProjectStatus::Unknown, ProjectStatus::from_label),
        stars: coerce_stars(raw.stars.as_ref()),
        tags: raw.tag_list(),
        demo: text_or(raw.demo_str(), PLACEHOLDER_LINK),
        code: text_or(raw.code_str(), PLACEHOLDER_LINK),
        timeline: raw.timeline_str().unwrap_or_default().to_string(),
        role: raw.role_str().unwrap_or_default().to_string(),
        title,
        alt,
        slug,
        cover,
    }
}

/// Normalize a list of records, preserving order
#[must_use]
pub fn normalize_all(records: &[RawProjectRecord]) -> Vec<NormalizedProject> {
    records.iter().map(normalize).collect()
}
