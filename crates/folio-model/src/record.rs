//! Raw project records as they arrive from seed files, remote sources and the store.
//!
//! Every field is optional and loosely typed: a wrong-typed value never fails
//! deserialization, it is simply ignored later by [`crate::normalize`].
//! Fields this crate does not know about are kept so they survive a round-trip
//! through the store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untrusted, partially populated description of one portfolio project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProjectRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<Value>,
    /// Unrecognized fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn as_text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

impl RawProjectRecord {
    /// Create an empty record
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of records
    ///
    /// # Errors
    /// Returns the decoder error when `json` is not an array of objects.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Encode a list of records as a JSON array
    ///
    /// # Errors
    /// Only fails if a preserved extra value cannot be encoded.
    pub fn list_to_json(records: &[Self]) -> Result<String, serde_json::Error> {
        serde_json::to_string(records)
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Value::String(title.into()));
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Value::String(description.into()));
        self
    }

    /// With status label
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(Value::String(status.into()));
        self
    }

    /// With star count
    #[inline]
    #[must_use]
    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stars = Some(Value::from(stars));
        self
    }

    /// With tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags.into_iter().map(|t| Value::String(t.into())).collect();
        self.tags = Some(Value::Array(tags));
        self
    }

    /// With demo link
    #[inline]
    #[must_use]
    pub fn with_demo(mut self, demo: impl Into<String>) -> Self {
        self.demo = Some(Value::String(demo.into()));
        self
    }

    /// With source code link
    #[inline]
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(Value::String(code.into()));
        self
    }

    /// With cover slug or URL
    #[inline]
    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(Value::String(cover.into()));
        self
    }

    /// With cover alt text
    #[inline]
    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(Value::String(alt.into()));
        self
    }

    /// With timeline
    #[inline]
    #[must_use]
    pub fn with_timeline(mut self, timeline: impl Into<String>) -> Self {
        self.timeline = Some(Value::String(timeline.into()));
        self
    }

    /// With role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(Value::String(role.into()));
        self
    }

    /// With explicit slug
    #[inline]
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(Value::String(slug.into()));
        self
    }

    /// Title, if present as a string
    #[inline]
    #[must_use]
    pub fn title_str(&self) -> Option<&str> {
        as_text(self.title.as_ref())
    }

    /// Description, if present as a string
    #[inline]
    #[must_use]
    pub fn description_str(&self) -> Option<&str> {
        as_text(self.description.as_ref())
    }

    /// Status label, if present as a string
    #[inline]
    #[must_use]
    pub fn status_str(&self) -> Option<&str> {
        as_text(self.status.as_ref())
    }

    /// Demo link, if present as a string
    #[inline]
    #[must_use]
    pub fn demo_str(&self) -> Option<&str> {
        as_text(self.demo.as_ref())
    }

    /// Code link, if present as a string
    #[inline]
    #[must_use]
    pub fn code_str(&self) -> Option<&str> {
        as_text(self.code.as_ref())
    }

    /// Cover value, if present as a string
    #[inline]
    #[must_use]
    pub fn cover_str(&self) -> Option<&str> {
        as_text(self.cover.as_ref())
    }

    /// Alt text, if present as a string
    #[inline]
    #[must_use]
    pub fn alt_str(&self) -> Option<&str> {
        as_text(self.alt.as_ref())
    }

    /// Timeline, if present as a string
    #[inline]
    #[must_use]
    pub fn timeline_str(&self) -> Option<&str> {
        as_text(self.timeline.as_ref())
    }

    /// Role, if present as a string
    #[inline]
    #[must_use]
    pub fn role_str(&self) -> Option<&str> {
        as_text(self.role.as_ref())
    }

    /// Explicit slug, if present as a string
    #[inline]
    #[must_use]
    pub fn slug_str(&self) -> Option<&str> {
        as_text(self.slug.as_ref())
    }

    /// String members of `tags`; anything else yields an empty list
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        match &self.tags {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}
