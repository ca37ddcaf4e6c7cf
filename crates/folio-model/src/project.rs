//! Canonical display model for a project

use crate::cover::CoverDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project status
///
/// Only `Complete` and `InProgress` get distinct styling; anything else is
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Finished project
    #[serde(rename = "Complete")]
    Complete,
    /// Work in progress
    #[serde(rename = "In Progress")]
    InProgress,
    /// Missing or unrecognized status
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ProjectStatus {
    /// Map a raw status label onto a known status
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Complete" => Self::Complete,
            "In Progress" => Self::InProgress,
            _ => Self::Unknown,
        }
    }

    /// Display label
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::InProgress => "In Progress",
            Self::Unknown => "Unknown",
        }
    }

    /// CSS modifier for statuses with distinct styling
    #[inline]
    #[must_use]
    pub fn modifier(self) -> Option<&'static str> {
        match self {
            Self::Complete => Some("complete"),
            Self::InProgress => Some("in-progress"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully defaulted project, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedProject {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub stars: u64,
    pub tags: Vec<String>,
    pub demo: String,
    pub code: String,
    pub alt: String,
    pub timeline: String,
    pub role: String,
    /// Used for cover resolution only, not unique
    pub slug: String,
    pub cover: CoverDescriptor,
}
