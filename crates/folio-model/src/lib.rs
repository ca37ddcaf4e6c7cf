//! Folio Model
//!
//! The display model of the portfolio pipeline and the single total boundary
//! that converts untrusted input into it.
//!
//! # Architecture
//!
//! ```text
//! RawProjectRecord ──normalize──► NormalizedProject
//!        │                              ▲
//!        └── slug / cover ──► resolve ──┘ (CoverDescriptor)
//! ```
//!
//! No async and no IO within this crate.
//!
//! # Example
//!
//! ```rust
//! use folio_model::{normalize, RawProjectRecord};
//!
//! let raw = RawProjectRecord::new().with_title("My Cool Project!!");
//! let project = normalize(&raw);
//!
//! assert_eq!(project.slug, "my-cool-project");
//! assert_eq!(project.description, "No description provided.");
//! ```

#![warn(unreachable_pub)]

pub mod cover;
pub mod normalize;
pub mod project;
pub mod record;
pub mod slug;

pub use cover::{resolve, CoverDescriptor, CoverSource, COVER_ASSET_ROOT, COVER_WIDTH};
pub use normalize::{normalize, normalize_all};
pub use project::{NormalizedProject, ProjectStatus};
pub use record::RawProjectRecord;
pub use slug::{derive_slug, UNTITLED_SLUG};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with project records
    pub use crate::{
        normalize, normalize_all, resolve, CoverDescriptor, NormalizedProject, ProjectStatus,
        RawProjectRecord,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
