//! Folio Render
//!
//! Turns normalized projects into display elements.
//!
//! # Architecture
//!
//! ```text
//! [NormalizedProject] ──render──► Container
//!                                   └── li ── project-card (data-status)
//!                                               └── shadow root: style + article
//! ```
//!
//! The card itself is a pure function ([`render_card`]) producing a
//! [`ViewNode`] tree; [`ProjectCard`] binds it to a host element. Any
//! [`Container`] can receive the cards; [`ProjectGrid`] is the in-memory one.
//!
//! # Example
//!
//! ```rust
//! use folio_model::{normalize, RawProjectRecord};
//! use folio_render::{render, ProjectGrid, RenderOutcome};
//!
//! let projects = vec![normalize(&RawProjectRecord::new().with_title("A"))];
//! let mut grid = ProjectGrid::default();
//!
//! assert_eq!(render(&mut grid, &projects), RenderOutcome::Rendered(1));
//! assert_eq!(render(&mut grid, &[]), RenderOutcome::Empty);
//! assert!(grid.is_showing_empty_state());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod card;
pub mod container;
pub mod renderer;
pub mod view;

pub use card::{render_card, ProjectCard, CARD_STYLES, CARD_TAG};
pub use container::{Container, ProjectGrid, EMPTY_STATE_MESSAGE};
pub use renderer::{card_item, render, RenderOutcome};
pub use view::{Element, ViewNode};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
