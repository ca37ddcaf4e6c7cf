//! Folio App
//!
//! Application layer of the portfolio pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌───────────────┐
//! │ ProjectSource│──►│ LoadOrchestrator │──►│ folio-render  │──► Container
//! │ (seed/remote)│   └────────┬─────────┘   └───────────────┘
//! └──────────────┘            │ seed-if-empty / read
//!                             ▼
//!                     ┌───────────────┐       ┌───────────────┐
//!                     │ ProjectStore  │◄──────│ ProjectEditor │
//!                     └───────┬───────┘       └───────────────┘
//!                             │ KeyValueStore
//!                     ┌───────┴───────┐       ┌─────────────────┐
//!                     │ File / Memory │◄──────│ ThemeController │
//!                     │ / StorageHub  │       └─────────────────┘
//!                     └───────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_app::prelude::*;
//! use folio_render::ProjectGrid;
//!
//! # async fn run() -> folio_app::FolioResult<()> {
//! let app = FolioApp::open(FolioConfig::load(None)?)?;
//! let loader = app.orchestrator(ProjectGrid::default());
//! println!("{}", loader.load_local().await);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod loader;
pub mod notice;
pub mod preference;
pub mod source;
pub mod telemetry;

pub use app::FolioApp;
pub use config::FolioConfig;
pub use editor::{EditMode, EditOutcome, ProjectEditor, ProjectForm, SelectOption};
pub use error::{ConfigError, FetchError, FolioError, FolioResult};
pub use loader::{LoadOrchestrator, LoadOrigin, LoadStatus};
pub use notice::Notice;
pub use preference::{PreferenceSync, ThemeController, ThemeToggle, ToggleGroup};
pub use source::{source_from_location, FileSource, HttpSource, ProjectSource};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        EditMode, EditOutcome, FetchError, FolioApp, FolioConfig, FolioError, LoadOrchestrator,
        LoadStatus, ProjectEditor, ProjectSource, ThemeController,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
