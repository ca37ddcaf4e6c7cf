//! Folio Store
//!
//! Persistence for the portfolio pipeline:
//!
//! - [`KeyValueStore`]: string-keyed, string-valued backend seam
//! - [`MemoryStore`] / [`FileStore`]: in-process and on-disk backends
//! - [`StorageHub`]: one backend shared by several contexts, with change
//!   notifications between them
//! - [`ProjectStore`]: CRUD over the ordered project list
//!
//! # Example
//!
//! ```rust
//! use folio_model::RawProjectRecord;
//! use folio_store::{MemoryStore, ProjectStore};
//!
//! let store = ProjectStore::with_default_key(MemoryStore::new());
//! store.create(RawProjectRecord::new().with_title("A"));
//! store.create(RawProjectRecord::new().with_title("B"));
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.delete(0).unwrap().title_str(), Some("A"));
//! assert_eq!(store.delete(99), None);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod file;
pub mod hub;
pub mod kv;
pub mod project_store;

pub use error::{KvError, StoreError, StoreResult};
pub use file::FileStore;
pub use hub::{ContextId, ContextStore, StorageEvent, StorageEvents, StorageHub};
pub use kv::{KeyValueStore, MemoryStore};
pub use project_store::{ProjectStore, DEFAULT_PROJECTS_KEY};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
