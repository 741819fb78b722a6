//! Persisted server registry for mcpman.
//!
//! # Architecture
//!
//! Two layers:
//!
//! - [`SettingsStore`] - a durable key-value seam: read the full server list,
//!   write the full server list. [`JsonFileStore`] is the production
//!   implementation, persisting JSON under the user's home directory.
//! - [`ServerRegistry`] - CRUD over the store with the registry invariants:
//!   names are unique (case-sensitive), records are addressed by their
//!   `(name, url)` pair, order is preserved across updates.
//!
//! Every registry operation re-reads the store, so edits made to the settings
//! file outside the process are observed immediately. Mutations are
//! read-modify-write of the whole list; the registry provides no transactional
//! isolation between concurrent mutators (single-user usage model).

mod registry;
mod store;

pub use registry::{RegistryError, ServerRegistry};
pub use store::{default_settings_path, JsonFileStore, SettingsStore, StoreError};
