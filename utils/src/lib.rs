//! Shared infrastructure utilities for mcpman.
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename), used by
//!   the registry's settings store.

pub mod atomic_write;

pub use atomic_write::{atomic_write, PersistMode};
