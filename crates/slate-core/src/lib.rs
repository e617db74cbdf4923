//! slate-core library.
//!
//! Owns the ordered task list, its flat-file JSON persistence, and user
//! configuration.
//!
//! # Conventions
//!
//! - **Errors**: store operations return typed [`StoreError`]s;
//!   config loading uses `anyhow::Result` with context.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use error::{ErrorCode, StoreError};
pub use model::{Status, Task};
pub use store::TaskStore;
