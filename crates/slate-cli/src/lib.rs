//! slate-cli library surface.
//!
//! The `slate` binary in `main.rs` is a thin wrapper; the TUI lives here so
//! it can be driven end-to-end in integration tests without a real terminal.

pub mod tui;
