//! Terminal interface for the `cryptkit` binary.
//!
//! - [`display`]: metadata and strength tables, status lines
//! - [`progress`]: progress bar driven by library observers
//! - [`prompt`]: masked password entry and confirmations

pub mod display;
pub mod progress;
pub mod prompt;
