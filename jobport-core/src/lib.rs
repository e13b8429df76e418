//! Jobport Core - Shared data structures for the recruitment portal client
//!
//! This module defines the types, error handling, configuration and logging
//! infrastructure used by every other jobport crate.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tokio;
pub use tracing;
