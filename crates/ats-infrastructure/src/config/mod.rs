//! Application configuration
//!
//! Typed sections deserialized by Figment from defaults, an `ats.toml` file
//! and `ATS__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
