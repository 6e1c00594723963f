//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that support the application and
//! domain layers.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered TOML/env configuration |
//! | [`constants`] | Infrastructure defaults (file names, env prefixes) |
//! | [`di`] | Composition root and provider factories |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use di::{AppContext, init_app};
pub use error_ext::ErrorContext;
