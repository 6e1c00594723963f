//! Dependency wiring
//!
//! Providers are chosen from closed configuration enums and injected as
//! `Arc<dyn Port>` into the application services.
//!
//! ```text
//! AppConfig → factories → Arc<dyn Port> → use cases → AppContext
//! ```

pub mod bootstrap;
pub mod factory;

pub use bootstrap::{AppContext, check_dimensions, init_app};
pub use factory::{EmbeddingProviderFactory, JobQueueFactory, VectorStoreFactory};
