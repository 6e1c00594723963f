//! Configuration types module

pub mod app;
pub mod logging;
pub mod providers;
pub mod runtime;

pub use app::{AppConfig, TenantSettingValue};
pub use logging::LoggingConfig;
pub use providers::{
    EmbeddingConfig, EmbeddingProviderKind, QueueConfig, QueueKind, VectorStoreConfig,
    VectorStoreKind,
};
pub use runtime::{SearchConfig, WorkerConfig};
