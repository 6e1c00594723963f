//! Embedding job queue implementations

mod in_memory;

pub use in_memory::InMemoryJobQueue;
