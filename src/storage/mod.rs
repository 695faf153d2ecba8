//! Storage module: key-value backends, typed state access and configuration.

pub mod config;
pub mod database;
pub mod kv;
pub mod repository;
pub mod schema;

pub use config::{ConfigError, EngineConfig};
pub use database::SqliteStore;
pub use kv::{KeyValueStore, MemoryStore, StoreError};
pub use repository::{StateKey, StateRepository};
