//! Waste Progress - gamification engine for waste logging
//!
//! Turns logged waste entries into day streaks, permanent badges and
//! time-boxed challenges. Storage is an injected key-value capability;
//! every operation takes the current time explicitly.

pub mod gamification;
pub mod storage;
pub mod waste;

// Re-export commonly used types
pub use gamification::{ProgressEngine, ProgressError, ProgressOutcome, UserContext};
pub use storage::{EngineConfig, KeyValueStore, MemoryStore, SqliteStore};
pub use waste::{points_for, WasteTally, WasteType};
