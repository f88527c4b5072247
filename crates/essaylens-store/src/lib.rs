//! essaylens-store — `SubmissionStore` implementations.
//!
//! Two backends: an in-memory store for tests and ephemeral runs, and a
//! SQLite store for everything durable. Both honor the same contract: the
//! store assigns ids and timestamps, updates recompute derived counts on a
//! text change, and an existing assessment is never rewritten.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
