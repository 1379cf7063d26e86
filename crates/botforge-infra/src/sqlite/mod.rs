//! SQLite storage layer.
//!
//! Local record store backed by SQLite with WAL mode and split read/write
//! connection pools. Used for self-hosted deployments, `botforge seed`, and tests.

pub mod pool;
pub mod store;

pub use pool::DatabasePool;
pub use store::SqliteRecordStore;
