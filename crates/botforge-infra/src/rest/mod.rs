//! PostgREST-style HTTP record store.
//!
//! Reads bots and conversations from a hosted Postgres exposed through a
//! PostgREST gateway (`/rest/v1/{table}`), authenticated with a service key.

pub mod store;

pub use store::RestRecordStore;
