//! Scanned asset persistence.
//!
//! Provides a SQLite-backed cache keyed by `(host, port)` with bulk upsert,
//! bulk delete, and an ordered full read.

mod asset_store;
pub mod schema;

pub use asset_store::{
    delete, ensure_schema, list, upsert, AssetCache, BatchReport, RecordFailure,
    DEFAULT_BUSY_TIMEOUT,
};
