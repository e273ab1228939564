//! # assetcache - A Local Cache for Discovered Network Assets
//!
//! assetcache records the results of network asset discovery in a single
//! SQLite file: which `(host, port)` endpoints were probed, the protocol
//! observed, a state code, and when. Scanners use it to skip known assets and
//! report generators use it to show the inventory found so far.
//!
//! ## Features
//!
//! - **Keyed by endpoint**: one row per `(host, port)`, last write wins
//! - **Bulk writes**: upserts and deletes run in one transaction; a malformed
//!   record is skipped and reported without blocking the rest
//! - **Ordered reads**: listings are sorted by host, then port
//! - **No surprise files**: reads never create the cache
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use assetcache::storage::AssetCache;
//! use assetcache::types::{ProbeState, ScannedAsset};
//!
//! let cache = AssetCache::new("/tmp/assets.db");
//! let report = cache.upsert(&[
//!     ScannedAsset::new("192.168.1.10", 22, ProbeState::Open).with_protocol("ssh"),
//! ])?;
//! assert!(report.is_complete());
//!
//! for asset in cache.list()? {
//!     println!("{} {:?}", asset.key(), asset.protocol);
//! }
//! # Ok::<(), assetcache::CacheError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - The asset record, its key, and well-known state codes
//! - [`storage`] - The SQLite-backed cache
//! - [`config`] - XDG paths and settings
//! - [`error`] - Error types
//! - [`output`] - Plain, JSON, and CSV listings
//! - [`cli`] - Command-line subcommands

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CacheError, CacheResult, CliError};
pub use storage::{AssetCache, BatchReport, RecordFailure};
pub use types::{AssetKey, ProbeState, ScannedAsset};
