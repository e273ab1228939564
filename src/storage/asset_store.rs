//! SQLite-backed asset cache.
//!
//! Every operation opens its own connection and drops it before returning,
//! so no handle or file lock outlives a call. Bulk writes run in a single
//! transaction where a bad record is skipped and reported rather than
//! aborting the batch.

use super::schema;
use crate::error::{CacheError, CacheResult};
use crate::types::{AssetKey, ScannedAsset};
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Default time a connection waits on another writer's lock.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A record that could not be applied within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Key of the record that failed.
    pub key: AssetKey,
    /// Why it failed.
    pub reason: String,
}

/// Outcome of a committed bulk upsert or delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Statements that executed successfully.
    pub applied: usize,
    /// Rows changed by those statements.
    pub affected: usize,
    /// Records that were skipped.
    pub failed: Vec<RecordFailure>,
}

impl BatchReport {
    /// Check whether every record in the batch was applied.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of records the batch attempted.
    pub fn attempted(&self) -> usize {
        self.applied + self.failed.len()
    }

    fn record(&mut self, asset: &ScannedAsset, outcome: Result<usize, String>) {
        match outcome {
            Ok(rows) => {
                self.applied += 1;
                self.affected += rows;
            }
            Err(reason) => {
                let key = asset.key();
                warn!(asset = %key, %reason, "failed to execute transaction statement");
                self.failed.push(RecordFailure { key, reason });
            }
        }
    }
}

/// Cache of scanned assets stored in a single SQLite file.
#[derive(Debug, Clone)]
pub struct AssetCache {
    path: PathBuf,
    busy_timeout: Duration,
}

impl AssetCache {
    /// Create a cache handle for the store at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Set how long connections wait for a competing writer's lock.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Path of the backing store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the store, creating the file if needed, and ensure the table exists.
    ///
    /// Safe to call repeatedly; existing rows are untouched.
    pub fn ensure_schema(&self) -> CacheResult<Connection> {
        let conn = Connection::open(&self.path).map_err(|source| self.open_error(source))?;
        self.prepare_connection(&conn)?;

        schema::initialize(&conn).map_err(CacheError::Schema)?;
        debug!(path = %self.path.display(), "asset cache schema ready");
        Ok(conn)
    }

    /// Insert or replace each asset keyed by `(host, port)`.
    ///
    /// Creates the store if it does not exist. Records that fail validation
    /// or execution are skipped and listed in the returned report; the rest
    /// are committed together.
    pub fn upsert(&self, assets: &[ScannedAsset]) -> CacheResult<BatchReport> {
        if assets.is_empty() {
            return Err(CacheError::InvalidArgument(
                "no assets to insert".to_string(),
            ));
        }

        let mut conn = self.ensure_schema()?;
        let tx = conn.transaction().map_err(CacheError::Transaction)?;
        let mut report = BatchReport::default();

        for asset in assets {
            let outcome = asset.validate().map_err(|e| e.to_string()).and_then(|()| {
                tx.prepare_cached(schema::UPSERT_ASSET)
                    .and_then(|mut stmt| {
                        stmt.execute(params![
                            asset.host,
                            asset.port,
                            asset.protocol,
                            asset.state,
                            asset.timestamp,
                        ])
                    })
                    .map_err(|e| e.to_string())
            });
            report.record(asset, outcome);
        }

        tx.commit().map_err(CacheError::Commit)?;
        debug!(
            path = %self.path.display(),
            applied = report.applied,
            failed = report.failed.len(),
            "upserted scanned assets"
        );
        Ok(report)
    }

    /// Delete the rows matching each asset's `(host, port)`.
    ///
    /// Only the key is used; protocol, state and timestamp are ignored. The
    /// store must already exist.
    pub fn delete(&self, assets: &[ScannedAsset]) -> CacheResult<BatchReport> {
        if assets.is_empty() {
            return Err(CacheError::InvalidArgument("no assets found".to_string()));
        }

        let mut conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| self.open_error(source))?;
        self.prepare_connection(&conn)?;

        let tx = conn.transaction().map_err(CacheError::Transaction)?;
        let mut report = BatchReport::default();

        for asset in assets {
            let outcome = tx
                .prepare_cached(schema::DELETE_ASSET)
                .and_then(|mut stmt| stmt.execute(params![asset.host, asset.port]))
                .map_err(|e| e.to_string());
            report.record(asset, outcome);
        }

        tx.commit().map_err(CacheError::Commit)?;
        debug!(
            path = %self.path.display(),
            removed = report.affected,
            failed = report.failed.len(),
            "deleted scanned assets"
        );
        Ok(report)
    }

    /// Read every cached asset ordered by host, then port.
    ///
    /// Never creates the store: a missing file is reported as `NotFound`.
    pub fn list(&self) -> CacheResult<Vec<ScannedAsset>> {
        if !self.path.exists() {
            return Err(CacheError::NotFound(self.path.clone()));
        }

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| self.read_error(source))?;
        conn.busy_timeout(self.busy_timeout)
            .map_err(|source| self.read_error(source))?;

        let mut stmt = conn
            .prepare(schema::SELECT_ASSETS)
            .map_err(|source| self.read_error(source))?;

        let assets = stmt
            .query_map([], row_to_asset)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|source| self.read_error(source))?;

        debug!(path = %self.path.display(), count = assets.len(), "listed scanned assets");
        Ok(assets)
    }

    /// Apply the busy timeout and read the database header.
    ///
    /// SQLite opens files lazily, so a file that is not a database is only
    /// detected here.
    fn prepare_connection(&self, conn: &Connection) -> CacheResult<()> {
        conn.busy_timeout(self.busy_timeout)
            .and_then(|()| schema::schema_version(conn))
            .map(|_| ())
            .map_err(|source| self.open_error(source))
    }

    fn open_error(&self, source: rusqlite::Error) -> CacheError {
        CacheError::Open {
            path: self.path.clone(),
            source,
        }
    }

    fn read_error(&self, source: rusqlite::Error) -> CacheError {
        CacheError::Read {
            path: self.path.clone(),
            source,
        }
    }
}

/// Convert a row from `SELECT_ASSETS` into an asset.
fn row_to_asset(row: &Row<'_>) -> rusqlite::Result<ScannedAsset> {
    Ok(ScannedAsset {
        host: row.get(0)?,
        port: row.get(1)?,
        protocol: row.get(2)?,
        state: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

/// Open the store at `path` and ensure the asset table exists.
pub fn ensure_schema(path: impl AsRef<Path>) -> CacheResult<Connection> {
    AssetCache::new(path.as_ref()).ensure_schema()
}

/// Insert or replace `assets` in the store at `path`.
pub fn upsert(path: impl AsRef<Path>, assets: &[ScannedAsset]) -> CacheResult<BatchReport> {
    AssetCache::new(path.as_ref()).upsert(assets)
}

/// Delete `assets` by key from the store at `path`.
pub fn delete(path: impl AsRef<Path>, assets: &[ScannedAsset]) -> CacheResult<BatchReport> {
    AssetCache::new(path.as_ref()).delete(assets)
}

/// List every asset in the store at `path`.
pub fn list(path: impl AsRef<Path>) -> CacheResult<Vec<ScannedAsset>> {
    AssetCache::new(path.as_ref()).list()
}
