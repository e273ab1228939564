//! Behavioural tests for the asset cache against real SQLite files.

use assetcache::storage::{self, AssetCache};
use assetcache::types::{AssetKey, ProbeState, ScannedAsset};
use assetcache::CacheError;
use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Temporary directory holding one cache file.
struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("assets.db");
        Self { _dir: dir, path }
    }

    fn cache(&self) -> AssetCache {
        AssetCache::new(&self.path)
    }
}

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn asset(host: &str, port: u16) -> ScannedAsset {
    ScannedAsset::new(host, port, ProbeState::Open)
        .with_protocol("tcp")
        .with_timestamp(at(0))
}

fn keys(assets: &[ScannedAsset]) -> Vec<(String, u16)> {
    assets.iter().map(|a| (a.host.clone(), a.port)).collect()
}

#[test]
fn upsert_then_list_returns_records_sorted() {
    let fx = Fixture::new();
    let cache = fx.cache();
    let input = vec![
        asset("10.0.0.2", 80),
        asset("10.0.0.1", 443),
        asset("10.0.0.1", 22).with_protocol("ssh"),
        asset("example.org", 8080),
    ];

    let report = cache.upsert(&input).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.applied, 4);

    let mut expected = input.clone();
    expected.sort_by(|a, b| a.key().cmp(&b.key()));
    assert_eq!(cache.list().unwrap(), expected);
}

#[test]
fn list_orders_by_host_then_port() {
    let fx = Fixture::new();
    let cache = fx.cache();
    cache
        .upsert(&[asset("b", 80), asset("a", 443), asset("a", 22)])
        .unwrap();

    assert_eq!(
        keys(&cache.list().unwrap()),
        vec![
            ("a".to_string(), 22),
            ("a".to_string(), 443),
            ("b".to_string(), 80)
        ]
    );
}

#[test]
fn port_order_is_numeric() {
    let fx = Fixture::new();
    let cache = fx.cache();
    cache
        .upsert(&[asset("h", 10000), asset("h", 9), asset("h", 100)])
        .unwrap();

    let ports: Vec<u16> = cache.list().unwrap().iter().map(|a| a.port).collect();
    assert_eq!(ports, vec![9, 100, 10000]);
}

#[test]
fn upsert_replaces_whole_record() {
    let fx = Fixture::new();
    let cache = fx.cache();

    let first = ScannedAsset::new("h1", 22, 1)
        .with_protocol("ssh")
        .with_timestamp(at(1));
    let second = ScannedAsset::new("h1", 22, 2)
        .with_protocol("")
        .with_timestamp(at(2));

    cache.upsert(&[first]).unwrap();
    cache.upsert(&[second.clone()]).unwrap();

    let listed = cache.list().unwrap();
    assert_eq!(listed, vec![second]);
    assert_eq!(listed[0].protocol.as_deref(), Some(""));
}

#[test]
fn upsert_replaces_protocol_with_null() {
    let fx = Fixture::new();
    let cache = fx.cache();
    cache.upsert(&[asset("h1", 53).with_protocol("dns")]).unwrap();

    let mut bare = asset("h1", 53);
    bare.protocol = None;
    cache.upsert(&[bare]).unwrap();

    assert_eq!(cache.list().unwrap()[0].protocol, None);
}

#[test]
fn upsert_empty_is_invalid_and_creates_nothing() {
    let fx = Fixture::new();

    let err = fx.cache().upsert(&[]).unwrap_err();
    assert!(matches!(err, CacheError::InvalidArgument(_)));
    assert!(!fx.path.exists());
}

#[test]
fn delete_empty_is_invalid() {
    let fx = Fixture::new();
    fx.cache().ensure_schema().unwrap();

    let err = fx.cache().delete(&[]).unwrap_err();
    assert!(matches!(err, CacheError::InvalidArgument(_)));
}

#[test]
fn list_missing_file_is_not_found_and_creates_nothing() {
    let fx = Fixture::new();

    let err = fx.cache().list().unwrap_err();
    assert!(matches!(err, CacheError::NotFound(ref p) if p == &fx.path));
    assert!(!fx.path.exists());
}

#[test]
fn list_empty_table_is_empty() {
    let fx = Fixture::new();
    fx.cache().ensure_schema().unwrap();

    assert!(fx.cache().list().unwrap().is_empty());
}

#[test]
fn list_non_database_is_read_error() {
    let fx = Fixture::new();
    fs::write(&fx.path, "this is not a sqlite database, just some text padding it out")
        .unwrap();

    let err = fx.cache().list().unwrap_err();
    assert!(matches!(err, CacheError::Read { .. }));
}

#[test]
fn list_database_without_table_is_read_error() {
    let fx = Fixture::new();
    let conn = rusqlite::Connection::open(&fx.path).unwrap();
    conn.execute("CREATE TABLE unrelated (id INTEGER)", []).unwrap();
    drop(conn);

    let err = fx.cache().list().unwrap_err();
    assert!(matches!(err, CacheError::Read { .. }));
}

#[test]
fn ensure_schema_on_non_database_fails() {
    let fx = Fixture::new();
    fs::write(&fx.path, "this is not a sqlite database, just some text padding it out")
        .unwrap();

    let err = fx.cache().ensure_schema().unwrap_err();
    assert!(matches!(err, CacheError::Open { .. }));
}

#[test]
fn upsert_into_non_database_is_open_error() {
    let fx = Fixture::new();
    fs::write(&fx.path, "this is not a sqlite database, just some text padding it out")
        .unwrap();

    let err = fx.cache().upsert(&[asset("h", 22)]).unwrap_err();
    assert!(matches!(err, CacheError::Open { .. }));
}

#[test]
fn delete_from_non_database_is_open_error() {
    let fx = Fixture::new();
    let garbage = "this is not a sqlite database, just some text padding it out";
    fs::write(&fx.path, garbage).unwrap();

    let err = fx.cache().delete(&[asset("h", 22)]).unwrap_err();
    assert!(matches!(err, CacheError::Open { ref path, .. } if path == &fx.path));
    assert_eq!(fs::read_to_string(&fx.path).unwrap(), garbage);
}

#[test]
fn ensure_schema_is_idempotent() {
    let fx = Fixture::new();
    let cache = fx.cache();
    cache.upsert(&[asset("keep", 1)]).unwrap();

    cache.ensure_schema().unwrap();
    cache.ensure_schema().unwrap();

    assert_eq!(keys(&cache.list().unwrap()), vec![("keep".to_string(), 1)]);
}

#[test]
fn delete_matches_key_only() {
    let fx = Fixture::new();
    let cache = fx.cache();
    cache
        .upsert(&[asset("h1", 22), asset("h1", 80), asset("h2", 22)])
        .unwrap();

    // Non-key fields deliberately differ from the stored row.
    let probe = ScannedAsset::new("h1", 22, 99)
        .with_protocol("bogus")
        .with_timestamp(at(12345));
    let report = cache.delete(&[probe]).unwrap();
    assert_eq!(report.affected, 1);

    let remaining = cache.list().unwrap();
    assert_eq!(remaining, vec![asset("h1", 80), asset("h2", 22)]);
}

#[test]
fn delete_missing_file_fails_without_creating() {
    let fx = Fixture::new();

    let err = fx.cache().delete(&[asset("h1", 22)]).unwrap_err();
    assert!(matches!(err, CacheError::Open { .. }));
    assert!(!fx.path.exists());
}

#[test]
fn malformed_record_does_not_block_batch() {
    let fx = Fixture::new();
    let cache = fx.cache();

    let report = cache
        .upsert(&[asset("good", 22), asset("", 80), asset("zero-port", 0), asset("fine", 443)])
        .unwrap();

    assert_eq!(report.applied, 2);
    assert_eq!(
        report
            .failed
            .iter()
            .map(|f| f.key.clone())
            .collect::<Vec<_>>(),
        vec![AssetKey::new("", 80), AssetKey::new("zero-port", 0)]
    );
    assert_eq!(
        keys(&cache.list().unwrap()),
        vec![("fine".to_string(), 443), ("good".to_string(), 22)]
    );
}

#[test]
fn delete_absent_key_does_not_stop_batch() {
    let fx = Fixture::new();
    let cache = fx.cache();
    cache.upsert(&[asset("a", 1), asset("b", 2)]).unwrap();

    let report = cache.delete(&[asset("zzz", 9), asset("a", 1)]).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.affected, 1);
    assert_eq!(keys(&cache.list().unwrap()), vec![("b".to_string(), 2)]);
}

#[test]
fn upsert_creates_missing_store() {
    let fx = Fixture::new();
    assert!(!fx.path.exists());

    storage::upsert(&fx.path, &[asset("new", 8443)]).unwrap();
    assert!(fx.path.exists());
    assert_eq!(storage::list(&fx.path).unwrap().len(), 1);
}

#[test]
fn upsert_into_missing_directory_is_open_error() {
    let fx = Fixture::new();
    let path = fx.path.with_file_name("no-such-dir").join("assets.db");

    let err = storage::upsert(&path, &[asset("h", 1)]).unwrap_err();
    assert!(matches!(err, CacheError::Open { .. }));
}

#[test]
fn separate_handles_see_committed_writes() {
    let fx = Fixture::new();
    let writer = fx.cache();
    let reader = AssetCache::new(fx.path.clone());

    writer.upsert(&[asset("shared", 5000)]).unwrap();
    assert_eq!(reader.list().unwrap().len(), 1);

    reader.delete(&[asset("shared", 5000)]).unwrap();
    assert!(writer.list().unwrap().is_empty());
}

#[test]
fn failed_commit_persists_nothing_from_the_call() {
    let fx = Fixture::new();
    fx.cache().upsert(&[asset("kept", 1)]).unwrap();

    // An open read transaction holds a shared lock, so the writer can take
    // its reserved lock but never the exclusive lock needed to commit.
    let reader = rusqlite::Connection::open(&fx.path).unwrap();
    reader.execute_batch("BEGIN").unwrap();
    let rows: i64 = reader
        .query_row("SELECT COUNT(*) FROM magellan_scanned_assets", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    let err = fx
        .cache()
        .with_busy_timeout(Duration::ZERO)
        .upsert(&[asset("lost", 2)])
        .unwrap_err();
    assert!(matches!(err, CacheError::Commit(_)));

    reader.execute_batch("COMMIT").unwrap();
    drop(reader);

    assert_eq!(keys(&fx.cache().list().unwrap()), vec![("kept".to_string(), 1)]);
}
