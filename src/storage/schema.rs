//! Database schema and statements for the scanned asset table.

use rusqlite::Connection;

/// Name of the single table holding cached assets.
pub const TABLE_NAME: &str = "magellan_scanned_assets";

/// SQL to create the scanned assets table.
pub const CREATE_SCANNED_ASSETS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS magellan_scanned_assets (
    host      TEXT    NOT NULL,
    port      INTEGER NOT NULL,
    protocol  TEXT,
    state     INTEGER,
    timestamp TIMESTAMP,
    PRIMARY KEY (host, port)
)
"#;

/// Insert a record, replacing any existing row with the same `(host, port)`.
pub const UPSERT_ASSET: &str = r#"
INSERT OR REPLACE INTO magellan_scanned_assets (host, port, protocol, state, timestamp)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

/// Delete the row with the given `(host, port)`.
pub const DELETE_ASSET: &str =
    "DELETE FROM magellan_scanned_assets WHERE host = ?1 AND port = ?2";

/// Read every row ordered by host, then port.
pub const SELECT_ASSETS: &str = r#"
SELECT host, port, protocol, state, timestamp
FROM magellan_scanned_assets
ORDER BY host ASC, port ASC
"#;

/// Read the schema cookie from the database header.
///
/// Fails with `NotADatabase` when the file is not a SQLite store.
pub fn schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("PRAGMA schema_version", [], |row| row.get(0))
}

/// Create the table if it does not exist yet.
pub fn initialize(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(CREATE_SCANNED_ASSETS_TABLE, [])?;
    Ok(())
}
