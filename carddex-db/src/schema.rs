//! SQLite schema creation and migration.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Connection-level settings every handle needs.
///
/// `case_sensitive_like` makes `LIKE '%x%'` a case-sensitive substring
/// filter; archetype name-membership queries depend on it.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys=ON; PRAGMA case_sensitive_like=ON;";

/// Create all tables, the effect-text index, and its sync triggers if they
/// don't exist.
///
/// This is idempotent — safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch(CONNECTION_PRAGMAS)?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(CONNECTION_PRAGMAS)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Card colors with their classifier sort position
CREATE TABLE IF NOT EXISTS card_colors (
    color_id INTEGER PRIMARY KEY,
    card_color TEXT NOT NULL UNIQUE
);

-- Cards
CREATE TABLE IF NOT EXISTS card_info (
    card_number TEXT PRIMARY KEY,
    color_id INTEGER REFERENCES card_colors(color_id),
    card_color TEXT NOT NULL,
    card_name TEXT NOT NULL,
    card_attribute TEXT NOT NULL,
    card_effect TEXT NOT NULL,
    monster_type TEXT,
    monster_attack INTEGER,
    monster_defense INTEGER
);
CREATE INDEX IF NOT EXISTS idx_card_info_name ON card_info(card_name);

-- Full-text index over effect text, kept in sync by triggers
CREATE VIRTUAL TABLE IF NOT EXISTS card_effect_fts USING fts5(
    card_effect,
    content='card_info'
);
CREATE TRIGGER IF NOT EXISTS card_info_fts_insert AFTER INSERT ON card_info BEGIN
    INSERT INTO card_effect_fts(rowid, card_effect) VALUES (new.rowid, new.card_effect);
END;
CREATE TRIGGER IF NOT EXISTS card_info_fts_delete AFTER DELETE ON card_info BEGIN
    INSERT INTO card_effect_fts(card_effect_fts, rowid, card_effect)
    VALUES ('delete', old.rowid, old.card_effect);
END;
CREATE TRIGGER IF NOT EXISTS card_info_fts_update AFTER UPDATE ON card_info BEGIN
    INSERT INTO card_effect_fts(card_effect_fts, rowid, card_effect)
    VALUES ('delete', old.rowid, old.card_effect);
    INSERT INTO card_effect_fts(rowid, card_effect) VALUES (new.rowid, new.card_effect);
END;

-- Products and their card contents
CREATE TABLE IF NOT EXISTS products (
    product_id TEXT PRIMARY KEY,
    product_locale TEXT NOT NULL,
    product_name TEXT NOT NULL,
    product_type TEXT NOT NULL,
    product_sub_type TEXT NOT NULL,
    product_release_date TEXT
);
CREATE TABLE IF NOT EXISTS product_contents (
    product_id TEXT NOT NULL REFERENCES products(product_id),
    card_number TEXT NOT NULL REFERENCES card_info(card_number),
    product_position TEXT NOT NULL,
    card_rarity TEXT NOT NULL,
    PRIMARY KEY (product_id, card_number, product_position, card_rarity)
);

-- Restriction scores
CREATE TABLE IF NOT EXISTS card_scores (
    card_number TEXT NOT NULL REFERENCES card_info(card_number),
    format TEXT NOT NULL,
    effective_date TEXT NOT NULL,
    score INTEGER NOT NULL,
    PRIMARY KEY (card_number, format, effective_date)
);
CREATE INDEX IF NOT EXISTS idx_card_scores_format ON card_scores(format, effective_date);
"#;
