//! Database migration system for contactbook.
//!
//! The base schema is created from [`SCHEMA_STATEMENTS`]; numbered
//! migrations then bring an existing database up to [`CURRENT_VERSION`],
//! which is recorded in the `metadata` table.

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// Schema version written by this build.
pub const CURRENT_VERSION: i32 = 1;

/// `metadata` key holding the schema version.
const VERSION_KEY: &str = "schema_version";

/// A single schema step, applied when upgrading past its version.
type Migration = fn(&Connection) -> Result<()>;

/// Migrations indexed by the version they produce.
const MIGRATIONS: &[(i32, Migration)] = &[(1, migrate_v1)];

/// Bring a connection's schema up to [`CURRENT_VERSION`].
///
/// Tables are created if missing; pending migrations run in one transaction.
///
/// # Errors
///
/// Returns an error if schema creation or migration fails, or if the
/// database was written by a newer version of contactbook.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let version = get_schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }
    if version < CURRENT_VERSION {
        let tx = conn.unchecked_transaction()?;
        run_migrations(&tx, version)?;
        tx.commit()?;
        info!("Migrated contact schema from v{} to v{}", version, CURRENT_VERSION);
    }

    Ok(())
}

/// The recorded schema version, or 0 for a database never migrated.
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        Some(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
        None => Ok(0),
    }
}

/// Record `version` as the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

/// Apply every migration after `from_version`, then record the new version.
fn run_migrations(conn: &Connection, from_version: i32) -> Result<()> {
    for version in (from_version + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
    }
    set_schema_version(conn, CURRENT_VERSION)
}

/// Apply the migration that produces `version`.
fn run_migration(conn: &Connection, version: i32) -> Result<()> {
    let (_, migrate) = MIGRATIONS
        .iter()
        .find(|(v, _)| *v == version)
        .ok_or_else(|| Error::DatabaseMigration {
            message: format!("unknown migration version: {version}"),
        })?;
    debug!("Applying contact schema migration v{}", version);
    migrate(conn)
}

/// Version 1 is the base schema, which `SCHEMA_STATEMENTS` already created.
fn migrate_v1(_conn: &Connection) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_conn() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    fn create_metadata_only(conn: &Connection) {
        conn.execute(
            "CREATE TABLE metadata (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .unwrap();
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_fresh_database_reaches_current_version() {
        let conn = blank_conn();
        create_metadata_only(&conn);
        assert_eq!(get_schema_version(&conn).unwrap(), 0);

        initialize_schema(&conn).unwrap();
        assert!(table_exists(&conn, "contacts"));
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_reopening_keeps_contacts() {
        let conn = blank_conn();
        initialize_schema(&conn).unwrap();
        conn.execute("INSERT INTO contacts (first_name) VALUES ('Ann')", [])
            .unwrap();

        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_invalid_schema_version_is_rejected() {
        let conn = blank_conn();
        create_metadata_only(&conn);
        conn.execute(
            "INSERT INTO metadata (key, value) VALUES (?1, 'one')",
            [VERSION_KEY],
        )
        .unwrap();

        let err = get_schema_version(&conn).unwrap_err();
        assert!(err.to_string().contains("invalid schema version"));
    }

    #[test]
    fn test_newer_schema_version_is_rejected() {
        let conn = blank_conn();
        create_metadata_only(&conn);
        set_schema_version(&conn, CURRENT_VERSION + 1).unwrap();

        let err = initialize_schema(&conn).unwrap_err();
        assert!(matches!(err, Error::DatabaseMigration { .. }));
        assert!(err.to_string().contains("newer"));
    }

    #[test]
    fn test_every_version_has_a_migration() {
        for version in 1..=CURRENT_VERSION {
            assert!(
                MIGRATIONS.iter().any(|(v, _)| *v == version),
                "missing migration v{version}"
            );
        }
    }

    #[test]
    fn test_run_migration_unknown_version() {
        let conn = blank_conn();
        initialize_schema(&conn).unwrap();

        let err = run_migration(&conn, 999).unwrap_err();
        assert!(err.to_string().contains("999"));
    }
}
