//! Storage layer for contactbook.
//!
//! This module provides `SQLite`-based persistent storage for contacts,
//! with create/read/replace/delete by identifier.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::contact::{Contact, ContactFields};
use crate::error::{Error, Result};

use self::schema::CONTACT_COLUMNS;

/// Persistent collection of contacts.
///
/// Every method runs a single statement (or one transaction for
/// [`ContactStore::insert_many`]), so each write is atomic on its own.
/// Nothing coordinates writes across calls: concurrent replaces of the same
/// contact are last-write-wins.
#[derive(Debug)]
pub struct ContactStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl ContactStore {
    /// Open or create a contact database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening contact database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Contact database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store, used by tests and throwaway servers.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new contact and return it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert(&self, fields: &ContactFields) -> Result<Contact> {
        let id = Self::insert_on(&self.conn, fields)?;
        debug!("Inserted contact {}", id);
        Ok(Contact::new(id, fields.clone()))
    }

    /// Insert several contacts in one transaction.
    ///
    /// Either every contact is stored or none is. Returns how many were
    /// inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert_many(&self, batch: &[ContactFields]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        for fields in batch {
            Self::insert_on(&tx, fields)?;
        }
        tx.commit()?;
        debug!("Inserted {} contacts", batch.len());
        Ok(batch.len())
    }

    fn insert_on(conn: &Connection, fields: &ContactFields) -> Result<i64> {
        conn.execute(
            r"
            INSERT INTO contacts (first_name, last_name, email, phone, company, job_title)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                fields.first_name,
                fields.last_name,
                fields.email,
                fields.phone,
                fields.company,
                fields.job_title,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get every contact in store order (ascending identifier).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list(&self) -> Result<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id ASC"))?;

        let contacts = stmt
            .query_map([], Self::row_to_contact)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(contacts)
    }

    /// Get a contact by its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: i64) -> Result<Option<Contact>> {
        let result = self
            .conn
            .query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
                [id],
                Self::row_to_contact,
            )
            .optional()?;
        Ok(result)
    }

    /// Replace every field of an existing contact.
    ///
    /// Fields absent from `fields` are cleared. Returns the contact as stored
    /// after the update, or `None` if no contact has this identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn replace(&self, id: i64, fields: &ContactFields) -> Result<Option<Contact>> {
        let affected = self.conn.execute(
            r"
            UPDATE contacts
            SET first_name = ?2, last_name = ?3, email = ?4,
                phone = ?5, company = ?6, job_title = ?7
            WHERE id = ?1
            ",
            params![
                id,
                fields.first_name,
                fields.last_name,
                fields.email,
                fields.phone,
                fields.company,
                fields.job_title,
            ],
        )?;

        if affected == 0 {
            debug!("No contact {} to replace", id);
            return Ok(None);
        }
        self.get(id)
    }

    /// Delete a contact by identifier.
    ///
    /// Returns `true` if a contact was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    /// Count stored contacts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a database row to a Contact.
    fn row_to_contact(row: &rusqlite::Row) -> rusqlite::Result<Contact> {
        Ok(Contact {
            id: row.get(0)?,
            fields: ContactFields {
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                email: row.get(3)?,
                phone: row.get(4)?,
                company: row.get(5)?,
                job_title: row.get(6)?,
            },
        })
    }
}
