//! `SQLite` schema definitions for contactbook.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the contacts table.
///
/// `AUTOINCREMENT` keeps identifiers of deleted contacts from being reused.
pub const CREATE_CONTACTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT,
    last_name TEXT,
    email TEXT,
    phone TEXT,
    company TEXT,
    job_title TEXT
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_CONTACTS_TABLE, CREATE_METADATA_TABLE];

/// Column list shared by every contact `SELECT`, in `row_to_contact` order.
pub const CONTACT_COLUMNS: &str = "id, first_name, last_name, email, phone, company, job_title";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_create_contacts_table_contains_required_columns() {
        assert!(CREATE_CONTACTS_TABLE.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        for column in CONTACT_COLUMNS.split(", ").skip(1) {
            assert!(
                CREATE_CONTACTS_TABLE.contains(&format!("{column} TEXT")),
                "missing column {column}"
            );
        }
    }

    #[test]
    fn test_create_metadata_table_structure() {
        assert!(CREATE_METADATA_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_METADATA_TABLE.contains("value TEXT NOT NULL"));
    }
}
