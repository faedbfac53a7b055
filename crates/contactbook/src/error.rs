//! Error types for contactbook.
//!
//! This module defines the error type shared by the store, the HTTP service,
//! the client and the command-line front end.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for contactbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Contact Errors ===
    /// No contact exists with the given identifier.
    #[error("contact {id} not found")]
    ContactNotFound {
        /// The identifier that was looked up.
        id: i64,
    },

    /// A request carried input that could not be accepted.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the rejected input.
        message: String,
    },

    // === HTTP Errors ===
    /// The server could not bind its listening socket.
    #[error("failed to bind {addr}: {source}")]
    ServerBind {
        /// Address the server tried to bind.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An HTTP request to the contact service failed in transport.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The contact service answered with a non-success status.
    #[error("contact service returned {status}: {message}")]
    ApiStatus {
        /// The HTTP status code.
        status: u16,
        /// The message extracted from the response body.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for contactbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an error for a non-success API response.
    #[must_use]
    pub fn api_status(status: u16, message: impl Into<String>) -> Self {
        Self::ApiStatus {
            status,
            message: message.into(),
        }
    }

    /// Check if this error means the contact does not exist.
    ///
    /// Covers both the local store lookup and a 404 from the service.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ContactNotFound { .. } | Self::ApiStatus { status: 404, .. }
        )
    }

    /// Check if this error was caused by the caller's input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
