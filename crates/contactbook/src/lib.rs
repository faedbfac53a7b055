//! `contactbook` - A small contact-management REST service and its client
//!
//! This library provides the contact store, the HTTP API over it, the
//! startup seed step, and a client with a pure state reducer and plain-text
//! presentation.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod seed;
pub mod storage;

pub use api::{build_router, AppState};
pub use client::{ContactApi, ContactBook, HttpContactApi};
pub use config::Config;
pub use contact::{Contact, ContactField, ContactFields};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use seed::{seed_if_empty, SeedOutcome};
pub use storage::ContactStore;
