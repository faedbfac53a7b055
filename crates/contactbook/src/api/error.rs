use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::error::Error;

/// The API operation a failure happened in.
///
/// Status codes and body shapes differ per operation, so errors carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /contacts`
    Create,
    /// `GET /contacts`
    List,
    /// `PUT /contacts/:id`
    Update,
    /// `DELETE /contacts/:id`
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Error creating contact",
            Self::List => "Error fetching contacts",
            Self::Update => "Error updating contact",
            Self::Delete => "Failed to delete contact",
        }
    }
}

/// A failed API request, converted to a JSON error response.
///
/// | Cause | Status |
/// |---|---|
/// | contact not found | 404 |
/// | invalid body or identifier | 400 |
/// | store failure on list | 500 |
/// | store failure on create/update/delete | 400 |
#[derive(Debug)]
pub struct ApiError {
    operation: Operation,
    source: Error,
}

impl ApiError {
    /// Attach the failing operation to an error.
    #[must_use]
    pub fn new(operation: Operation, source: Error) -> Self {
        Self { operation, source }
    }

    /// A rejected request body or path parameter.
    #[must_use]
    pub fn invalid_input(operation: Operation, message: impl Into<String>) -> Self {
        Self::new(operation, Error::invalid_input(message))
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        if self.source.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.source.is_invalid_input() || self.operation != Operation::List {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// The JSON body sent to the client.
    #[must_use]
    pub fn body(&self) -> Value {
        let not_found = self.source.is_not_found();
        match self.operation {
            Operation::Delete if not_found => json!({ "error": "Contact not found" }),
            Operation::Delete => json!({ "error": self.operation.failure_message() }),
            _ if not_found => json!({ "message": "Contact not found" }),
            _ => json!({
                "message": self.operation.failure_message(),
                "error": self.source.to_string(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(operation = ?self.operation, error = %self.source, "Contact request failed");
        } else {
            warn!(operation = ?self.operation, error = %self.source, "Contact request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}
