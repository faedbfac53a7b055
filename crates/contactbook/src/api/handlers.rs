use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

use super::{ApiError, AppState, Operation};
use crate::contact::{Contact, ContactFields};
use crate::error::Error;

type Payload = Result<Json<ContactFields>, JsonRejection>;
type IdParam = Result<Path<i64>, PathRejection>;

fn contact_id(operation: Operation, id: IdParam) -> Result<i64, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|rejection| ApiError::invalid_input(operation, rejection.body_text()))
}

fn contact_fields(operation: Operation, payload: Payload) -> Result<ContactFields, ApiError> {
    payload
        .map(|Json(fields)| fields)
        .map_err(|rejection| ApiError::invalid_input(operation, rejection.body_text()))
}

pub(crate) async fn create_contact(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let fields = contact_fields(Operation::Create, payload)?;
    let contact = state
        .with_store(move |store| store.insert(&fields))
        .await
        .map_err(|e| ApiError::new(Operation::Create, e))?;

    info!(id = contact.id, "Created contact");
    Ok((StatusCode::CREATED, Json(contact)))
}

pub(crate) async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state
        .with_store(|store| store.list())
        .await
        .map_err(|e| ApiError::new(Operation::List, e))?;

    debug!(count = contacts.len(), "Listed contacts");
    Ok(Json(contacts))
}

pub(crate) async fn update_contact(
    id: IdParam,
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<Contact>, ApiError> {
    let id = contact_id(Operation::Update, id)?;
    let fields = contact_fields(Operation::Update, payload)?;
    let contact = state
        .with_store(move |store| {
            store
                .replace(id, &fields)?
                .ok_or(Error::ContactNotFound { id })
        })
        .await
        .map_err(|e| ApiError::new(Operation::Update, e))?;

    info!(id, "Updated contact");
    Ok(Json(contact))
}

pub(crate) async fn delete_contact(
    id: IdParam,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let id = contact_id(Operation::Delete, id)?;
    debug!(id, "Delete request received");
    state
        .with_store(move |store| {
            if store.delete(id)? {
                Ok(())
            } else {
                Err(Error::ContactNotFound { id })
            }
        })
        .await
        .map_err(|e| ApiError::new(Operation::Delete, e))?;

    info!(id, "Deleted contact");
    Ok(StatusCode::NO_CONTENT)
}
