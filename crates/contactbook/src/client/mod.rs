//! Client for the contact service.
//!
//! [`ContactApi`] is the seam between the client and the network;
//! [`HttpContactApi`] implements it over HTTP. [`ContactBook`] holds the
//! client's [`ViewState`], feeds actions through [`state::update`] and runs
//! the resulting effects against a `ContactApi`.

pub mod state;
pub mod view;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::contact::{Contact, ContactFields};
use crate::error::{Error, Result};

pub use state::{Action, Dialog, Effect, Notice, SortDirection, SortState, ViewState};

/// Operations of the contact service.
#[async_trait]
pub trait ContactApi: Send + Sync {
    /// Fetch every contact.
    async fn list(&self) -> Result<Vec<Contact>>;

    /// Create a contact and return it with its identifier.
    async fn create(&self, fields: &ContactFields) -> Result<Contact>;

    /// Replace a contact's fields and return the updated contact.
    async fn update(&self, id: i64, fields: &ContactFields) -> Result<Contact>;

    /// Delete a contact.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// [`ContactApi`] over HTTP.
///
/// Requests have no timeout and are never retried.
#[derive(Debug, Clone)]
pub struct HttpContactApi {
    client: Client,
    base_url: Url,
}

impl HttpContactApi {
    /// Create a client for the collection endpoint, e.g.
    /// `http://localhost:5000/contacts`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| Error::invalid_input(format!("invalid API URL {base_url}: {e}")))?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// The collection endpoint this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn contact_url(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Turn a non-success response into [`Error::ApiStatus`].
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::api_status(status.as_u16(), error_message(&body)))
    }
}

/// Pull the most specific message out of an error body.
///
/// Prefers `error`, then `message`, then the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn list(&self) -> Result<Vec<Contact>> {
        let response = self.client.get(self.base_url.clone()).send().await?;
        let contacts = Self::check(response).await?.json().await?;
        Ok(contacts)
    }

    async fn create(&self, fields: &ContactFields) -> Result<Contact> {
        let response = self
            .client
            .post(self.base_url.clone())
            .json(fields)
            .send()
            .await?;
        let contact = Self::check(response).await?.json().await?;
        Ok(contact)
    }

    async fn update(&self, id: i64, fields: &ContactFields) -> Result<Contact> {
        let response = self
            .client
            .put(self.contact_url(id))
            .json(fields)
            .send()
            .await?;
        let contact = Self::check(response).await?.json().await?;
        Ok(contact)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let response = self.client.delete(self.contact_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// The client runtime: state plus the API it talks to.
#[derive(Debug)]
pub struct ContactBook<A> {
    api: A,
    state: ViewState,
}

impl<A: ContactApi> ContactBook<A> {
    /// Create a runtime with an empty list.
    #[must_use]
    pub fn new(api: A, rows_per_page: usize) -> Self {
        Self {
            api,
            state: ViewState::new(rows_per_page),
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The API this runtime talks to.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the full list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be fetched.
    pub async fn load(&mut self) -> Result<()> {
        self.run(Effect::Fetch).await
    }

    /// Apply an action and run every effect it leads to.
    ///
    /// Create/update/delete are followed by a full re-fetch on success.
    ///
    /// # Errors
    ///
    /// Returns an error only if a list fetch fails. Failed writes are
    /// reported through the state instead.
    pub async fn dispatch(&mut self, action: Action) -> Result<()> {
        if let Some(effect) = self.apply(action) {
            self.run(effect).await?;
        }
        Ok(())
    }

    fn apply(&mut self, action: Action) -> Option<Effect> {
        let (next, effect) = state::update(std::mem::take(&mut self.state), action);
        self.state = next;
        effect
    }

    async fn run(&mut self, effect: Effect) -> Result<()> {
        let mut pending = Some(effect);
        while let Some(effect) = pending.take() {
            debug!(?effect, "Running client effect");
            let outcome = match effect {
                Effect::Fetch => Action::Loaded(self.api.list().await?),
                Effect::Create(fields) => match self.api.create(&fields).await {
                    Ok(contact) => {
                        debug!(id = contact.id, "Contact created");
                        Action::Saved
                    }
                    Err(e) => {
                        warn!(error = %e, "Creating contact failed");
                        Action::SaveFailed(e.to_string())
                    }
                },
                Effect::Update(id, fields) => match self.api.update(id, &fields).await {
                    Ok(_) => Action::Saved,
                    Err(e) => {
                        warn!(id, error = %e, "Updating contact failed");
                        Action::SaveFailed(e.to_string())
                    }
                },
                Effect::Delete(id) => match self.api.delete(id).await {
                    Ok(()) => Action::Deleted,
                    Err(e) => {
                        warn!(id, error = %e, "Deleting contact failed");
                        Action::DeleteFailed(e.to_string())
                    }
                },
            };
            pending = self.apply(outcome);
        }
        Ok(())
    }
}
