//! Client-side application state and its update function.
//!
//! [`update`] is pure: it takes the current [`ViewState`] and an [`Action`]
//! and returns the next state plus, at most, one [`Effect`] for the runtime
//! to perform. Network calls never happen here.

use crate::contact::{Contact, ContactField, ContactFields};

/// Message shown when a delete succeeds.
pub const DELETE_SUCCEEDED: &str = "Contact deleted successfully.";

/// Message shown when a delete fails.
pub const DELETE_FAILED: &str = "Failed to delete contact. Please try again.";

/// Sort direction of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Which column the table is sorted by, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    /// The field the table is sorted on.
    pub field: ContactField,
    /// The direction of the sort.
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: ContactField::FirstName,
            direction: SortDirection::Ascending,
        }
    }
}

/// The create/edit form dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialog {
    /// No dialog shown.
    #[default]
    Closed,
    /// Creating a new contact.
    Create,
    /// Editing the contact with this identifier.
    Edit(i64),
}

impl Dialog {
    /// Check whether the dialog is showing.
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Something worked.
    Info(String),
    /// Something failed and the user should know.
    Alert(String),
}

impl Notice {
    /// The message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Info(m) | Self::Alert(m) => m,
        }
    }
}

/// Everything the client shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Every contact, as last fetched.
    pub contacts: Vec<Contact>,
    /// The form's current field values.
    pub form: ContactFields,
    /// The form dialog.
    pub dialog: Dialog,
    /// Zero-based page index.
    pub page: usize,
    /// Rows per page; always at least one.
    pub rows_per_page: usize,
    /// Table sort.
    pub sort: SortState,
    /// The most recent user-facing message.
    pub notice: Option<Notice>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ViewState {
    /// An empty state showing `rows_per_page` rows per page.
    #[must_use]
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            contacts: Vec::new(),
            form: ContactFields::default(),
            dialog: Dialog::Closed,
            page: 0,
            rows_per_page: rows_per_page.max(1),
            sort: SortState::default(),
            notice: None,
        }
    }

    /// Number of pages needed for the current list (at least one).
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.contacts.len().div_ceil(self.rows_per_page).max(1)
    }

    /// Find a loaded contact by identifier.
    #[must_use]
    pub fn contact(&self, id: i64) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }
}

/// Something that happened: a user action or the result of an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The full list was fetched.
    Loaded(Vec<Contact>),
    /// Open the dialog with an empty form.
    OpenCreate,
    /// Open the dialog pre-filled from a loaded contact.
    OpenEdit(i64),
    /// Change one form field. An empty string clears it.
    SetField(ContactField, String),
    /// Submit the form.
    Submit,
    /// Close the dialog without saving.
    Cancel,
    /// Ask to delete a contact.
    Delete(i64),
    /// A create or update was accepted by the service.
    Saved,
    /// A create or update failed.
    SaveFailed(String),
    /// A delete was accepted by the service.
    Deleted,
    /// A delete failed.
    DeleteFailed(String),
    /// Click a column header.
    SortBy(ContactField),
    /// Go to a page.
    SetPage(usize),
    /// Change the page size.
    SetRowsPerPage(usize),
    /// Clear the current notice.
    DismissNotice,
}

/// Work the runtime must perform after a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-fetch the full contact list.
    Fetch,
    /// Create a contact.
    Create(ContactFields),
    /// Replace a contact's fields.
    Update(i64, ContactFields),
    /// Delete a contact.
    Delete(i64),
}

/// Apply an action to the state.
#[must_use]
pub fn update(mut state: ViewState, action: Action) -> (ViewState, Option<Effect>) {
    let effect = match action {
        Action::Loaded(contacts) => {
            state.contacts = contacts;
            state.page = state.page.min(state.page_count() - 1);
            None
        }
        Action::OpenCreate => {
            state.form = ContactFields::default();
            state.dialog = Dialog::Create;
            None
        }
        Action::OpenEdit(id) => {
            if let Some(contact) = state.contact(id) {
                state.form = contact.fields.clone();
                state.dialog = Dialog::Edit(id);
            }
            None
        }
        Action::SetField(field, value) => {
            if state.dialog.is_open() {
                let value = (!value.is_empty()).then_some(value);
                state.form.set(field, value);
            }
            None
        }
        Action::Submit => match state.dialog {
            Dialog::Closed => None,
            Dialog::Create => Some(Effect::Create(state.form.clone())),
            Dialog::Edit(id) => Some(Effect::Update(id, state.form.clone())),
        },
        Action::Cancel => {
            close_dialog(&mut state);
            None
        }
        Action::Delete(id) => Some(Effect::Delete(id)),
        Action::Saved => {
            close_dialog(&mut state);
            Some(Effect::Fetch)
        }
        // Save failures are not shown; the dialog stays open for another try.
        Action::SaveFailed(_) => None,
        Action::Deleted => {
            state.notice = Some(Notice::Info(DELETE_SUCCEEDED.to_string()));
            Some(Effect::Fetch)
        }
        Action::DeleteFailed(_) => {
            state.notice = Some(Notice::Alert(DELETE_FAILED.to_string()));
            None
        }
        Action::SortBy(field) => {
            let ascending_on_field =
                state.sort.field == field && state.sort.direction == SortDirection::Ascending;
            state.sort = SortState {
                field,
                direction: if ascending_on_field {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                },
            };
            None
        }
        Action::SetPage(page) => {
            state.page = page.min(state.page_count() - 1);
            None
        }
        Action::SetRowsPerPage(rows) => {
            state.rows_per_page = rows.max(1);
            state.page = 0;
            None
        }
        Action::DismissNotice => {
            state.notice = None;
            None
        }
    };
    (state, effect)
}

fn close_dialog(state: &mut ViewState) {
    state.dialog = Dialog::Closed;
    state.form = ContactFields::default();
}
