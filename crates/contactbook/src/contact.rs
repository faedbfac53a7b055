//! Core contact types for contactbook.
//!
//! A [`Contact`] is a stored record: a store-assigned identifier plus the
//! free-text [`ContactFields`]. [`ContactField`] enumerates the editable
//! fields once, so forms, tables and sorting all agree on keys and labels.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The editable attributes of a contact.
///
/// Every field is optional free text. Absent fields are omitted from JSON.
/// Numbers and booleans are accepted and stored as their text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    /// Given name.
    #[serde(
        default,
        deserialize_with = "free_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(
        default,
        deserialize_with = "free_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_name: Option<String>,
    /// Email address. Not validated.
    #[serde(
        default,
        deserialize_with = "free_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    /// Phone number. Not validated.
    #[serde(
        default,
        deserialize_with = "free_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    /// Employer.
    #[serde(
        default,
        deserialize_with = "free_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<String>,
    /// Role at the employer.
    #[serde(
        default,
        deserialize_with = "free_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_title: Option<String>,
}

/// Read a field value as text: strings as-is, numbers and booleans
/// stringified, `null` as absent. Arrays and objects are rejected.
fn free_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, number or boolean, got {other}"
        ))),
    }
}

impl ContactFields {
    /// Build a fully populated set of fields.
    #[must_use]
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        company: &str,
        job_title: &str,
    ) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            company: Some(company.to_string()),
            job_title: Some(job_title.to_string()),
        }
    }

    /// Read a field by its schema entry.
    #[must_use]
    pub fn get(&self, field: ContactField) -> Option<&str> {
        let value = match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Company => &self.company,
            ContactField::JobTitle => &self.job_title,
        };
        value.as_deref()
    }

    /// Overwrite a field by its schema entry.
    pub fn set(&mut self, field: ContactField, value: Option<String>) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Company => &mut self.company,
            ContactField::JobTitle => &mut self.job_title,
        };
        *slot = value;
    }

    /// Check whether no field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ContactField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// A stored contact record.
///
/// The identifier is assigned once by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Store-assigned identifier.
    pub id: i64,

    /// The editable attributes.
    #[serde(flatten)]
    pub fields: ContactFields,
}

impl Contact {
    /// Pair a set of fields with an identifier.
    #[must_use]
    pub fn new(id: i64, fields: ContactFields) -> Self {
        Self { id, fields }
    }

    /// Read a field by its schema entry.
    #[must_use]
    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.fields.get(field)
    }
}

/// One editable contact attribute, with its wire key and display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// `firstName`
    FirstName,
    /// `lastName`
    LastName,
    /// `email`
    Email,
    /// `phone`
    Phone,
    /// `company`
    Company,
    /// `jobTitle`
    JobTitle,
}

impl ContactField {
    /// All fields in display order.
    pub const ALL: [Self; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Company,
        Self::JobTitle,
    ];

    /// The JSON key of this field.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::JobTitle => "jobTitle",
        }
    }

    /// The human-readable column/form label of this field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Company => "Company",
            Self::JobTitle => "Job Title",
        }
    }

    /// Look a field up by its JSON key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> ContactFields {
        ContactFields::new("Ann", "Lee", "a@x.com", "1", "C", "Eng")
    }

    #[test]
    fn test_contact_serializes_camel_case_with_id() {
        let contact = Contact::new(3, ann());
        let value = serde_json::to_value(&contact).unwrap();

        assert_eq!(value["id"], 3);
        assert_eq!(value["firstName"], "Ann");
        assert_eq!(value["jobTitle"], "Eng");
        assert!(value.get("first_name").is_none());
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let fields = ContactFields {
            email: Some("only@x.com".to_string()),
            ..ContactFields::default()
        };
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"email":"only@x.com"}"#);
    }

    #[test]
    fn test_fields_ignore_unknown_keys_and_id() {
        let fields: ContactFields =
            serde_json::from_str(r#"{"id": 99, "firstName": "Ann", "nickname": "A"}"#).unwrap();
        assert_eq!(fields.first_name.as_deref(), Some("Ann"));
        assert!(fields.last_name.is_none());
    }

    #[test]
    fn test_fields_accept_null() {
        let fields: ContactFields = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert!(fields.phone.is_none());
    }

    #[test]
    fn test_fields_reject_structured_values() {
        for body in [r#"{"firstName": ["Ann"]}"#, r#"{"phone": {"home": "1"}}"#] {
            let result: std::result::Result<ContactFields, _> = serde_json::from_str(body);
            assert!(result.is_err(), "accepted {body}");
        }
    }

    #[test]
    fn test_fields_accept_scalars_as_text() {
        let fields: ContactFields =
            serde_json::from_str(r#"{"phone": 5551234, "company": true, "email": null}"#)
                .unwrap();
        assert_eq!(fields.phone.as_deref(), Some("5551234"));
        assert_eq!(fields.company.as_deref(), Some("true"));
        assert!(fields.email.is_none());
    }

    #[test]
    fn test_contact_with_numeric_field_round_trips() {
        let contact: Contact =
            serde_json::from_str(r#"{"id": 3, "firstName": "Ann", "phone": 42}"#).unwrap();
        assert_eq!(contact.id, 3);
        assert_eq!(contact.get(ContactField::Phone), Some("42"));
    }

    #[test]
    fn test_get_and_set_by_field() {
        let mut fields = ContactFields::default();
        assert!(fields.is_empty());

        fields.set(ContactField::Company, Some("Acme".to_string()));
        assert_eq!(fields.get(ContactField::Company), Some("Acme"));
        assert!(!fields.is_empty());

        fields.set(ContactField::Company, None);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in ContactField::ALL {
            assert_eq!(ContactField::from_key(field.key()), Some(field));
        }
        assert_eq!(ContactField::from_key("firstname"), None);
    }

    #[test]
    fn test_field_keys_match_wire_names() {
        let value = serde_json::to_value(ann()).unwrap();
        for field in ContactField::ALL {
            assert_eq!(value[field.key()].as_str(), ann().get(field));
        }
    }

    #[test]
    fn test_field_display_uses_key() {
        assert_eq!(ContactField::JobTitle.to_string(), "jobTitle");
        assert_eq!(ContactField::JobTitle.label(), "Job Title");
    }
}
