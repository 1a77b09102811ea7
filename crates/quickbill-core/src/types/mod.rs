//! # Core Type Definitions
//!
//! This module contains the core types for the QuickBill registration engine:
//! - Form field identifiers (`Field`)
//! - The in-progress form data (`RegistrationDraft`)
//! - The wire payload sent to the server (`RegistrationPayload`)
//! - The `{success, message}` response wrapper (`Envelope`)
//! - Per-field validation messages (`ValidationErrorSet`)
//! - Error types (`QuickbillError`)
//!
//! ## Determinism Guarantees
//!
//! - `Field` implements `Ord` in declaration order, so every `BTreeMap`
//!   keyed by it iterates in form order
//! - No hashing containers are used for user-visible state

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// FIELD
// =============================================================================

/// A registration form field.
///
/// Variant order is the order fields appear on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    PhoneNumber,
    Street,
    City,
    State,
    ZipCode,
    TaxId,
    Password,
    ConfirmPassword,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Email,
        Field::PhoneNumber,
        Field::Street,
        Field::City,
        Field::State,
        Field::ZipCode,
        Field::TaxId,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// The JSON key of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::PhoneNumber => "phoneNumber",
            Field::Street => "street",
            Field::City => "city",
            Field::State => "state",
            Field::ZipCode => "zipCode",
            Field::TaxId => "taxId",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    /// Human-readable label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::PhoneNumber => "Phone number",
            Field::Street => "Street",
            Field::City => "City",
            Field::State => "State",
            Field::ZipCode => "Pincode",
            Field::TaxId => "Tax ID",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
        }
    }

    /// Whether the value must be masked when displayed.
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }

    /// Whether the field is ever transmitted to the server.
    #[must_use]
    pub const fn is_transmitted(self) -> bool {
        !matches!(self, Field::ConfirmPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = QuickbillError;

    /// Parse a field from its JSON key. Matching ignores ASCII case and
    /// underscores, so `zip_code`, `zipcode` and `zipCode` all resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| QuickbillError::UnknownField(s.to_string()))
    }
}

// =============================================================================
// REGISTRATION DRAFT
// =============================================================================

/// The in-progress, unsaved registration form data.
///
/// Every value starts empty. A draft is owned by exactly one `Wizard`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub tax_id: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationDraft {
    /// Create an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::PhoneNumber => &self.phone_number,
            Field::Street => &self.street,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::ZipCode => &self.zip_code,
            Field::TaxId => &self.tax_id,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::PhoneNumber => &mut self.phone_number,
            Field::Street => &mut self.street,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::ZipCode => &mut self.zip_code,
            Field::TaxId => &mut self.tax_id,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.into();
    }

    /// Check if every field is still empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|f| self.get(f).is_empty())
    }

    /// Build the wire payload. `confirmPassword` is dropped here and has no
    /// representation in [`RegistrationPayload`].
    #[must_use]
    pub fn to_payload(&self) -> RegistrationPayload {
        RegistrationPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            tax_id: self.tax_id.clone(),
            password: self.password.clone(),
        }
    }
}

// =============================================================================
// REGISTRATION PAYLOAD
// =============================================================================

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub tax_id: String,
    pub password: String,
}

impl RegistrationPayload {
    /// Value of a transmitted field. Returns `None` for `ConfirmPassword`.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::PhoneNumber => Some(&self.phone_number),
            Field::Street => Some(&self.street),
            Field::City => Some(&self.city),
            Field::State => Some(&self.state),
            Field::ZipCode => Some(&self.zip_code),
            Field::TaxId => Some(&self.tax_id),
            Field::Password => Some(&self.password),
            Field::ConfirmPassword => None,
        }
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// The `{success, message}` wrapper used by every server response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    /// Set on successful registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            account_id: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            account_id: None,
        }
    }

    #[must_use]
    pub fn with_account_id(mut self, id: u64) -> Self {
        self.account_id = Some(id);
        self
    }
}

// =============================================================================
// VALIDATION ERROR SET
// =============================================================================

/// Mapping of field → human-readable message.
///
/// Built fresh by every validation pass; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Check whether any of `fields` has an error.
    #[must_use]
    pub fn any_of(&self, fields: &[Field]) -> bool {
        fields.iter().any(|f| self.errors.contains_key(f))
    }

    /// Iterate errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// The first message in form order.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        self.errors.values().next().map(String::as_str)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the QuickBill core.
///
/// Field validation problems are not errors of this type: they live in a
/// `ValidationErrorSet` and never leave the wizard.
#[derive(Debug, Error)]
pub enum QuickbillError {
    /// A field name could not be resolved.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A payload failed server-side validation.
    #[error("Invalid registration: {0}")]
    InvalidPayload(String),

    /// An account with the same email already exists.
    #[error("Email already registered")]
    EmailTaken,

    /// Password hashing or verification failed.
    #[error("Credential error: {0}")]
    Credential(String),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_matches_form() {
        let mut sorted = Field::ALL;
        sorted.sort();
        assert_eq!(sorted, Field::ALL);
    }

    #[test]
    fn field_parses_loose_names() {
        assert_eq!("zipCode".parse::<Field>().ok(), Some(Field::ZipCode));
        assert_eq!("zip_code".parse::<Field>().ok(), Some(Field::ZipCode));
        assert_eq!("PHONENUMBER".parse::<Field>().ok(), Some(Field::PhoneNumber));
        assert!(matches!(
            "fax".parse::<Field>(),
            Err(QuickbillError::UnknownField(_))
        ));
    }

    #[test]
    fn draft_get_set_roundtrip_per_field() {
        let mut draft = RegistrationDraft::new();
        assert!(draft.is_empty());
        for field in Field::ALL {
            draft.set(field, field.as_str());
        }
        for field in Field::ALL {
            assert_eq!(draft.get(field), field.as_str());
        }
        assert!(!draft.is_empty());
    }

    #[test]
    fn payload_has_no_confirmation() {
        let mut draft = RegistrationDraft::new();
        draft.set(Field::Password, "secret1");
        draft.set(Field::ConfirmPassword, "secret1");
        let payload = draft.to_payload();
        assert_eq!(payload.get(Field::Password), Some("secret1"));
        assert_eq!(payload.get(Field::ConfirmPassword), None);
    }

    #[test]
    fn envelope_omits_missing_account_id() {
        let json = serde_json::to_string(&Envelope::failure("nope")).expect("serialize");
        assert_eq!(json, r#"{"success":false,"message":"nope"}"#);

        let json =
            serde_json::to_string(&Envelope::success("ok").with_account_id(7)).expect("serialize");
        assert_eq!(json, r#"{"success":true,"message":"ok","accountId":7}"#);
    }

    #[test]
    fn error_set_iterates_in_form_order() {
        let mut errors = ValidationErrorSet::new();
        errors.insert(Field::ZipCode, "z");
        errors.insert(Field::Name, "n");
        let fields: Vec<_> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::Name, Field::ZipCode]);
        assert_eq!(errors.first_message(), Some("n"));
    }
}
