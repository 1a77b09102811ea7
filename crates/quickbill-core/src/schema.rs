//! # Field Schema
//!
//! Declarative validation rules for every registration field.
//!
//! Validation is pure: the same draft always yields the same messages.
//! Each field is checked on its own, except `confirmPassword`, which is
//! valid exactly when it equals `password`.

use crate::primitives::{MAX_FIELD_LENGTH, MIN_PASSWORD_LENGTH, MIN_PHONE_DIGITS};
use crate::{Field, RegistrationDraft, RegistrationPayload, ValidationErrorSet};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("static email pattern")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+()\- ]+$").expect("static phone pattern"));

static TAX_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9/-]+$").expect("static tax id pattern"));

static ZIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 -]{3,10}$").expect("static zip pattern"));

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// Trimmed value is non-empty.
    Required,
    /// Value is at most `MAX_FIELD_LENGTH` characters.
    MaxLength,
    Email,
    Phone,
    TaxId,
    Zip,
    /// At least `MIN_PASSWORD_LENGTH` characters.
    MinPassword,
    /// Exactly equals the password.
    MatchesPassword,
}

/// Rules for a field, in evaluation order. The first failing rule wins.
const fn rules(field: Field) -> &'static [Rule] {
    match field {
        Field::Name | Field::Street | Field::City | Field::State => {
            &[Rule::Required, Rule::MaxLength]
        }
        Field::Email => &[Rule::Required, Rule::MaxLength, Rule::Email],
        Field::PhoneNumber => &[Rule::Required, Rule::MaxLength, Rule::Phone],
        Field::TaxId => &[Rule::Required, Rule::MaxLength, Rule::TaxId],
        Field::ZipCode => &[Rule::Required, Rule::MaxLength, Rule::Zip],
        Field::Password => &[Rule::MinPassword, Rule::MaxLength],
        Field::ConfirmPassword => &[Rule::MatchesPassword],
    }
}

fn check(rule: Rule, field: Field, value: &str, password: &str) -> Option<String> {
    let ok = match rule {
        Rule::Required => !value.trim().is_empty(),
        Rule::MaxLength => value.chars().count() <= MAX_FIELD_LENGTH,
        Rule::Email => EMAIL_PATTERN.is_match(value.trim()),
        Rule::Phone => {
            let trimmed = value.trim();
            PHONE_PATTERN.is_match(trimmed)
                && trimmed.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
        }
        Rule::TaxId => TAX_ID_PATTERN.is_match(value.trim()),
        Rule::Zip => ZIP_PATTERN.is_match(value.trim()),
        Rule::MinPassword => value.chars().count() >= MIN_PASSWORD_LENGTH,
        Rule::MatchesPassword => value == password,
    };
    if ok {
        return None;
    }

    Some(match rule {
        Rule::Required => format!("{} is required", field.label()),
        Rule::MaxLength => format!(
            "{} must be at most {} characters",
            field.label(),
            MAX_FIELD_LENGTH
        ),
        Rule::Email => "Invalid email address".to_string(),
        Rule::Phone => "Invalid phone number".to_string(),
        Rule::TaxId => "Invalid tax ID".to_string(),
        Rule::Zip => "Invalid pincode".to_string(),
        Rule::MinPassword => format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ),
        Rule::MatchesPassword => "Passwords do not match".to_string(),
    })
}

fn check_value(field: Field, value: &str, password: &str) -> Option<String> {
    rules(field)
        .iter()
        .find_map(|rule| check(*rule, field, value, password))
}

/// Validate one field of a draft.
///
/// Returns `None` when the field is valid, otherwise its error message.
#[must_use]
pub fn validate_field(draft: &RegistrationDraft, field: Field) -> Option<String> {
    check_value(field, draft.get(field), &draft.password)
}

/// Validate a set of fields, producing a fresh error set.
#[must_use]
pub fn validate_fields<'a>(
    draft: &RegistrationDraft,
    fields: impl IntoIterator<Item = &'a Field>,
) -> ValidationErrorSet {
    let mut errors = ValidationErrorSet::new();
    for field in fields {
        if let Some(message) = validate_field(draft, *field) {
            errors.insert(*field, message);
        }
    }
    errors
}

/// Validate every field of a draft.
#[must_use]
pub fn validate_draft(draft: &RegistrationDraft) -> ValidationErrorSet {
    validate_fields(draft, Field::ALL.iter())
}

/// Validate a payload received by the server.
///
/// Applies the same rules as the client to every transmitted field.
#[must_use]
pub fn validate_payload(payload: &RegistrationPayload) -> ValidationErrorSet {
    let mut errors = ValidationErrorSet::new();
    for field in Field::ALL {
        let Some(value) = payload.get(field) else {
            continue;
        };
        if let Some(message) = check_value(field, value, &payload.password) {
            errors.insert(field, message);
        }
    }
    errors
}

// =============================================================================
// TESTS
// =============================================================================
