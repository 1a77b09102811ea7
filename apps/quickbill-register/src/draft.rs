//! Pre-filled drafts.
//!
//! A draft file is TOML with the same camelCase keys as the wire payload,
//! plus `confirmPassword`. Keys resolve like field names at the prompt, so
//! `zip_code` works too. Missing keys stay empty; unknown keys are an error.
//!
//! ```toml
//! name = "Acme Traders"
//! email = "owner@acme.example"
//! zipCode = "62701"
//! ```

use quickbill_core::{Field, QuickbillError, RegistrationDraft};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// Largest draft file accepted.
const MAX_DRAFT_FILE_SIZE: u64 = 64 * 1024;

/// Load a draft from a TOML file.
pub fn load_draft(path: &Path) -> Result<RegistrationDraft, QuickbillError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| QuickbillError::Io(format!("Cannot read draft '{}': {}", path.display(), e)))?;
    if metadata.len() > MAX_DRAFT_FILE_SIZE {
        return Err(QuickbillError::Io(format!(
            "Draft file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_DRAFT_FILE_SIZE
        )));
    }

    let text = std::fs::read_to_string(path)
        .map_err(|e| QuickbillError::Io(format!("Cannot read draft '{}': {}", path.display(), e)))?;
    parse_draft(&text)
}

/// Parse a draft from TOML text.
pub fn parse_draft(text: &str) -> Result<RegistrationDraft, QuickbillError> {
    let values: BTreeMap<String, String> =
        toml::from_str(text).map_err(|e| QuickbillError::Serialization(e.to_string()))?;

    let mut draft = RegistrationDraft::new();
    for (key, value) in values {
        draft.set(Field::from_str(&key)?, value);
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_draft_leaves_rest_empty() {
        let draft = parse_draft("name = \"Acme\"\nzipCode = \"62701\"\n").expect("parse");
        assert_eq!(draft.get(Field::Name), "Acme");
        assert_eq!(draft.get(Field::ZipCode), "62701");
        assert_eq!(draft.get(Field::City), "");
    }

    #[test]
    fn malformed_draft_is_serialization_error() {
        let err = parse_draft("name = ");
        assert!(matches!(err, Err(QuickbillError::Serialization(_))));
    }

    #[test]
    fn snake_case_keys_resolve() {
        let draft = parse_draft("zip_code = \"62701\"\ntax_id = \"T1\"\n").expect("parse");
        assert_eq!(draft.get(Field::ZipCode), "62701");
        assert_eq!(draft.get(Field::TaxId), "T1");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = parse_draft("email = \"a@b.com\"\nemial = \"x\"\n");
        assert!(matches!(err, Err(QuickbillError::UnknownField(ref k)) if k == "emial"));
    }

    #[test]
    fn non_string_value_is_serialization_error() {
        let err = parse_draft("zipCode = 62701\n");
        assert!(matches!(err, Err(QuickbillError::Serialization(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("draft.toml");
        std::fs::write(&path, "email = \"a@b.com\"\nconfirmPassword = \"x\"\n").expect("write");

        let draft = load_draft(&path).expect("load");
        assert_eq!(draft.get(Field::Email), "a@b.com");
        assert_eq!(draft.get(Field::ConfirmPassword), "x");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_draft(&dir.path().join("absent.toml"));
        assert!(matches!(err, Err(QuickbillError::Io(_))));
    }
}
