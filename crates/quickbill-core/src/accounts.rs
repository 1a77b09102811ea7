//! # Account Registry
//!
//! Server-side persistence of registered accounts.
//!
//! ## Storage Backends
//!
//! - `InMemory`: `InMemoryAccounts` (fast, volatile)
//! - `Persistent`: `RedbAccounts` (disk-backed, ACID)
//!
//! Emails are unique after normalization (trimmed, lowercased). A failed
//! registration never leaves a partial account behind.

use crate::credentials::hash_password;
use crate::schema::validate_payload;
use crate::storage::RedbAccounts;
use crate::{QuickbillError, RegistrationPayload};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Identifier of a stored account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Normalized email.
    pub email: String,
    pub phone_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub tax_id: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Normalize an email for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A validated, hashed registration waiting for an id.
///
/// Building one is the slow part of a registration (argon2), so callers can
/// do it before taking any lock on the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    name: String,
    email: String,
    phone_number: String,
    street: String,
    city: String,
    state: String,
    zip_code: String,
    tax_id: String,
    password_hash: String,
}

impl NewAccount {
    /// Validate a payload and hash its password.
    ///
    /// Returns `InvalidPayload` with the first message in form order.
    pub fn from_payload(payload: RegistrationPayload) -> Result<Self, QuickbillError> {
        let errors = validate_payload(&payload);
        if let Some(message) = errors.first_message() {
            return Err(QuickbillError::InvalidPayload(message.to_string()));
        }

        let password_hash = hash_password(&payload.password)?;
        Ok(Self {
            name: payload.name.trim().to_string(),
            email: normalize_email(&payload.email),
            phone_number: payload.phone_number.trim().to_string(),
            street: payload.street.trim().to_string(),
            city: payload.city.trim().to_string(),
            state: payload.state.trim().to_string(),
            zip_code: payload.zip_code.trim().to_string(),
            tax_id: payload.tax_id.trim().to_string(),
            password_hash,
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Attach an id.
    #[must_use]
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
            street: self.street,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            tax_id: self.tax_id,
            password_hash: self.password_hash,
        }
    }
}

// =============================================================================
// ACCOUNT STORE TRAIT
// =============================================================================

/// Operations every account backend provides.
pub trait AccountStore {
    /// Store a new account. Fails with `EmailTaken` if the email exists.
    fn insert(&mut self, account: NewAccount) -> Result<Account, QuickbillError>;

    /// Look up an account by email (normalized before lookup).
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, QuickbillError>;

    /// Number of stored accounts.
    fn count(&self) -> Result<usize, QuickbillError>;
}

/// Volatile account store.
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    accounts: BTreeMap<String, Account>,
    next_id: u64,
}

impl InMemoryAccounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccounts {
    fn insert(&mut self, account: NewAccount) -> Result<Account, QuickbillError> {
        if self.accounts.contains_key(account.email()) {
            return Err(QuickbillError::EmailTaken);
        }
        let id = AccountId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let account = account.into_account(id);
        self.accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, QuickbillError> {
        Ok(self.accounts.get(&normalize_email(email)).cloned())
    }

    fn count(&self) -> Result<usize, QuickbillError> {
        Ok(self.accounts.len())
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Storage backend for a Registry.
#[derive(Debug)]
pub enum StorageBackend {
    InMemory(InMemoryAccounts),
    Persistent(RedbAccounts),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(InMemoryAccounts::new())
    }
}

/// The account registry used by the registration endpoint.
#[derive(Debug, Default)]
pub struct Registry {
    backend: StorageBackend,
}

impl Registry {
    /// Create a registry with in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry backed by a redb database at `path`.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, QuickbillError> {
        Ok(Self {
            backend: StorageBackend::Persistent(RedbAccounts::open(path)?),
        })
    }

    /// Check if the registry writes to disk.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StorageBackend::Persistent(_))
    }

    fn store(&self) -> &dyn AccountStore {
        match &self.backend {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    fn store_mut(&mut self) -> &mut dyn AccountStore {
        match &mut self.backend {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    /// Store a prepared account.
    pub fn register(&mut self, account: NewAccount) -> Result<Account, QuickbillError> {
        self.store_mut().insert(account)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Account>, QuickbillError> {
        self.store().find_by_email(email)
    }

    pub fn account_count(&self) -> Result<usize, QuickbillError> {
        self.store().count()
    }

    /// Compact the underlying database. No-op for in-memory storage.
    pub fn compact(&mut self) -> Result<(), QuickbillError> {
        match &mut self.backend {
            StorageBackend::InMemory(_) => Ok(()),
            StorageBackend::Persistent(store) => store.compact(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::verify_password;

    fn payload(email: &str) -> RegistrationPayload {
        RegistrationPayload {
            name: " Acme ".into(),
            email: email.into(),
            phone_number: "555".into(),
            street: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62701".into(),
            tax_id: "T1".into(),
            password: "hunter22".into(),
        }
    }

    #[test]
    fn register_assigns_sequential_ids() {
        let mut registry = Registry::new();
        let a = registry
            .register(NewAccount::from_payload(payload("a@b.com")).expect("new"))
            .expect("register");
        let b = registry
            .register(NewAccount::from_payload(payload("c@d.com")).expect("new"))
            .expect("register");
        assert_eq!(a.id, AccountId(0));
        assert_eq!(b.id, AccountId(1));
        assert_eq!(registry.account_count().expect("count"), 2);
        assert!(!registry.is_persistent());
    }

    #[test]
    fn duplicate_email_ignores_case() {
        let mut registry = Registry::new();
        registry
            .register(NewAccount::from_payload(payload("a@b.com")).expect("new"))
            .expect("register");
        let again = registry.register(NewAccount::from_payload(payload(" A@B.COM")).expect("new"));
        assert!(matches!(again, Err(QuickbillError::EmailTaken)));
        assert_eq!(registry.account_count().expect("count"), 1);
    }

    #[test]
    fn invalid_payload_rejected_before_hashing() {
        let mut bad = payload("a@b.com");
        bad.password = "123".into();
        let err = NewAccount::from_payload(bad);
        assert!(matches!(
            err,
            Err(QuickbillError::InvalidPayload(ref m)) if m == "Password must be at least 6 characters"
        ));
    }

    #[test]
    fn stored_values_are_trimmed_and_hashed() {
        let mut registry = Registry::new();
        registry
            .register(NewAccount::from_payload(payload("a@b.com")).expect("new"))
            .expect("register");
        let account = registry
            .find_by_email("A@b.com")
            .expect("find")
            .expect("present");
        assert_eq!(account.name, "Acme");
        assert!(verify_password("hunter22", &account.password_hash).expect("verify"));
    }
}
