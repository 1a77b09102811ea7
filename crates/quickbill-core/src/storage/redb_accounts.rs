//! # redb-backed Account Storage
//!
//! A disk-backed account store using the redb embedded database:
//! - ACID transactions
//! - Crash safety (copy-on-write B-trees)
//! - Zero configuration
//!
//! The duplicate-email check and the insert run inside one write
//! transaction, so an account is either fully committed or absent.

use crate::accounts::{Account, AccountId, AccountStore, NewAccount, normalize_email};
use crate::QuickbillError;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

/// Table for accounts: normalized email -> postcard-encoded Account
const ACCOUNTS: TableDefinition<&str, &[u8]> = TableDefinition::new("accounts");

/// Table for metadata: key string -> value u64
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");

const NEXT_ACCOUNT_ID: &str = "next_account_id";

fn storage_err(e: impl std::fmt::Display) -> QuickbillError {
    QuickbillError::Storage(e.to_string())
}

/// A disk-backed account store using redb.
pub struct RedbAccounts {
    db: Database,
    next_account_id: u64,
}

impl std::fmt::Debug for RedbAccounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbAccounts")
            .field("next_account_id", &self.next_account_id)
            .finish_non_exhaustive()
    }
}

impl RedbAccounts {
    /// Open or create an account database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, QuickbillError> {
        let db = Database::create(path.as_ref()).map_err(storage_err)?;

        // Initialize tables if they don't exist
        {
            let write_txn = db.begin_write().map_err(storage_err)?;
            let _ = write_txn.open_table(ACCOUNTS).map_err(storage_err)?;
            let _ = write_txn.open_table(METADATA).map_err(storage_err)?;
            write_txn.commit().map_err(storage_err)?;
        }

        let next_account_id = {
            let read_txn = db.begin_read().map_err(storage_err)?;
            let table = read_txn.open_table(METADATA).map_err(storage_err)?;
            table
                .get(NEXT_ACCOUNT_ID)
                .map_err(storage_err)?
                .map(|v| v.value())
                .unwrap_or(0)
        };

        Ok(Self {
            db,
            next_account_id,
        })
    }

    /// Compact the database.
    pub fn compact(&mut self) -> Result<(), QuickbillError> {
        self.db.compact().map_err(storage_err)?;
        Ok(())
    }
}

impl AccountStore for RedbAccounts {
    fn insert(&mut self, account: NewAccount) -> Result<Account, QuickbillError> {
        let id = AccountId(self.next_account_id);
        let account = account.into_account(id);
        let bytes = postcard::to_allocvec(&account)
            .map_err(|e| QuickbillError::Serialization(e.to_string()))?;

        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut accounts = write_txn.open_table(ACCOUNTS).map_err(storage_err)?;
            let exists = accounts
                .get(account.email.as_str())
                .map_err(storage_err)?
                .is_some();
            if exists {
                // Dropping the transaction aborts it.
                return Err(QuickbillError::EmailTaken);
            }
            accounts
                .insert(account.email.as_str(), bytes.as_slice())
                .map_err(storage_err)?;

            let mut meta = write_txn.open_table(METADATA).map_err(storage_err)?;
            meta.insert(NEXT_ACCOUNT_ID, self.next_account_id.saturating_add(1))
                .map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;

        // Update in-memory state only after successful commit.
        self.next_account_id = self.next_account_id.saturating_add(1);
        Ok(account)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, QuickbillError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(ACCOUNTS).map_err(storage_err)?;
        let key = normalize_email(email);
        let Some(data) = table.get(key.as_str()).map_err(storage_err)? else {
            return Ok(None);
        };
        postcard::from_bytes::<Account>(data.value())
            .map(Some)
            .map_err(|e| QuickbillError::Serialization(e.to_string()))
    }

    fn count(&self) -> Result<usize, QuickbillError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(ACCOUNTS).map_err(storage_err)?;
        let count = table.len().map_err(storage_err)?;
        Ok(count as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistrationPayload;
    use tempfile::tempdir;

    fn new_account(email: &str) -> NewAccount {
        NewAccount::from_payload(RegistrationPayload {
            name: "Acme".into(),
            email: email.into(),
            phone_number: "555".into(),
            street: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62701".into(),
            tax_id: "T1".into(),
            password: "hunter22".into(),
        })
        .expect("valid payload")
    }

    #[test]
    fn insert_and_find() {
        let temp = tempdir().expect("temp dir");
        let mut store = RedbAccounts::open(temp.path().join("test.redb")).expect("open db");

        let stored = store.insert(new_account("a@b.com")).expect("insert");
        assert_eq!(stored.id, AccountId(0));
        assert_eq!(store.count().expect("count"), 1);

        let found = store.find_by_email("A@B.com").expect("find");
        assert_eq!(found, Some(stored));
        assert_eq!(store.find_by_email("x@y.com").expect("find"), None);
    }

    #[test]
    fn duplicate_rolls_back() {
        let temp = tempdir().expect("temp dir");
        let mut store = RedbAccounts::open(temp.path().join("test.redb")).expect("open db");

        store.insert(new_account("a@b.com")).expect("insert");
        let again = store.insert(new_account("a@b.com"));
        assert!(matches!(again, Err(QuickbillError::EmailTaken)));
        assert_eq!(store.count().expect("count"), 1);

        // The failed insert must not consume an id.
        let next = store.insert(new_account("c@d.com")).expect("insert");
        assert_eq!(next.id, AccountId(1));
    }

    #[test]
    fn recovery_after_reopen() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("test.redb");

        {
            let mut store = RedbAccounts::open(&db_path).expect("open db");
            store.insert(new_account("a@b.com")).expect("insert");
            store.insert(new_account("c@d.com")).expect("insert");
        }

        {
            let mut store = RedbAccounts::open(&db_path).expect("reopen db");
            assert_eq!(store.count().expect("count"), 2);
            assert!(store.find_by_email("c@d.com").expect("find").is_some());
            let third = store.insert(new_account("e@f.com")).expect("insert");
            assert_eq!(third.id, AccountId(2));
        }
    }

    #[test]
    fn compact_keeps_data() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("test.redb");
        let mut store = RedbAccounts::open(&db_path).expect("open db");
        store.insert(new_account("a@b.com")).expect("insert");
        store.compact().expect("compact");
        assert_eq!(store.count().expect("count"), 1);
    }
}
