//! # Storage Module
//!
//! Disk-backed account storage.

mod redb_accounts;

pub use redb_accounts::RedbAccounts;
