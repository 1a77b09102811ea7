//! # quickbill-core
//!
//! The registration engine for QuickBill - THE LOGIC.
//!
//! This crate holds everything about account registration that does not
//! need a network:
//! - `schema` → per-field validation rules
//! - `steps` → which fields belong to which wizard step
//! - `wizard` → the form state controller (step gating and reconciliation)
//! - `submission` → turning a server response into a notification
//! - `accounts` / `storage` → the server-side account registry
//!
//! ## Architectural Constraints
//!
//! - NO async, NO network dependencies (pure Rust)
//! - Deterministic: validation of the same draft always yields the same
//!   messages, in form order
//! - One `Wizard` owns one draft; there is no global form state

// =============================================================================
// MODULES
// =============================================================================

pub mod accounts;
pub mod credentials;
pub mod primitives;
pub mod schema;
pub mod steps;
pub mod storage;
pub mod submission;
pub mod types;
pub mod wizard;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Envelope, Field, QuickbillError, RegistrationDraft, RegistrationPayload, ValidationErrorSet,
};

// =============================================================================
// RE-EXPORTS: Workflow
// =============================================================================

pub use schema::{validate_draft, validate_field, validate_fields, validate_payload};
pub use steps::WizardStep;
pub use submission::{Notification, NotificationLevel, Resolution, SubmitFailure};
pub use wizard::{AdvanceOutcome, AdvancePlan, SubmitReadiness, Wizard, plan_advance, reconcile_step};

// =============================================================================
// RE-EXPORTS: Accounts
// =============================================================================

pub use accounts::{
    Account, AccountId, AccountStore, InMemoryAccounts, NewAccount, Registry, StorageBackend,
};
pub use storage::RedbAccounts;
