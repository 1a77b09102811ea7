//! # Wizard Scenario Tests
//!
//! End-to-end walks through the registration wizard.
//!
//! ## Groups
//! - W0: Step navigation
//! - W1: Step reconciliation
//! - W2: Submission outcomes

use quickbill_core::{
    AdvanceOutcome, Envelope, Field, NotificationLevel, SubmitFailure, SubmitReadiness, Wizard,
    WizardStep,
};

fn step_one(wizard: &mut Wizard) {
    wizard.set_value(Field::Name, "Acme");
    wizard.set_value(Field::Email, "a@b.com");
    wizard.set_value(Field::PhoneNumber, "555");
    wizard.set_value(Field::TaxId, "T1");
}

fn step_two(wizard: &mut Wizard) {
    wizard.set_value(Field::Street, "1 Main St");
    wizard.set_value(Field::City, "Springfield");
    wizard.set_value(Field::State, "IL");
    wizard.set_value(Field::ZipCode, "62701");
}

fn step_three(wizard: &mut Wizard) {
    wizard.set_value(Field::Password, "hunter22");
    wizard.set_value(Field::ConfirmPassword, "hunter22");
}

/// A wizard on step 3 with a fully valid draft.
fn ready_wizard() -> Wizard {
    let mut wizard = Wizard::new();
    step_one(&mut wizard);
    wizard.advance();
    step_two(&mut wizard);
    wizard.advance();
    step_three(&mut wizard);
    assert_eq!(wizard.step(), WizardStep::Step3);
    wizard
}

// =============================================================================
// W0: STEP NAVIGATION
// =============================================================================

mod w0_navigation {
    use super::*;

    /// W0.1: The example business details pass step 1.
    #[test]
    fn next_moves_from_step_one_to_two() {
        let mut wizard = Wizard::new();
        step_one(&mut wizard);

        let outcome = wizard.advance();

        assert_eq!(
            outcome,
            AdvanceOutcome::Advanced {
                from: WizardStep::Step1,
                to: WizardStep::Step2
            }
        );
        assert_eq!(wizard.progress_percent(), 66);
    }

    /// W0.2: Prev from step 3 ignores validity.
    #[test]
    fn prev_from_step_three_ignores_errors() {
        let mut wizard = ready_wizard();
        wizard.set_value(Field::Password, "");
        wizard.set_value(Field::City, "");

        assert_eq!(wizard.back(), Some(WizardStep::Step2));
        assert_eq!(wizard.step(), WizardStep::Step2);
    }

    /// W0.3: A blank step 1 never advances.
    #[test]
    fn empty_step_one_stays() {
        let mut wizard = Wizard::new();
        assert_eq!(
            wizard.advance(),
            AdvanceOutcome::Blocked {
                landed_on: WizardStep::Step1
            }
        );
        assert_eq!(
            wizard.errors().get(Field::Email),
            Some("Email is required")
        );
    }
}

// =============================================================================
// W1: STEP RECONCILIATION
// =============================================================================

mod w1_reconciliation {
    use super::*;

    /// W1.1: Errors on steps 1 and 2 at once resolve to step 1.
    #[test]
    fn both_steps_erroring_resolves_to_step_one() {
        let mut wizard = Wizard::new();
        step_one(&mut wizard);
        wizard.advance();
        wizard.set_value(Field::TaxId, "");

        let outcome = wizard.advance();

        assert_eq!(
            outcome,
            AdvanceOutcome::Blocked {
                landed_on: WizardStep::Step1
            }
        );
        assert!(wizard.errors().contains(Field::TaxId));
        assert!(wizard.errors().contains(Field::Street));
    }

    /// W1.2: A step 3 error never redirects to step 3.
    #[test]
    fn credential_error_never_redirects_forward() {
        let mut wizard = Wizard::new();
        step_one(&mut wizard);
        wizard.advance();
        wizard.set_value(Field::Password, "x");
        assert!(wizard.validate_field(Field::Password).is_some());

        let outcome = wizard.advance();

        assert_eq!(
            outcome,
            AdvanceOutcome::Blocked {
                landed_on: WizardStep::Step2
            }
        );
        assert!(wizard.errors().contains(Field::Password));
    }

    /// W1.3: Errors are recomputed from the draft, never left stale.
    #[test]
    fn fixed_field_clears_error() {
        let mut wizard = Wizard::new();
        wizard.advance();
        assert_eq!(wizard.errors().len(), 4);

        step_one(&mut wizard);
        assert!(wizard.errors().is_empty());
    }
}

// =============================================================================
// W2: SUBMISSION OUTCOMES
// =============================================================================

mod w2_submission {
    use super::*;

    fn ready_payload(wizard: &mut Wizard) {
        match wizard.submit() {
            SubmitReadiness::Ready(payload) => {
                assert_eq!(payload.email, "a@b.com");
                assert_eq!(payload.password, "hunter22");
            }
            other => unreachable!("expected a ready payload, got {other:?}"),
        }
    }

    /// W2.1: A rejection keeps the wizard on step 3 with the draft intact.
    #[test]
    fn rejection_keeps_draft() {
        let mut wizard = ready_wizard();
        ready_payload(&mut wizard);
        let before = wizard.draft().clone();

        let note = wizard.resolve_submission(Ok(Envelope::failure("Email already registered")));

        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, "Email already registered");
        assert_eq!(note.navigate_to, None);
        assert_eq!(wizard.step(), WizardStep::Step3);
        assert_eq!(wizard.draft(), &before);
    }

    /// W2.2: Success navigates to /login and discards the draft.
    #[test]
    fn success_discards_draft() {
        let mut wizard = ready_wizard();
        ready_payload(&mut wizard);

        let note = wizard.resolve_submission(Ok(Envelope::success("Registered")));

        assert!(note.is_success());
        assert_eq!(note.message, "Registered");
        assert_eq!(note.navigate_to, Some("/login"));
        assert_eq!(wizard.step(), WizardStep::Step1);
        assert!(wizard.draft().is_empty());
        assert!(wizard.errors().is_empty());
    }

    /// W2.3: A transport failure shows a generic message and allows retry.
    #[test]
    fn transport_failure_allows_retry() {
        let mut wizard = ready_wizard();
        ready_payload(&mut wizard);

        let note = wizard.resolve_submission(Err(SubmitFailure::Parse("eof".into())));

        assert_eq!(note.message, "Something went wrong");
        assert_eq!(wizard.step(), WizardStep::Step3);
        assert_eq!(wizard.value(Field::Name), "Acme");
        ready_payload(&mut wizard);
    }

    /// W2.4: An invalid draft on step 3 lists every problem.
    #[test]
    fn invalid_submit_summarises_all_errors() {
        let mut wizard = ready_wizard();
        wizard.set_value(Field::Email, "broken");
        wizard.set_value(Field::ConfirmPassword, "nope");

        assert_eq!(wizard.submit(), SubmitReadiness::Invalid);
        assert_eq!(wizard.step(), WizardStep::Step3);
        assert_eq!(
            wizard.error_summary(),
            vec!["Invalid email address", "Passwords do not match"]
        );
    }
}
