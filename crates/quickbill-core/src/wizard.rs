//! # Wizard (Form State Controller)
//!
//! Owns one registration attempt: the draft, the active step and the
//! current error set.
//!
//! ## Step gating
//!
//! - `advance` validates exactly the active step's fields. If they pass the
//!   wizard moves forward. Otherwise it lands on the lowest-numbered step
//!   (1 before 2) that holds an error.
//! - `back` moves one step back without validating.
//! - `submit` is only available on the final step and requires every field
//!   to be valid.
//!
//! ## Error recomputation
//!
//! The wizard remembers which fields have been through validation. Each
//! validation pass rebuilds the error set from the draft over that whole
//! set, so errors for fields outside the displayed step stay visible to the
//! reconciliation rule until they are fixed.

use crate::schema::validate_fields;
use crate::submission::{Notification, Resolution, SubmitFailure};
use crate::{Envelope, Field, RegistrationDraft, RegistrationPayload, ValidationErrorSet, WizardStep};
use std::collections::BTreeSet;

/// Steps considered when landing after a failed advance, in priority order.
/// Step 3 is never a landing target.
const RECONCILE_ORDER: [WizardStep; 2] = [WizardStep::Step1, WizardStep::Step2];

// =============================================================================
// PURE PLANNING
// =============================================================================

/// Result of planning an advance from a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancePlan {
    /// Fields that have been validated, including the active step's.
    pub validated: BTreeSet<Field>,
    /// Errors over `validated`.
    pub errors: ValidationErrorSet,
    /// Step the wizard should show next.
    pub target: WizardStep,
    /// Whether the active step's fields all passed.
    pub passed: bool,
}

/// Lowest-numbered step among steps 1 and 2 holding an error.
#[must_use]
pub fn reconcile_step(errors: &ValidationErrorSet) -> Option<WizardStep> {
    RECONCILE_ORDER
        .into_iter()
        .find(|step| errors.any_of(step.fields()))
}

/// Plan an advance from `step` without touching any state.
#[must_use]
pub fn plan_advance(
    draft: &RegistrationDraft,
    validated: &BTreeSet<Field>,
    step: WizardStep,
) -> AdvancePlan {
    let Some(next) = step.next() else {
        return AdvancePlan {
            validated: validated.clone(),
            errors: validate_fields(draft, validated),
            target: step,
            passed: false,
        };
    };

    let mut validated = validated.clone();
    validated.extend(step.fields().iter().copied());
    let errors = validate_fields(draft, &validated);

    if !errors.any_of(step.fields()) {
        return AdvancePlan {
            validated,
            errors,
            target: next,
            passed: true,
        };
    }

    let target = reconcile_step(&errors).unwrap_or(step);
    AdvancePlan {
        validated,
        errors,
        target,
        passed: false,
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// What an `advance` action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved forward.
    Advanced { from: WizardStep, to: WizardStep },
    /// Validation failed; the wizard now shows `landed_on`.
    Blocked { landed_on: WizardStep },
    /// Already on the final step; use `submit`.
    AtFinalStep,
}

/// What a `submit` action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReadiness {
    /// The draft is valid; send this payload.
    Ready(RegistrationPayload),
    /// At least one field is invalid; see `Wizard::error_summary`.
    Invalid,
    /// Submit is only available on the final step.
    NotFinalStep,
}

// =============================================================================
// WIZARD
// =============================================================================

/// Registration wizard state for a single form lifetime.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    draft: RegistrationDraft,
    step: WizardStep,
    validated: BTreeSet<Field>,
    errors: ValidationErrorSet,
}

impl Wizard {
    /// Create a wizard on step 1 with an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a wizard on step 1 with a pre-filled draft.
    #[must_use]
    pub fn with_draft(draft: RegistrationDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrorSet {
        &self.errors
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.draft.get(field)
    }

    /// Progress bar value for the active step.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.step.progress_percent()
    }

    /// Update a field value.
    ///
    /// Fields that already went through validation are re-checked so the
    /// error set always reflects the draft.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        if !self.validated.is_empty() {
            self.revalidate();
        }
    }

    /// Validate one field on demand and return its message, if any.
    pub fn validate_field(&mut self, field: Field) -> Option<&str> {
        self.validated.insert(field);
        self.revalidate();
        self.errors.get(field)
    }

    /// Try to move to the next step.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.step.is_final() {
            return AdvanceOutcome::AtFinalStep;
        }

        let from = self.step;
        let plan = plan_advance(&self.draft, &self.validated, from);
        self.validated = plan.validated;
        self.errors = plan.errors;
        self.step = plan.target;

        if plan.passed {
            AdvanceOutcome::Advanced {
                from,
                to: plan.target,
            }
        } else {
            AdvanceOutcome::Blocked {
                landed_on: plan.target,
            }
        }
    }

    /// Move one step back. Returns `None` on step 1.
    pub fn back(&mut self) -> Option<WizardStep> {
        let previous = self.step.previous()?;
        self.step = previous;
        Some(previous)
    }

    /// Validate the whole draft and, if valid, hand out the payload.
    pub fn submit(&mut self) -> SubmitReadiness {
        if !self.step.is_final() {
            return SubmitReadiness::NotFinalStep;
        }

        self.validated.extend(Field::ALL);
        self.revalidate();

        if self.errors.is_empty() {
            SubmitReadiness::Ready(self.draft.to_payload())
        } else {
            SubmitReadiness::Invalid
        }
    }

    /// Apply the result of a registration request.
    ///
    /// On success the draft is discarded and the wizard starts over.
    pub fn resolve_submission(&mut self, result: Result<Envelope, SubmitFailure>) -> Notification {
        let resolution = Resolution::from_result(result);
        if resolution.discards_draft() {
            self.reset();
        }
        resolution.notification()
    }

    /// Every current error message, in form order.
    #[must_use]
    pub fn error_summary(&self) -> Vec<String> {
        self.errors.iter().map(|(_, m)| m.to_string()).collect()
    }

    /// Discard the draft and return to step 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn revalidate(&mut self) {
        self.errors = validate_fields(&self.draft, &self.validated);
    }
}

// =============================================================================
// TESTS
// =============================================================================
