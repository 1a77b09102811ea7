//! # Step Partition
//!
//! Static mapping of form fields to wizard steps.
//!
//! | Step | Name | Fields |
//! |------|------|--------|
//! | 1 | Business | name, email, phoneNumber, taxId |
//! | 2 | Address | street, city, state, zipCode |
//! | 3 | Credentials | password, confirmPassword |
//!
//! Every field belongs to exactly one step.

use crate::Field;
use crate::primitives::STEP_COUNT;
use serde::{Deserialize, Serialize};

const STEP1_FIELDS: [Field; 4] = [Field::Name, Field::Email, Field::PhoneNumber, Field::TaxId];
const STEP2_FIELDS: [Field; 4] = [Field::Street, Field::City, Field::State, Field::ZipCode];
const STEP3_FIELDS: [Field; 2] = [Field::Password, Field::ConfirmPassword];

/// A wizard step. Initial step is `Step1`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum WizardStep {
    #[default]
    Step1,
    Step2,
    Step3,
}

impl WizardStep {
    /// All steps in navigation order.
    pub const ALL: [WizardStep; 3] = [WizardStep::Step1, WizardStep::Step2, WizardStep::Step3];

    /// Fields gated by this step.
    #[must_use]
    pub const fn fields(self) -> &'static [Field] {
        match self {
            WizardStep::Step1 => &STEP1_FIELDS,
            WizardStep::Step2 => &STEP2_FIELDS,
            WizardStep::Step3 => &STEP3_FIELDS,
        }
    }

    /// 1-based step number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            WizardStep::Step1 => 1,
            WizardStep::Step2 => 2,
            WizardStep::Step3 => 3,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            WizardStep::Step1 => "Business details",
            WizardStep::Step2 => "Address",
            WizardStep::Step3 => "Credentials",
        }
    }

    /// Get the next step, if any.
    #[must_use]
    pub const fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Step1 => Some(WizardStep::Step2),
            WizardStep::Step2 => Some(WizardStep::Step3),
            WizardStep::Step3 => None,
        }
    }

    /// Get the previous step, if any.
    #[must_use]
    pub const fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Step1 => None,
            WizardStep::Step2 => Some(WizardStep::Step1),
            WizardStep::Step3 => Some(WizardStep::Step2),
        }
    }

    /// Check if this is the final (submit) step.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, WizardStep::Step3)
    }

    /// Progress through the form, in whole percent, rounded down.
    #[must_use]
    pub const fn progress_percent(self) -> u8 {
        // u16 keeps 3 * 100 from overflowing.
        ((self.number() as u16 * 100) / STEP_COUNT as u16) as u8
    }

    /// The step that owns `field`.
    #[must_use]
    pub fn of(field: Field) -> WizardStep {
        match field {
            Field::Name | Field::Email | Field::PhoneNumber | Field::TaxId => WizardStep::Step1,
            Field::Street | Field::City | Field::State | Field::ZipCode => WizardStep::Step2,
            Field::Password | Field::ConfirmPassword => WizardStep::Step3,
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), STEP_COUNT, self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn groups_partition_every_field() {
        let mut seen = BTreeSet::new();
        for step in WizardStep::ALL {
            for field in step.fields() {
                assert!(seen.insert(*field), "{field} appears in two steps");
                assert_eq!(WizardStep::of(*field), step);
            }
        }
        assert_eq!(seen.len(), Field::ALL.len());
    }

    #[test]
    fn navigation_is_linear() {
        assert_eq!(WizardStep::Step1.previous(), None);
        assert_eq!(WizardStep::Step1.next(), Some(WizardStep::Step2));
        assert_eq!(WizardStep::Step3.next(), None);
        assert_eq!(WizardStep::Step3.previous(), Some(WizardStep::Step2));
        assert_eq!(WizardStep::default(), WizardStep::Step1);
    }

    #[test]
    fn progress_rounds_down() {
        assert_eq!(WizardStep::Step1.progress_percent(), 33);
        assert_eq!(WizardStep::Step2.progress_percent(), 66);
        assert_eq!(WizardStep::Step3.progress_percent(), 100);
    }
}
