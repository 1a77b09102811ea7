//! # Submission Handler
//!
//! Sends a validated draft to the server and feeds the answer back into the
//! wizard.

use crate::client::QuickbillClient;
use quickbill_core::{
    Envelope, Notification, RegistrationPayload, SubmitFailure, SubmitReadiness, Wizard,
};
use std::future::Future;

/// Something that can deliver a registration payload and return the
/// server's envelope.
pub trait RegistrationTransport {
    fn send_registration(
        &self,
        payload: &RegistrationPayload,
    ) -> impl Future<Output = Result<Envelope, SubmitFailure>>;
}

impl RegistrationTransport for QuickbillClient {
    async fn send_registration(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<Envelope, SubmitFailure> {
        self.register(payload).await.map_err(SubmitFailure::from)
    }
}

/// What happened when the user pressed submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submit only exists on the last step.
    NotFinalStep,
    /// The draft has errors; nothing was sent.
    Invalid(Vec<String>),
    /// A request was made and its result applied.
    Resolved(Notification),
}

/// Drives submission for one wizard at a time.
#[derive(Debug)]
pub struct SubmissionHandler<T> {
    transport: T,
}

impl<T: RegistrationTransport> SubmissionHandler<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate, send, and reconcile.
    ///
    /// There is no double-submit guard and no retry.
    pub async fn submit(&self, wizard: &mut Wizard) -> SubmitOutcome {
        let payload = match wizard.submit() {
            SubmitReadiness::Ready(payload) => payload,
            SubmitReadiness::NotFinalStep => return SubmitOutcome::NotFinalStep,
            SubmitReadiness::Invalid => {
                tracing::debug!(errors = wizard.errors().len(), "Submit blocked by validation");
                return SubmitOutcome::Invalid(wizard.error_summary());
            }
        };

        tracing::info!("Submitting registration");
        let result = self.transport.send_registration(&payload).await;
        match &result {
            Ok(envelope) => tracing::info!(
                success = envelope.success,
                message = %envelope.message,
                "Registration answered"
            ),
            Err(e) => tracing::warn!("Registration request failed: {}", e),
        }

        SubmitOutcome::Resolved(wizard.resolve_submission(result))
    }
}
