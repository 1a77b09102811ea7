//! # Submission Reconciliation
//!
//! Turns the result of a registration request into what the user sees.
//!
//! The network call itself lives outside the core; this module only
//! classifies its result:
//!
//! | Result | Resolution | Notification | Draft |
//! |--------|------------|--------------|-------|
//! | transport/parse failure | `Failed` | generic error | kept |
//! | envelope `success: false` | `Rejected` | server message | kept |
//! | envelope `success: true` | `Accepted` | server message, go to `/login` | discarded |

use crate::Envelope;
use crate::primitives::{GENERIC_FAILURE_MESSAGE, LOGIN_ROUTE};
use thiserror::Error;

/// A registration request that produced no usable envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitFailure {
    /// The server could not be reached.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body was not a valid envelope.
    #[error("malformed response: {0}")]
    Parse(String),
}

/// Classified outcome of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Account created.
    Accepted { message: String },
    /// Server answered with an explicit failure.
    Rejected { message: String },
    /// No envelope was received.
    Failed { cause: SubmitFailure },
}

impl Resolution {
    /// Classify a request result.
    #[must_use]
    pub fn from_result(result: Result<Envelope, SubmitFailure>) -> Self {
        match result {
            Ok(envelope) if envelope.success => Resolution::Accepted {
                message: envelope.message,
            },
            Ok(envelope) => Resolution::Rejected {
                message: envelope.message,
            },
            Err(cause) => Resolution::Failed { cause },
        }
    }

    /// Whether the draft must be discarded.
    #[must_use]
    pub fn discards_draft(&self) -> bool {
        matches!(self, Resolution::Accepted { .. })
    }

    /// The user-visible notification for this outcome.
    #[must_use]
    pub fn notification(&self) -> Notification {
        match self {
            Resolution::Accepted { message } => Notification {
                level: NotificationLevel::Success,
                message: message.clone(),
                navigate_to: Some(LOGIN_ROUTE),
            },
            Resolution::Rejected { message } => Notification::error(message.clone()),
            Resolution::Failed { .. } => Notification::error(GENERIC_FAILURE_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast-style message, optionally paired with a navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub navigate_to: Option<&'static str>,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            navigate_to: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_navigates_to_login() {
        let resolution = Resolution::from_result(Ok(Envelope::success("Registered")));
        assert!(resolution.discards_draft());
        let note = resolution.notification();
        assert!(note.is_success());
        assert_eq!(note.message, "Registered");
        assert_eq!(note.navigate_to, Some("/login"));
    }

    #[test]
    fn rejection_surfaces_server_message() {
        let resolution =
            Resolution::from_result(Ok(Envelope::failure("Email already registered")));
        assert!(!resolution.discards_draft());
        let note = resolution.notification();
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, "Email already registered");
        assert_eq!(note.navigate_to, None);
    }

    #[test]
    fn transport_failure_is_generic() {
        let resolution = Resolution::from_result(Err(SubmitFailure::Transport(
            "connection refused".into(),
        )));
        let note = resolution.notification();
        assert_eq!(note.message, "Something went wrong");
        assert!(!resolution.discards_draft());
    }
}
