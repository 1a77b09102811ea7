//! # quickbill-register
//!
//! Terminal front end for QuickBill sign-up. The three-step form logic lives
//! in quickbill-core; this crate adds:
//! - `client` → reqwest wrapper for `POST /auth/register`
//! - `handler` → submission against any `RegistrationTransport`
//! - `prompt` → the interactive step-by-step loop
//! - `draft` → pre-filling the form from a TOML file

pub mod client;
pub mod draft;
pub mod handler;
pub mod prompt;

use clap::Parser;
use client::{DEFAULT_BACKEND_URL, QuickbillClient};
use handler::SubmissionHandler;
use prompt::Prompt;
use quickbill_core::{QuickbillError, RegistrationDraft, Wizard};
use std::path::PathBuf;

/// QuickBill registration wizard
///
/// Walks through business details, address and credentials, then creates
/// the account on the QuickBill server.
#[derive(Parser, Debug)]
#[command(name = "quickbill-register")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Server URL (falls back to QUICKBILL_BACKEND_URL, then http://localhost:5000)
    #[arg(short, long)]
    pub backend_url: Option<String>,

    /// TOML file with initial field values (camelCase keys)
    #[arg(short, long)]
    pub draft: Option<PathBuf>,
}

impl Cli {
    /// Resolve the server URL: flag, then environment, then default.
    #[must_use]
    pub fn resolved_backend_url(&self) -> String {
        self.backend_url
            .clone()
            .or_else(|| std::env::var("QUICKBILL_BACKEND_URL").ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
    }
}

/// Run the wizard on stdin/stdout.
pub async fn run(cli: Cli) -> Result<(), QuickbillError> {
    let draft = match &cli.draft {
        Some(path) => draft::load_draft(path)?,
        None => RegistrationDraft::new(),
    };

    let url = cli.resolved_backend_url();
    tracing::info!("QuickBill registration starting, target: {}", url);

    let client = QuickbillClient::new(url);
    if let Err(e) = client.health().await {
        tracing::warn!("Health check failed: {}", e);
    }

    let handler = SubmissionHandler::new(client);
    let mut wizard = Wizard::with_draft(draft);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut prompt = Prompt::new(stdin.lock(), stdout.lock());

    let registered = prompt
        .run(&mut wizard, &handler)
        .await
        .map_err(|e| QuickbillError::Io(e.to_string()))?;

    if registered.is_none() {
        tracing::info!("Registration abandoned");
    }
    Ok(())
}
