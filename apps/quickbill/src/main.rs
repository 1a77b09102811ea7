//! # QuickBill - Registration Server
//!
//! The backend binary behind the QuickBill sign-up wizard.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/quickbill (THE BINARY)       │
//! │                                              │
//! │   ┌─────────────┐        ┌─────────────┐     │
//! │   │    CLI      │        │  HTTP API   │     │
//! │   │   (clap)    │        │   (axum)    │     │
//! │   └──────┬──────┘        └──────┬──────┘     │
//! │          └───────────┬──────────┘            │
//! │                      ▼                       │
//! │             ┌────────────────┐               │
//! │             │ quickbill-core │               │
//! │             └────────────────┘               │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! quickbill server --port 5000
//! quickbill -B memory server
//! quickbill status --json-mode
//! ```

use clap::Parser;
use quickbill::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // QUICKBILL_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("QUICKBILL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quickbill=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
   ___        _      _    ___  _ _ _
  / _ \ _   _(_) ___| | _| __ )(_) | |
 | | | | | | | |/ __| |/ /  _ \| | | |
 | |_| | |_| | | (__|   <| |_) | | | |
  \__\_\\__,_|_|\___|_|\_\____/|_|_|_|

  Registration Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
