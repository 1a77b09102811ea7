//! # QuickBill Register
//!
//! Interactive sign-up against a QuickBill server.
//!
//! Reads configuration from flags and environment variables:
//! - `--backend-url` / `QUICKBILL_BACKEND_URL` - server URL
//!   (default: `http://localhost:5000`)
//! - `--draft <file.toml>` - initial field values

use clap::Parser;
use quickbill_register::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logging to stderr only. Stdout is the wizard.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quickbill_register=warn".into());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    if let Err(e) = quickbill_register::run(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
