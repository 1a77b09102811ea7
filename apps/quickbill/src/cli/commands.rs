//! # CLI Command Implementations

use super::Backend;
use crate::api;
use quickbill_core::{QuickbillError, Registry, primitives::REGISTER_PATH};
use std::path::Path;

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    db_path: &Path,
    backend: Backend,
    host: &str,
    port: u16,
) -> Result<(), QuickbillError> {
    let registry = load_registry(db_path, backend)?;

    println!("QuickBill Registration Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Backend:  {}", backend.as_str());
    println!("  Database: {}", db_path.display());
    println!();
    println!("Endpoints:");
    println!("  POST {} - Create an account", REGISTER_PATH);
    println!("  GET  /health        - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, registry).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show registry status.
pub fn cmd_status(db_path: &Path, backend: Backend, json_mode: bool) -> Result<(), QuickbillError> {
    let registry = open_existing_registry(db_path, backend)?;
    let accounts = registry.account_count()?;

    if json_mode {
        let output = serde_json::json!({
            "database": db_path.to_string_lossy(),
            "backend": backend.as_str(),
            "persistent": registry.is_persistent(),
            "account_count": accounts,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("QuickBill Registry Status");
    println!("=========================");
    println!("Database: {}", db_path.display());
    println!("Backend:  {}", backend.as_str());
    println!();
    println!("Accounts: {}", accounts);

    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new database.
pub fn cmd_init(db_path: &Path, backend: Backend, force: bool) -> Result<(), QuickbillError> {
    if backend == Backend::Memory {
        println!("Memory backend keeps no database file; nothing to initialize");
        return Ok(());
    }

    if db_path.exists() {
        if !force {
            return Err(QuickbillError::Io(
                "Database already exists. Use --force to overwrite.".to_string(),
            ));
        }
        std::fs::remove_file(db_path)
            .map_err(|e| QuickbillError::Io(format!("Remove db: {}", e)))?;
    }

    let _registry = Registry::with_redb(db_path)?;
    println!("Initialized new redb database at {}", db_path.display());
    Ok(())
}

// =============================================================================
// COMPACT COMMAND
// =============================================================================

/// Compact the account database.
pub fn cmd_compact(db_path: &Path, backend: Backend) -> Result<(), QuickbillError> {
    let mut registry = open_existing_registry(db_path, backend)?;
    registry.compact()?;
    tracing::info!(database = %db_path.display(), "Database compacted");
    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Open the registry for the selected backend.
pub fn load_registry(db_path: &Path, backend: Backend) -> Result<Registry, QuickbillError> {
    match backend {
        Backend::Redb => Registry::with_redb(db_path),
        Backend::Memory => Ok(Registry::new()),
    }
}

/// Open the registry without creating a missing redb file.
fn open_existing_registry(db_path: &Path, backend: Backend) -> Result<Registry, QuickbillError> {
    if backend == Backend::Redb && !db_path.exists() {
        return Err(QuickbillError::Io(format!(
            "No database at {}. Run 'quickbill init' first.",
            db_path.display()
        )));
    }
    load_registry(db_path, backend)
}

// =============================================================================
// TESTS
// =============================================================================
