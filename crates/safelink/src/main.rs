//! safelink: contact manager console
//!
//! Main entry point for the SafeLink contact-management client.
//!
//! Usage:
//!   safelink             - Connect to the configured contact API
//!   safelink --demo      - Run against an in-memory sample store
//!   safelink --help      - Show help

mod repl;

use std::sync::Arc;

use sl_contacts::{Contact, ContactApi, ContactStore, InMemoryContactStore};
use sl_core::Config;
use tracing_subscriber::EnvFilter;

/// Run mode
enum RunMode {
    /// Interactive console against the remote contact API
    Console,
    /// Interactive console against an in-memory sample store
    Demo,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args();

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("safelink {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging; default quiet so log lines stay out of the screen
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting safelink...");

    let store: Arc<dyn ContactStore> = match mode {
        RunMode::Demo => {
            tracing::info!("Running against the in-memory demo store");
            Arc::new(demo_store().await)
        }
        _ => {
            tracing::info!("Contact API: {}", config.api.base_url);
            Arc::new(
                ContactApi::new(&config.api.base_url, config.api.timeout_secs)
                    .map_err(|e| anyhow::anyhow!("Failed to create contact API client: {}", e))?,
            )
        }
    };

    repl::run_repl(config, store).await
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    let args: Vec<String> = std::env::args().collect();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--demo" | "-d" => return RunMode::Demo,
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Console
}

/// Print help message
fn print_help() {
    println!("safelink - SafeLink contact manager console");
    println!();
    println!("Usage:");
    println!("  safelink             Connect to the configured contact API");
    println!("  safelink --demo      Run against an in-memory sample store");
    println!("  safelink --help      Show this help message");
    println!("  safelink --version   Show version");
    println!();
    println!("Environment Variables:");
    println!("  SAFELINK_API_URL             Contact API base URL (default: http://localhost:8080/contacts)");
    println!("  SAFELINK_PAGE_SIZE           Contacts per page (default: 10)");
    println!("  SAFELINK_TIMEOUT_SECS        HTTP request timeout (default: 30)");
    println!("  SAFELINK_NOTIFY_DURATION_MS  Notification display time (default: 1500)");
    println!();
    println!("A safelink.toml file in the working directory overrides the defaults;");
    println!("environment variables override the file.");
}

/// Sample contacts for demo mode
async fn demo_store() -> InMemoryContactStore {
    let contacts = vec![
        Contact::new("Ann Albright")
            .with_email("ann@safelink.dev")
            .with_phone("(555)010-0001")
            .with_address("12 Harbor Way")
            .with_title("Engineer")
            .with_status("Active"),
        Contact::new("Bob Breuer")
            .with_email("bob@safelink.dev")
            .with_phone("(555)010-0002")
            .with_address("4 Elm Court")
            .with_title("Designer")
            .with_status("Active"),
        Contact::new("Carla Dunn")
            .with_email("carla@safelink.dev")
            .with_phone("(555)010-0003")
            .with_address("88 Birch Lane")
            .with_title("Manager")
            .with_status("Inactive"),
        Contact::new("Derek Fox")
            .with_email("derek@safelink.dev")
            .with_phone("(555)010-0004")
            .with_address("7 Ocean Drive")
            .with_title("Analyst")
            .with_status("Active"),
    ];

    InMemoryContactStore::seeded(contacts).await
}
