//! sporldeck library
//!
//! Client for a Spotify proxy backend: reads the stored bearer tokens, attaches
//! them to requests, refreshes an expired access token once per call and
//! decodes the responses into typed shapes.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local login callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Client error type
//! - `management` - Credential store abstraction and implementations
//! - `server` - Local HTTP server for the login callback
//! - `spotify` - Backend client and request executor
//! - `types` - Response shapes and table rows
//! - `utils` - Formatting helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sporldeck::{config, management::FileStore, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> sporldeck::Res<()> {
//!     config::load_env().await?;
//!     let store = FileStore::open(config::credentials_path()).await?;
//!     let client = SpotifyClient::from_env(Arc::new(store));
//!     let user = client.current_user().await?;
//!     println!("{}", user.id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::ClientError;

/// Boxed error result used by the CLI glue (configuration, callback server).
///
/// Library calls return [`ClientError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line prefixed with a blue `o`.
///
/// ```
/// info!("Waiting for the login callback on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a red `!` and exits with status 1.
///
/// Only meant for the CLI layer, library code returns errors instead.
///
/// ```
/// let store = match FileStore::open(path).await {
///     Ok(store) => store,
///     Err(e) => error!("Cannot open credential store. Err: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line prefixed with a yellow `!` for recoverable issues.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
