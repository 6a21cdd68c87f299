//! tunefeed library
//!
//! A small web front-end over a third-party music metadata API. It renders
//! trending artists and tracks, track search, track and artist pages with a
//! playable audio preview, behind a username/password session login.
//!
//! # Modules
//!
//! - `api` - axum handlers for every inbound route
//! - `catalog` - aggregation pipeline plus image and audio resolvers
//! - `cli` - command-line entry points (`serve`, `users`)
//! - `config` - `.env` loading and the explicit `Config` struct
//! - `management` - user accounts and sessions
//! - `server` - shared state, router and listener
//! - `types` - display records and account types
//! - `upstream` - HTTP client for the metadata API and catalog pages
//! - `utils` - tokens, password hashing and cookie helpers
//! - `views` - HTML rendering of display records
//!
//! # Example
//!
//! ```
//! use tunefeed::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> tunefeed::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     cli::serve(config, None, false).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod types;
pub mod upstream;
pub mod utils;
pub mod views;

/// A convenient Result type alias for operations that may fail.
///
/// Boxed dynamic error with `Send + Sync` bounds so it can cross await
/// points and task boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark to stderr and exits
/// the program.
///
/// Only for fatal startup errors. Request handlers must never call this;
/// they log with [`warning!`] and degrade instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", key);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark to stderr.
///
/// Used for every degraded path: unreachable upstream, schema drift,
/// failed image or audio resolution.
///
/// # Example
///
/// ```
/// warning!("top tracks: response has no 'tracks' key");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
