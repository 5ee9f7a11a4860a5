//! Roster Appeal - let community members find their roster entry and ask to stay
//!
//! The roster lives in a Google Sheets spreadsheet: sheet 0 holds the active members
//! (header row, then one row per person with the name in column A) and sheet 1 collects
//! archived rows. This library provides:
//!
//! - Service-account credential resolution and the OAuth token exchange
//! - A blocking Sheets v4 client behind the [`SheetsApi`] trait
//! - First-match, case-insensitive name search over column A
//! - Archiving a matched row as one delete-then-append batch
//! - The form [`Session`] state machine and a terminal rendition of the form
//!
//! # Example
//!
//! ```no_run
//! use roster_appeal::{Config, Query, Roster, SheetsClient};
//! use roster_appeal::credentials::process_provider;
//!
//! let config = Config::from_env()?;
//! let client = SheetsClient::connect(process_provider(&config))?;
//! let roster = Roster::new(client, config.spreadsheet_id.clone());
//!
//! if let Some(found) = roster.find_row(&Query::new("john"))? {
//!     println!("Row {}: {:?}", found.position, found.cells);
//! }
//! # Ok::<(), roster_appeal::AppealError>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod models;
pub mod roster;
pub mod session;
pub mod sheets;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use clipboard::copy_to_clipboard;
pub use config::Config;
pub use error::AppealError;
pub use models::{Query, RosterMatch};
pub use roster::Roster;
pub use session::{Session, SessionState};
pub use sheets::{A1Range, Mutation, SheetsApi, SheetsClient};
