//! Data models for the roster form.
//!
//! - [`Query`] - A trimmed, case-insensitive search string
//! - [`RosterMatch`] - A roster row found by a search, with its 1-based position

pub mod query;
pub mod roster;

pub use query::Query;
pub use roster::RosterMatch;
