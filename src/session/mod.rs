//! Form session state machine.
//!
//! One [`Session`] covers one user interaction. The rendering shell feeds it submitted
//! queries and confirmation steps, and renders whatever state it lands in:
//!
//! ```text
//! Idle ──submit──▶ Searching ──search──▶ ResultShown ──ack──▶ ConfirmPending
//!                                  └───▶ NoResult               │ confirm
//!                                                               ▼
//!                                    Success ◀──ok── Archiving ─┘ (error: back to ConfirmPending)
//! ```
//!
//! The search result is cached against the last searched query. Submitting the same
//! query again reuses it without a remote call; submitting anything else drops it.
//! After a successful archive the session is finished and every entry point
//! short-circuits to the thank-you state.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{Query, RosterMatch};
use crate::roster::Roster;
use crate::sheets::SheetsApi;
use crate::utils::share_link;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Searching,
    ResultShown,
    NoResult,
    ConfirmPending,
    Archiving,
    Success,
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    query: Query,
    last_query: Option<Query>,
    /// `Some(None)` caches a search that found nothing
    cached_result: Option<Option<RosterMatch>>,
    acknowledged: bool,
    success: bool,
    last_error: Option<String>,
    share_base: String,
}

impl Session {
    pub fn new(share_base: impl Into<String>) -> Self {
        Self { share_base: share_base.into(), ..Self::default() }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The cached match, if the last search found one
    pub fn current_match(&self) -> Option<&RosterMatch> {
        self.cached_result.as_ref().and_then(Option::as_ref)
    }

    /// Bookmarkable link reproducing the current query
    pub fn share_link(&self) -> String {
        share_link(&self.share_base, self.query.as_str())
    }

    /// Accept a submitted query. Returns whether a search is now due.
    pub fn submit(&mut self, raw: &str) -> bool {
        if self.success {
            return false;
        }

        let query = Query::new(raw);
        if self.last_query.as_ref() != Some(&query) {
            debug!("Query changed to {:?}, dropping cached result", query.as_str());
            self.last_query = Some(query.clone());
            self.cached_result = None;
            self.acknowledged = false;
        }
        self.query = query;
        self.last_error = None;

        self.state = if self.query.is_empty() { SessionState::Idle } else { SessionState::Searching };
        self.state == SessionState::Searching
    }

    /// Resolve the current query, from the cache when possible
    ///
    /// A remote failure records the error and leaves the previous state in place.
    pub fn search<S: SheetsApi>(&mut self, roster: &Roster<S>) -> Result<SessionState> {
        if self.success {
            return Ok(self.state);
        }
        if self.query.is_empty() {
            self.state = SessionState::Idle;
            return Ok(self.state);
        }

        if self.cached_result.is_none() {
            let previous = self.state;
            self.state = SessionState::Searching;
            match roster.find_row(&self.query) {
                Ok(result) => {
                    self.cached_result = Some(result);
                    self.last_error = None;
                }
                Err(e) => {
                    warn!("Search for {:?} failed: {e}", self.query.as_str());
                    self.state = previous;
                    self.last_error = Some(e.to_string());
                    return Err(e);
                }
            }
        } else {
            debug!("Reusing cached result for {:?}", self.query.as_str());
        }

        self.state = match (self.current_match(), self.acknowledged) {
            (Some(_), true) => SessionState::ConfirmPending,
            (Some(_), false) => SessionState::ResultShown,
            (None, _) => SessionState::NoResult,
        };
        Ok(self.state)
    }

    /// The "this is correct" acknowledgment
    pub fn set_acknowledged(&mut self, acknowledged: bool) {
        if !matches!(self.state, SessionState::ResultShown | SessionState::ConfirmPending) {
            return;
        }
        self.acknowledged = acknowledged;
        self.state =
            if acknowledged { SessionState::ConfirmPending } else { SessionState::ResultShown };
    }

    /// The explicit second confirmation: archive the matched row
    ///
    /// Does nothing unless the match has been acknowledged. On failure the session
    /// returns to `ConfirmPending` with the error recorded.
    pub fn confirm<S: SheetsApi>(&mut self, roster: &Roster<S>) -> Result<SessionState> {
        if self.state != SessionState::ConfirmPending {
            return Ok(self.state);
        }
        let Some(found) = self.current_match().cloned() else {
            return Ok(self.state);
        };

        self.state = SessionState::Archiving;
        match roster.archive_row(&found) {
            Ok(()) => {
                info!("Session archived row {}", found.position);
                self.success = true;
                self.cached_result = None;
                self.acknowledged = false;
                self.last_error = None;
                self.state = SessionState::Success;
                Ok(self.state)
            }
            Err(e) => {
                warn!("Archiving row {} failed: {e}", found.position);
                self.state = SessionState::ConfirmPending;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
