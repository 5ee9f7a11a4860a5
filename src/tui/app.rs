//! TUI application state and event handling.
//!
//! [`App`] owns the roster handle and the form [`Session`] and runs the event loop.
//! Remote calls are queued as a pending call by [`App::handle_action`] and executed by
//! the run loop right after a frame showing the busy indicator has been drawn, so the
//! user always sees "Searching..." or "Running..." while the spreadsheet is contacted.
//!
//! Authentication, configuration and roster-shape failures end the program. Every
//! other remote failure stays on screen and the form remains usable.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, error};

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::copy_to_clipboard;
use crate::error::AppealError;
use crate::roster::Roster;
use crate::session::{Session, SessionState};
use crate::sheets::SheetsApi;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest name the query box accepts
const MAX_QUERY_CHARS: usize = 256;

const SEARCHING: &str = "Searching...";
const RUNNING: &str = "Running...";

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Which part of the form receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Query,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingCall {
    Search,
    Archive,
}

impl PendingCall {
    fn busy_label(self) -> &'static str {
        match self {
            PendingCall::Search => SEARCHING,
            PendingCall::Archive => RUNNING,
        }
    }
}

pub struct App<S> {
    roster: Roster<S>,
    session: Session,
    input: String,
    focus: Focus,
    should_quit: bool,
    pending: Option<PendingCall>,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<S: SheetsApi> App<S> {
    /// A form optionally pre-filled from a shared link; a non-empty query is
    /// searched as soon as the loop starts
    pub fn new(roster: Roster<S>, session: Session, initial_query: Option<String>) -> Self {
        let mut app = Self {
            roster,
            session,
            input: String::new(),
            focus: Focus::Query,
            should_quit: false,
            pending: None,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        };

        if let Some(query) = initial_query {
            app.input = query.chars().take(MAX_QUERY_CHARS).collect();
            app.submit_query();
        }
        app
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            if let Some(call) = self.pending {
                self.draw(terminal, Some(call.busy_label()))?;
                self.execute_pending()?;
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let elapsed = self.last_draw_time.elapsed();
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                self.draw(terminal, None)?;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>, busy: Option<&str>) -> Result<()> {
        let row_link = self.session.current_match().map(|found| self.roster.row_link(found.position));
        terminal.draw(|f| {
            let state = RenderState {
                input: &self.input,
                focus: self.focus,
                session: &self.session,
                header: self.roster.cached_header(),
                row_link,
                busy,
                status_message: self.status_message.as_ref(),
            };
            render_ui(f, &state);
        })?;
        self.needs_redraw = false;
        self.last_draw_time = Instant::now();
        Ok(())
    }

    /// Run the queued remote call, if any
    fn execute_pending(&mut self) -> Result<()> {
        let Some(call) = self.pending.take() else {
            return Ok(());
        };
        self.needs_redraw = true;

        let outcome = match call {
            PendingCall::Search => self.session.search(&self.roster).map(|_| ()),
            PendingCall::Archive => self.session.confirm(&self.roster).map(|_| ()),
        };
        if let Err(e) = outcome {
            // The session keeps non-fatal errors for the status bar
            if e.is_fatal() {
                error!("{call:?} failed: {e}");
                return Err(e.into());
            }
        }

        if self.session.current_match().is_none() {
            self.focus = Focus::Query;
            return Ok(());
        }

        // Labels are needed to show the matched row
        if let Err(e) = self.roster.header() {
            if e.is_fatal() || matches!(e, AppealError::InvariantViolation(_)) {
                error!("Cannot read roster header: {e}");
                return Err(e.into());
            }
            self.set_status(format!("✗ {e}"), MessageType::Error, STATUS_ERROR_DURATION_MS);
        }
        Ok(())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        if self.session.is_success() {
            if matches!(action, Action::Quit | Action::ClearInput | Action::Submit) {
                self.should_quit = true;
            }
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearInput => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                    self.focus = Focus::Query;
                    self.needs_redraw = true;
                }
            }
            Action::Submit => match self.focus {
                Focus::Query => self.submit_query(),
                Focus::Confirm => {
                    if self.session.state() == SessionState::ConfirmPending {
                        self.pending = Some(PendingCall::Archive);
                        self.needs_redraw = true;
                    }
                }
            },
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Query if self.session.current_match().is_some() => Focus::Confirm,
                    _ => Focus::Query,
                };
                self.needs_redraw = true;
            }
            Action::CopyShareLink => self.copy_share_link(),
            Action::Input(c) => match self.focus {
                Focus::Query => self.push_char(c),
                Focus::Confirm if c == ' ' => {
                    let acknowledged = !self.session.is_acknowledged();
                    self.session.set_acknowledged(acknowledged);
                    self.needs_redraw = true;
                }
                Focus::Confirm => {}
            },
            Action::DeleteChar => {
                if self.focus == Focus::Query && self.input.pop().is_some() {
                    self.needs_redraw = true;
                }
            }
            Action::None => {}
        }
    }

    fn submit_query(&mut self) {
        if self.session.submit(&self.input) {
            debug!("Queued search for {:?}", self.session.query().as_str());
            self.pending = Some(PendingCall::Search);
        }
        self.focus = Focus::Query;
        self.needs_redraw = true;
    }

    fn push_char(&mut self, c: char) {
        if self.input.chars().count() < MAX_QUERY_CHARS {
            self.input.push(c);
            self.needs_redraw = true;
        }
    }

    fn copy_share_link(&mut self) {
        if self.session.query().is_empty() {
            self.set_status("✗ Search for a name first", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        }

        match copy_to_clipboard(&self.session.share_link()) {
            Ok(()) => {
                self.set_status("✓ Link copied to clipboard", MessageType::Success, STATUS_SUCCESS_DURATION_MS)
            }
            Err(e) => self.set_status(
                format!("✗ Clipboard error: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::memory::MemorySheets;

    fn roster() -> Roster<MemorySheets> {
        Roster::new(
            MemorySheets::with_rows(&[
                &["Name", "Phone"],
                &["John Appleseed", "555-1234"],
                &["Mary Major", "555-9876"],
            ]),
            "id",
        )
    }

    fn app() -> App<MemorySheets> {
        App::new(roster(), Session::new("roster-appeal"), None)
    }

    fn type_text(app: &mut App<MemorySheets>, text: &str) {
        for c in text.chars() {
            app.handle_action(Action::Input(c));
        }
    }

    fn search(app: &mut App<MemorySheets>, text: &str) {
        type_text(app, text);
        app.handle_action(Action::Submit);
        app.execute_pending().unwrap();
    }

    #[test]
    fn test_app_new_initializes_state() {
        let app = app();

        assert_eq!(app.input, "");
        assert_eq!(app.focus, Focus::Query);
        assert!(app.pending.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_initial_query_searches_on_start() {
        let mut app = App::new(roster(), Session::new("roster-appeal"), Some("mary".to_string()));
        assert_eq!(app.input, "mary");
        assert_eq!(app.pending, Some(PendingCall::Search));

        app.execute_pending().unwrap();
        assert_eq!(app.session().current_match().unwrap().position, 3);
        assert!(app.roster.cached_header().is_some());
    }

    #[test]
    fn test_blank_initial_query_waits_for_input() {
        let app = App::new(roster(), Session::new("roster-appeal"), Some("  ".to_string()));
        assert!(app.pending.is_none());
        assert_eq!(app.session().state(), SessionState::Idle);
    }

    #[test]
    fn test_typing_and_deleting() {
        let mut app = app();
        type_text(&mut app, "jo");
        assert_eq!(app.input, "jo");

        app.handle_action(Action::DeleteChar);
        assert_eq!(app.input, "j");

        app.handle_action(Action::DeleteChar);
        app.handle_action(Action::DeleteChar);
        assert_eq!(app.input, "");
    }

    #[test]
    fn test_query_length_is_capped() {
        let mut app = app();
        type_text(&mut app, &"a".repeat(MAX_QUERY_CHARS + 10));
        assert_eq!(app.input.chars().count(), MAX_QUERY_CHARS);
    }

    #[test]
    fn test_submit_queues_search() {
        let mut app = app();
        type_text(&mut app, "john");
        app.handle_action(Action::Submit);

        assert_eq!(app.pending, Some(PendingCall::Search));
        assert_eq!(app.pending.unwrap().busy_label(), "Searching...");
        assert_eq!(app.roster.api().read_count(), 0);

        app.execute_pending().unwrap();
        assert!(app.pending.is_none());
        assert_eq!(app.session().state(), SessionState::ResultShown);
    }

    #[test]
    fn test_submit_empty_query_does_nothing() {
        let mut app = app();
        app.handle_action(Action::Submit);

        assert!(app.pending.is_none());
        assert_eq!(app.roster.api().read_count(), 0);
    }

    #[test]
    fn test_no_match_keeps_focus_on_query() {
        let mut app = app();
        search(&mut app, "xyz");

        assert_eq!(app.session().state(), SessionState::NoResult);
        app.handle_action(Action::ToggleFocus);
        assert_eq!(app.focus, Focus::Query);
    }

    #[test]
    fn test_full_confirmation_flow() {
        let mut app = app();
        search(&mut app, "john");

        app.handle_action(Action::ToggleFocus);
        assert_eq!(app.focus, Focus::Confirm);

        // Enter without the acknowledgment does nothing
        app.handle_action(Action::Submit);
        assert!(app.pending.is_none());

        app.handle_action(Action::Input(' '));
        assert_eq!(app.session().state(), SessionState::ConfirmPending);

        app.handle_action(Action::Submit);
        assert_eq!(app.pending.unwrap().busy_label(), "Running...");
        app.execute_pending().unwrap();

        assert!(app.session().is_success());
        assert_eq!(app.roster.api().archive.borrow()[0][0], "John Appleseed");
    }

    #[test]
    fn test_space_toggles_acknowledgment_off() {
        let mut app = app();
        search(&mut app, "john");
        app.handle_action(Action::ToggleFocus);

        app.handle_action(Action::Input(' '));
        app.handle_action(Action::Input(' '));
        assert_eq!(app.session().state(), SessionState::ResultShown);
        assert_eq!(app.input, "john");
    }

    #[test]
    fn test_finished_form_only_quits() {
        let mut app = app();
        search(&mut app, "john");
        app.handle_action(Action::ToggleFocus);
        app.handle_action(Action::Input(' '));
        app.handle_action(Action::Submit);
        app.execute_pending().unwrap();

        app.handle_action(Action::Input('x'));
        assert_eq!(app.input, "john");
        assert!(!app.should_quit);

        app.handle_action(Action::Submit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_remote_failure_is_not_fatal() {
        let mut app = app();
        app.roster.api().fail_reads.set(true);
        type_text(&mut app, "john");
        app.handle_action(Action::Submit);

        assert!(app.execute_pending().is_ok());
        assert!(app.session().last_error().unwrap().contains("HTTP 503"));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_archive_failure_keeps_confirmation() {
        let mut app = app();
        search(&mut app, "john");
        app.handle_action(Action::ToggleFocus);
        app.handle_action(Action::Input(' '));
        app.roster.api().fail_batches.set(true);

        app.handle_action(Action::Submit);
        assert!(app.execute_pending().is_ok());
        assert_eq!(app.session().state(), SessionState::ConfirmPending);
        assert!(!app.session().is_success());
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let roster = Roster::new(MemorySheets::with_rows(&[&[], &["John Appleseed"]]), "id");
        let mut app = App::new(roster, Session::new("roster-appeal"), Some("john".to_string()));

        let err = app.execute_pending().unwrap_err();
        assert!(err.to_string().contains("No header found"));
    }

    #[test]
    fn test_escape_clears_then_quits() {
        let mut app = app();
        type_text(&mut app, "jo");

        app.handle_action(Action::ClearInput);
        assert_eq!(app.input, "");
        assert!(!app.should_quit);

        app.handle_action(Action::ClearInput);
        assert!(app.should_quit);
    }

    #[test]
    fn test_handle_action_quit() {
        let mut app = app();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_copy_share_link_requires_query() {
        let mut app = app();
        app.handle_action(Action::CopyShareLink);

        let msg = app.status_message.as_ref().unwrap();
        assert_eq!(msg.message_type, MessageType::Error);
        assert_eq!(msg.text, "✗ Search for a name first");
    }

    #[test]
    fn test_copy_share_link_after_search() {
        let mut app = app();
        search(&mut app, "john");
        app.handle_action(Action::CopyShareLink);

        // Clipboard might not be available in test environment
        let msg = app.status_message.as_ref().unwrap();
        if msg.message_type == MessageType::Success {
            assert_eq!(msg.text, "✓ Link copied to clipboard");
        } else {
            assert!(msg.text.starts_with("✗ Clipboard error:"));
        }
    }

    #[test]
    fn test_check_and_clear_expired_status() {
        let mut app = app();

        app.set_status("Expired", MessageType::Success, 0);
        std::thread::sleep(Duration::from_millis(1));
        app.check_and_clear_expired_status();
        assert!(app.status_message.is_none());

        app.set_status("Active", MessageType::Success, 10000);
        app.check_and_clear_expired_status();
        assert_eq!(app.status_message.as_ref().unwrap().text, "Active");
    }
}
