// TUI rendition of the appeal form
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
pub use terminal::TerminalManager;

use crate::roster::Roster;
use crate::session::Session;
use crate::sheets::SheetsApi;

/// Run the interactive form until the user quits or a fatal error occurs
pub fn run_interactive<S: SheetsApi>(
    roster: Roster<S>,
    session: Session,
    initial_query: Option<String>,
) -> Result<()> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(roster, session, initial_query);

    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res
}
