use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows of the appeal form, top to bottom
pub struct AppLayout {
    pub title_area: Rect,
    pub query_area: Rect,
    pub results_area: Rect,
    pub confirm_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Title: 1 row
    /// - Query input: 3 rows (bordered)
    /// - Results panel: remaining space
    /// - Confirmation panel: 5 rows (bordered)
    /// - Status bar: 1 row
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            title_area: chunks[0],
            query_area: chunks[1],
            results_area: chunks[2],
            confirm_area: chunks[3],
            status_area: chunks[4],
        }
    }
}
