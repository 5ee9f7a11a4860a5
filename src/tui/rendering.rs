use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app::{Focus, MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::models::RosterMatch;
use crate::session::{Session, SessionState};
use crate::utils::sanitize_cell;

const TITLE: &str = "GenAI community appeal form";
const PROMPT: &str = "Enter your Name (or whatever alias you have on whatsapp)";
const PLACEHOLDER: &str = "John Appleseed";
const NO_RESULTS: &str = "No results found";
const THANK_YOU: &str = "Thanks! You'll not be removed from the group.";
const ACKNOWLEDGE: &str = "I confirm that the information above is correct, and is mine.";
const ARE_YOU_SURE: &str = "Are you sure?";
const PROCEED: &str = "Yes, I'm here and please don't remove me!";

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const WARNING: Color = Color::Rgb(245, 158, 11);
const DANGER: Color = Color::Rgb(239, 68, 68);
const BAR: Color = Color::Rgb(24, 24, 27);

/// Everything the form needs to draw one frame
pub struct RenderState<'a> {
    pub input: &'a str,
    pub focus: Focus,
    pub session: &'a Session,
    pub header: Option<&'a [String]>,
    pub row_link: Option<String>,
    pub busy: Option<&'a str>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire form
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled(TITLE, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))),
        layout.title_area,
    );
    render_query_input(frame, layout.query_area, state.input, state.focus);
    render_results(frame, layout.results_area, state);
    render_confirmation(frame, layout.confirm_area, state);
    render_status_bar(frame, layout.status_area, state);
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { ACCENT } else { MUTED };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {title} "))
}

fn render_query_input(frame: &mut Frame, area: Rect, input: &str, focus: Focus) {
    let content = if input.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(MUTED).add_modifier(Modifier::ITALIC))
    } else {
        Span::raw(input)
    };

    let paragraph = Paragraph::new(content).block(panel(PROMPT, focus == Focus::Query));
    frame.render_widget(paragraph, area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &RenderState) {
    let session = state.session;

    let text = if session.is_success() {
        Text::from(Line::from(Span::styled(
            THANK_YOU,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )))
    } else if let Some(busy) = state.busy {
        Text::from(Line::from(Span::styled(busy, Style::default().fg(WARNING))))
    } else if let Some(found) = session.current_match() {
        match_text(found, state.header.unwrap_or(&[]), state.row_link.as_deref())
    } else if session.state() == SessionState::NoResult {
        Text::from(Line::from(Span::styled(NO_RESULTS, Style::default().fg(DANGER))))
    } else {
        Text::from(Line::from(Span::styled(
            "Type your name and press Enter to search",
            Style::default().fg(MUTED),
        )))
    };

    let paragraph = Paragraph::new(text).block(panel("Result", false)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn match_text<'a>(found: &'a RosterMatch, header: &'a [String], link: Option<&'a str>) -> Text<'a> {
    let mut lines = vec![Line::from(Span::styled(
        format!("Row {}", found.position),
        Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
    ))];
    if let Some(link) = link {
        lines.push(Line::from(Span::styled(
            link,
            Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines.push(Line::from(""));

    for (label, value) in found.fields(header) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", sanitize_cell(label)),
                Style::default().fg(MUTED).add_modifier(Modifier::BOLD),
            ),
            Span::raw(sanitize_cell(value)),
        ]));
    }

    Text::from(lines)
}

fn render_confirmation(frame: &mut Frame, area: Rect, state: &RenderState) {
    let session = state.session;
    let focused = state.focus == Focus::Confirm;

    let mut lines = Vec::new();
    if session.current_match().is_some() && !session.is_success() {
        let checkbox = if session.is_acknowledged() { "[x]" } else { "[ ]" };
        lines.push(Line::from(format!("{checkbox} {ACKNOWLEDGE}")));

        if session.is_acknowledged() {
            lines.push(Line::from(Span::styled(ARE_YOU_SURE, Style::default().fg(WARNING))));

            let button_style = if focused {
                Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(BRIGHT)
            };
            lines.push(Line::from(Span::styled(format!("[ {PROCEED} ]"), button_style)));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines)).block(panel("Confirm", focused));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let bar = Style::default().bg(BAR);

    let (text, style) = if let Some(message) = state.status_message {
        let color = match message.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => DANGER,
        };
        (format!(" {} ", message.text), bar.fg(color))
    } else if let Some(error) = state.session.last_error() {
        (format!(" [ERROR] {error} "), bar.fg(DANGER))
    } else {
        let mut parts = vec![];
        if !state.session.query().is_empty() {
            parts.push(format!("Share: {}", state.session.share_link()));
            parts.push("Ctrl+Y: copy link".to_string());
        }
        match state.focus {
            Focus::Query => parts.push("Enter: search".to_string()),
            Focus::Confirm => {
                parts.push("Space: toggle".to_string());
                parts.push("Enter: confirm".to_string());
            }
        }
        if state.session.current_match().is_some() {
            parts.push("Tab: switch".to_string());
        }
        parts.push("Ctrl+C: quit".to_string());
        (format!(" {} ", parts.join(" | ")), bar.fg(BRIGHT))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
