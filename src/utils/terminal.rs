//! Sanitizing spreadsheet text for terminal display
//!
//! Roster cells are edited by anyone with access to the shared spreadsheet, so their
//! contents are untrusted. Escape sequences in a cell could clear the screen, move the
//! cursor or recolor the form. Every cell goes through [`sanitize_cell`] before it is
//! rendered or printed.

/// Strips ANSI escape sequences and control characters from a cell value
///
/// Line breaks inside a cell become single spaces so each field renders on one line.
///
/// # Examples
///
/// ```
/// use roster_appeal::utils::sanitize_cell;
///
/// assert_eq!(sanitize_cell("\x1b[31mJohn\x1b[0m"), "John");
/// assert_eq!(sanitize_cell("555\n1234"), "555 1234");
/// ```
pub fn sanitize_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => skip_escape(&mut chars),
            '\n' | '\r' => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out.trim_end().to_string()
}

// ESC [ params final-byte (CSI) or ESC ] ... BEL (OSC); a lone ESC drops one char
fn skip_escape<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) {
    match chars.peek() {
        Some('[') => {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() || c == '~' {
                    break;
                }
            }
        }
        Some(']') => {
            chars.next();
            while let Some(c) = chars.next() {
                if c == '\x07' {
                    break;
                }
                if c == '\x1b' && chars.peek() == Some(&'\\') {
                    chars.next();
                    break;
                }
            }
        }
        Some(_) => {
            chars.next();
        }
        None => {}
    }
}
