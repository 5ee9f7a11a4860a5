use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// Unreserved characters per RFC 3986 stay readable in shared links
const QUERY_ENCODE_SET: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

const SPREADSHEET_URL_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// Builds a bookmarkable link carrying the current query as the `q` parameter
///
/// An empty query yields the bare base so the link opens a blank form.
///
/// # Examples
///
/// ```
/// use roster_appeal::utils::share_link;
///
/// assert_eq!(share_link("https://appeal.example.org", "John A"), "https://appeal.example.org?q=John%20A");
/// assert_eq!(share_link("https://appeal.example.org", ""), "https://appeal.example.org");
/// ```
pub fn share_link(base: &str, query: &str) -> String {
    if query.is_empty() {
        return base.to_string();
    }
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}q={}", base, separator, utf8_percent_encode(query, QUERY_ENCODE_SET))
}

/// Link to a single row of the active sheet in the spreadsheet web UI
///
/// # Examples
///
/// ```
/// use roster_appeal::utils::row_link;
///
/// assert_eq!(
///     row_link("abc123", 7),
///     "https://docs.google.com/spreadsheets/d/abc123#gid=0?range=7:7"
/// );
/// ```
pub fn row_link(spreadsheet_id: &str, position: u32) -> String {
    format!("{SPREADSHEET_URL_BASE}/{spreadsheet_id}#gid=0?range={position}:{position}")
}
