use anyhow::{Context, Result};
use arboard::Clipboard;

/// Longest link accepted; browsers and chat clients truncate far earlier
const MAX_LINK_BYTES: usize = 8 * 1024;

/// Trait for clipboard operations (allows mocking in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// A shareable link is a single non-empty line of bounded length
fn validate_link(link: &str) -> Result<()> {
    if link.is_empty() {
        anyhow::bail!("Cannot copy an empty link");
    }

    if link.chars().any(char::is_control) {
        anyhow::bail!("Link contains control characters");
    }

    if link.len() > MAX_LINK_BYTES {
        anyhow::bail!("Link too large for clipboard ({} bytes, max {})", link.len(), MAX_LINK_BYTES);
    }

    Ok(())
}

fn copy_with_provider(link: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_link(link)?;
    provider.set_text(link)
}

/// Copy a share link to the system clipboard.
///
/// # Errors
/// Returns error if:
/// - The link is empty, multi-line or longer than 8 KiB
/// - Clipboard access is denied or unavailable (headless environment)
pub fn copy_to_clipboard(link: &str) -> Result<()> {
    // Validate first, before initializing clipboard (for better error messages in CI)
    validate_link(link)?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(link, &mut clipboard)
}
