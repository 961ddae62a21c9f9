use anyhow::{anyhow, Result};
use arboard::Clipboard;
use tracing::{debug, info};

/// Put text on the system clipboard.
pub fn copy_to_clipboard_sync(text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }

    info!("Copying {} chars to clipboard", text.len());
    debug!("Text to copy: {}", text);

    let mut clipboard =
        Clipboard::new().map_err(|e| anyhow!("Failed to initialize clipboard: {}", e))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| anyhow!("Failed to copy to clipboard: {}", e))?;

    Ok(())
}

/// Shorten text for one-line listings, on a char boundary.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
