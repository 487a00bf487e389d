// unisweep/src/utils/clipboard.rs
//! System clipboard support, available with the `clipboard` feature.

use anyhow::Result;

#[cfg(feature = "clipboard")]
pub fn copy_to_clipboard(content: &str) -> Result<()> {
    use anyhow::Context;

    let mut clipboard = arboard::Clipboard::new().context("Failed to access the system clipboard")?;
    clipboard
        .set_text(content.to_string())
        .context("Failed to write to the system clipboard")?;
    log::debug!("Copied {} bytes to the clipboard.", content.len());
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
pub fn copy_to_clipboard(_content: &str) -> Result<()> {
    anyhow::bail!("Clipboard support is not enabled in this build (missing 'clipboard' feature).")
}
