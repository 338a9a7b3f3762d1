use clipboard::{ClipboardContext, ClipboardProvider};
use crate::errors::ClipboardError;

/// Put a generated result on the system clipboard
pub fn copy_to_clipboard(content: &str) -> Result<(), ClipboardError> {
    let mut ctx: ClipboardContext = ClipboardProvider::new()?;
    ctx.set_contents(content.to_owned())?;
    tracing::debug!(chars = content.chars().count(), "result copied to clipboard");
    Ok(())
}
