use crate::error::{DeckError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies text to the system clipboard by piping it into the platform tool.
/// - macOS: pbcopy
/// - Linux: wl-copy, then xclip, then xsel
/// - Windows: clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let candidates = clipboard_commands();
    if candidates.is_empty() {
        return Err(DeckError::Clipboard(
            "Clipboard not supported on this platform".to_string(),
        ));
    }

    let mut last_error = None;
    for (program, args) in candidates {
        match pipe_into(program, args, text) {
            Ok(()) => {
                tracing::debug!(program, bytes = text.len(), "copied to clipboard");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(program, error = %e, "clipboard command failed");
                last_error = Some(e);
            }
        }
    }
    Err(last_error
        .unwrap_or_else(|| DeckError::Clipboard("No clipboard command available".to_string())))
}

type ClipboardCommand = (&'static str, &'static [&'static str]);

const NO_ARGS: &[&str] = &[];
const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];
const XSEL_ARGS: &[&str] = &["--clipboard", "--input"];

fn clipboard_commands() -> Vec<ClipboardCommand> {
    if cfg!(target_os = "macos") {
        vec![("pbcopy", NO_ARGS)]
    } else if cfg!(target_os = "windows") {
        vec![("clip", NO_ARGS)]
    } else if cfg!(target_os = "linux") {
        vec![
            ("wl-copy", NO_ARGS),
            ("xclip", XCLIP_ARGS),
            ("xsel", XSEL_ARGS),
        ]
    } else {
        Vec::new()
    }
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| DeckError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| DeckError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| DeckError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(DeckError::Clipboard(format!("{} exited with error", program)))
    }
}
