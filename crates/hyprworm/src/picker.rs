//! Bridge to the external picker process
//!
//! The picker is any program that reads candidate lines on stdin and prints
//! the chosen one on stdout (fuzzel, wofi, rofi, bemenu, fzf, ...). Its stderr
//! is left attached to ours.

use std::process::Stdio;

use hyprworm_config::LauncherCommand;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, warn};

/// Upper bound on the captured selection, in bytes
///
/// A picker returns one line, so anything longer is cut off here rather than
/// read without limit.
pub const MAX_SELECTION_BYTES: usize = 4096;

/// Errors that prevent a selection from being made
#[derive(Debug, Error)]
pub enum PickerError {
    /// The picker program could not be started
    #[error("Failed to start picker `{program}`: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The child came back without a stdin or stdout handle
    ///
    /// Both streams are requested as pipes, and tokio creates those pipes
    /// inside `spawn`, so a real pipe failure (e.g. `EMFILE`) is reported as
    /// [`SpawnFailed`](Self::SpawnFailed). This variant only covers a missing
    /// handle afterwards.
    #[error("Picker {stream} pipe was not available")]
    PipeFailed { stream: &'static str },

    /// Reading the picker's output failed
    #[error("Failed to read picker output: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// Waiting for the picker to exit failed
    #[error("Failed to wait for picker: {0}")]
    WaitFailed(#[source] std::io::Error),
}

/// Run the picker over `lines` and return what the user chose
///
/// Every line is written newline-terminated, then the picker's stdin is
/// closed. Output is read until end-of-stream or [`MAX_SELECTION_BYTES`],
/// and one trailing newline is stripped. The child is always waited for.
///
/// Returns `Ok(None)` when the picker printed nothing, which is how pickers
/// report a cancelled selection.
///
/// # Errors
///
/// Returns `PickerError::SpawnFailed` if the program cannot be executed and
/// `PickerError::PipeFailed` if its stdin or stdout is not a pipe.
pub async fn pick<I, S>(lines: I, launcher: &LauncherCommand) -> Result<Option<String>, PickerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut child = Command::new(&launcher.program)
        .args(&launcher.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| PickerError::SpawnFailed {
            program: launcher.program.clone(),
            source,
        })?;

    debug!(launcher = %launcher, pid = ?child.id(), "Picker started");

    let stdin = child.stdin.take().ok_or(PickerError::PipeFailed { stream: "stdin" });
    let stdout = child.stdout.take().ok_or(PickerError::PipeFailed { stream: "stdout" });

    let captured = match (stdin, stdout) {
        (Ok(stdin), Ok(stdout)) => {
            let payload = candidate_payload(lines);
            // Feed and capture together so a picker that answers early cannot
            // stall on a full pipe.
            let ((), captured) = tokio::join!(
                feed_candidates(stdin, payload),
                capture_selection(stdout, MAX_SELECTION_BYTES)
            );
            captured.map_err(PickerError::ReadFailed)
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    };

    let status = child.wait().await.map_err(PickerError::WaitFailed)?;
    debug!(%status, "Picker exited");

    let (raw, truncated) = captured?;
    if truncated {
        warn!(
            limit = MAX_SELECTION_BYTES,
            "Picker output reached the size limit and was truncated"
        );
    }

    Ok(selection_from_output(&raw))
}

/// Join candidates into the bytes written to the picker
fn candidate_payload<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut payload = String::new();
    for line in lines {
        payload.push_str(line.as_ref());
        payload.push('\n');
    }
    payload
}

/// Write the candidates and close the pipe
///
/// A picker may exit without reading all of its input; that is not an error.
async fn feed_candidates<W: AsyncWrite + Unpin>(mut stdin: W, payload: String) {
    if let Err(e) = stdin.write_all(payload.as_bytes()).await {
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            debug!("Picker closed its input early");
        } else {
            warn!("Failed to write candidates to picker: {}", e);
        }
    }
    if let Err(e) = stdin.shutdown().await {
        debug!("Closing picker input: {}", e);
    }
}

/// Read at most `limit` bytes, reporting whether more were available
async fn capture_selection<R: AsyncRead + Unpin>(
    stdout: R,
    limit: usize,
) -> std::io::Result<(Vec<u8>, bool)> {
    let mut raw = Vec::new();
    stdout.take(limit as u64 + 1).read_to_end(&mut raw).await?;
    let truncated = raw.len() > limit;
    raw.truncate(limit);
    Ok((raw, truncated))
}

fn selection_from_output(raw: &[u8]) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let text = String::from_utf8_lossy(raw);
    Some(text.strip_suffix('\n').unwrap_or(&*text).to_string())
}
