//! Mapping a picker selection back to a window and focusing it

use tracing::{debug, info};

use crate::arrange::ArrangedWindow;
use crate::hypr_ipc::{HyprClient, IpcError, WindowRecord};

/// Find the window whose rendered line equals `selection`
///
/// The first match in arrangement order wins, so two windows that render
/// identically always resolve to the earlier one.
pub fn resolve<'a>(selection: &str, arranged: &[ArrangedWindow<'a>]) -> Option<&'a WindowRecord> {
    arranged
        .iter()
        .find(|entry| entry.line == selection)
        .map(|entry| entry.window)
}

/// Ask Hyprland to focus `window`; the reply text is ignored
pub async fn focus(client: &HyprClient, window: &WindowRecord) -> Result<(), IpcError> {
    info!(
        address = %window.address,
        class = %window.class_name,
        "Focusing window"
    );
    let reply = client.focus_window(&window.address).await?;
    debug!(reply = %reply.trim(), "Focus dispatched");
    Ok(())
}
