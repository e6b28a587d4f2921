//! The query → arrange → pick → focus pipeline
//!
//! One call to [`run`] is one user interaction. Every stage finishes before
//! the next begins.

use hyprworm_config::Config;
use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::arrange::arrange;
use crate::hypr_ipc::{CatalogError, HyprClient, IpcError, WindowCatalog};
use crate::picker::{self, PickerError};
use crate::selection;

/// Failures that end a run
#[derive(Debug, Error, Diagnostic)]
pub enum SwitcherError {
    #[error(transparent)]
    #[diagnostic(code(hyprworm::ipc))]
    Ipc(#[from] IpcError),

    #[error(transparent)]
    #[diagnostic(code(hyprworm::catalog))]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    #[diagnostic(code(hyprworm::picker), help("check the `launcher` setting"))]
    Picker(#[from] PickerError),

    #[error("Failed to focus the selected window: {0}")]
    #[diagnostic(code(hyprworm::dispatch))]
    Dispatch(#[source] IpcError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop after rendering and hand the lines back instead of picking
    pub list_only: bool,
    /// Treat a failed focus dispatch as an error
    pub strict_dispatch: bool,
}

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Hyprland reported no switchable windows
    NoWindows,
    /// Rendered picker lines, in order (list mode)
    Listed(Vec<String>),
    /// The picker produced no output
    Cancelled,
    /// The selection matched no known window
    NoMatch { selection: String },
    Focused { address: String },
    /// Focusing failed and the failure was only logged
    DispatchFailed { address: String },
}

/// Run one complete switch
///
/// # Errors
///
/// Fails if the window list cannot be fetched or decoded, if the picker
/// cannot run, or (with `strict_dispatch`) if focusing fails.
pub async fn run(
    config: &Config,
    client: &HyprClient,
    options: RunOptions,
) -> Result<Outcome, SwitcherError> {
    let json = client.clients_json().await?;
    let catalog = WindowCatalog::parse(&json)?;
    debug!(windows = catalog.len(), "Window catalog loaded");

    if catalog.is_empty() {
        info!("No windows to switch to");
        return Ok(Outcome::NoWindows);
    }

    let arranged = arrange(&catalog, config);

    if options.list_only {
        return Ok(Outcome::Listed(
            arranged.into_iter().map(|entry| entry.line).collect(),
        ));
    }

    let lines = arranged.iter().map(|entry| entry.line.as_str());
    let Some(selection) = picker::pick(lines, &config.launcher).await? else {
        info!("Selection cancelled");
        return Ok(Outcome::Cancelled);
    };

    let Some(window) = selection::resolve(&selection, &arranged) else {
        warn!(%selection, "Selection does not match any window");
        return Ok(Outcome::NoMatch { selection });
    };

    let address = window.address.clone();
    match selection::focus(client, window).await {
        Ok(()) => Ok(Outcome::Focused { address }),
        Err(e) if options.strict_dispatch => Err(SwitcherError::Dispatch(e)),
        Err(e) => {
            error!(%address, "Failed to focus window: {}", e);
            Ok(Outcome::DispatchFailed { address })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeHyprland;
    use hyprworm_config::LauncherCommand;
    use std::path::Path;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const TWO_WINDOWS: &str = r#"[
        {"title": "Firefox", "class": "firefox", "address": "0x1", "workspace": {"name": "1"}},
        {"title": "", "class": "x", "address": "0x2", "workspace": {"name": "1"}}
    ]"#;

    fn config_with_picker(program: &str, args: &[&str]) -> Config {
        Config {
            launcher: LauncherCommand {
                program: program.to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
            },
            ..Config::default()
        }
    }

    /// A picker that only leaves a marker file behind, proving it ran
    fn marker_picker(marker: &Path) -> Config {
        config_with_picker("touch", &[marker.to_str().unwrap()])
    }

    #[tokio::test]
    async fn test_selected_window_is_focused() {
        let hyprland = FakeHyprland::start(vec![TWO_WINDOWS.to_string(), "ok".to_string()]);
        let config = config_with_picker("head", &["-n", "1"]);

        let outcome = run(&config, &hyprland.client(), RunOptions::default())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Focused {
                address: "0x1".to_string()
            }
        );
        assert_eq!(
            hyprland.received(),
            vec![
                "j/clients".to_string(),
                "dispatch focuswindow address:0x1".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_list_mode_renders_without_picker() {
        let temp_dir = tempfile::tempdir().unwrap();
        let marker = temp_dir.path().join("picker-ran");
        let hyprland = FakeHyprland::start(vec![TWO_WINDOWS.to_string()]);
        let options = RunOptions {
            list_only: true,
            ..RunOptions::default()
        };

        let outcome = run(&marker_picker(&marker), &hyprland.client(), options)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Listed(vec!["[1] firefox".to_string()]));
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_malformed_root_fails_before_picker() {
        let temp_dir = tempfile::tempdir().unwrap();
        let marker = temp_dir.path().join("picker-ran");
        let hyprland = FakeHyprland::start(vec![r#"{"title": "Firefox"}"#.to_string()]);

        let err = run(&marker_picker(&marker), &hyprland.client(), RunOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SwitcherError::Catalog(_)), "got: {:?}", err);
        assert!(!marker.exists(), "picker must not be spawned");
        assert_eq!(hyprland.received(), vec!["j/clients".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_catalog_skips_picker() {
        let temp_dir = tempfile::tempdir().unwrap();
        let marker = temp_dir.path().join("picker-ran");
        let hyprland = FakeHyprland::start(vec![r#"[{"title": ""}]"#.to_string()]);

        let outcome = run(&marker_picker(&marker), &hyprland.client(), RunOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoWindows);
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_cancelled_picker_dispatches_nothing() {
        let hyprland = FakeHyprland::start(vec![TWO_WINDOWS.to_string()]);
        let config = config_with_picker("sh", &["-c", "cat > /dev/null"]);

        let outcome = run(&config, &hyprland.client(), RunOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(hyprland.received(), vec!["j/clients".to_string()]);
    }

    #[tokio::test]
    async fn test_unmatched_selection_dispatches_nothing() {
        let hyprland = FakeHyprland::start(vec![TWO_WINDOWS.to_string()]);
        let config = config_with_picker("echo", &["[9] ghost"]);

        let outcome = run(&config, &hyprland.client(), RunOptions::default())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::NoMatch {
                selection: "[9] ghost".to_string()
            }
        );
        assert_eq!(hyprland.received().len(), 1);
    }

    #[tokio::test]
    async fn test_query_failure_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let client = HyprClient::new(temp_dir.path().join(".socket.sock"));

        let err = run(&Config::default(), &client, RunOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SwitcherError::Ipc(IpcError::ConnectFailed { .. })));
    }

    /// A compositor that answers the window query and then disappears
    fn answer_once(dir: &Path, reply: &'static str) -> HyprClient {
        let socket_path = dir.join(".socket.sock");
        let listener = tokio::net::UnixListener::bind(&socket_path).unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let _ = stream.read(&mut buf).await;
            let _ = stream.write_all(reply.as_bytes()).await;
            // listener and stream dropped here
        });
        HyprClient::new(socket_path)
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_logged_by_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let client = answer_once(temp_dir.path(), TWO_WINDOWS);
        let config = config_with_picker("head", &["-n", "1"]);

        let outcome = run(&config, &client, RunOptions::default()).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::DispatchFailed {
                address: "0x1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_fatal_when_strict() {
        let temp_dir = tempfile::tempdir().unwrap();
        let client = answer_once(temp_dir.path(), TWO_WINDOWS);
        let config = config_with_picker("head", &["-n", "1"]);
        let options = RunOptions {
            strict_dispatch: true,
            ..RunOptions::default()
        };

        let err = run(&config, &client, options).await.unwrap_err();

        assert!(matches!(err, SwitcherError::Dispatch(_)), "got: {:?}", err);
    }
}
