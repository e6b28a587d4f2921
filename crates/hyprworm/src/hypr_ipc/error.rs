//! Error types for Hyprland IPC operations

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to the compositor socket
#[derive(Debug, Error)]
pub enum IpcError {
    /// A variable needed to locate the socket is not set
    #[error("{var} environment variable not set - is Hyprland running?")]
    ConfigurationMissing { var: &'static str },

    /// Failed to connect to the compositor socket
    #[error("Failed to connect to Hyprland socket at {}: {source}", path.display())]
    ConnectFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to send the command
    #[error("Failed to send command to Hyprland: {0}")]
    WriteFailed(#[source] std::io::Error),

    /// Failed to read the reply
    #[error("Failed to read reply from Hyprland: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// The exchange did not finish in time
    #[error("Hyprland did not answer {command:?} within {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}

/// Errors from decoding the window list reply
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The reply is not a JSON array
    #[error("Window list is not a JSON array: {reason}")]
    InvalidFormat { reason: String },
}
