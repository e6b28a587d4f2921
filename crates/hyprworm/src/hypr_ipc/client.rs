//! Hyprland IPC client implementation
//!
//! Every request opens a fresh connection to the control socket, writes one
//! text command, and reads until Hyprland closes the connection. There is no
//! framing: end-of-stream marks the end of the reply.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tracing::debug;

use super::IpcError;

/// Environment variable holding the per-user runtime directory
const RUNTIME_DIR_ENV: &str = "XDG_RUNTIME_DIR";

/// Environment variable identifying the running Hyprland instance
const INSTANCE_SIGNATURE_ENV: &str = "HYPRLAND_INSTANCE_SIGNATURE";

/// Initial reply buffer size; doubled each time it fills
const INITIAL_READ_CAPACITY: usize = 4096;

/// Command returning every client window as a JSON array
pub const CLIENTS_QUERY: &str = "j/clients";

/// Build the dispatch command that focuses the window at `address`
pub fn focus_window_command(address: &str) -> String {
    format!("dispatch focuswindow address:{}", address)
}

/// Discover the Hyprland control socket path from the environment
///
/// The socket lives at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
///
/// # Errors
///
/// Returns `IpcError::ConfigurationMissing` naming the first variable that is
/// unset or empty.
pub fn get_socket_path() -> Result<PathBuf, IpcError> {
    socket_path_from(
        std::env::var_os(RUNTIME_DIR_ENV),
        std::env::var_os(INSTANCE_SIGNATURE_ENV),
    )
}

fn socket_path_from(
    runtime_dir: Option<OsString>,
    signature: Option<OsString>,
) -> Result<PathBuf, IpcError> {
    let runtime_dir = runtime_dir
        .filter(|v| !v.is_empty())
        .ok_or(IpcError::ConfigurationMissing { var: RUNTIME_DIR_ENV })?;
    let signature = signature
        .filter(|v| !v.is_empty())
        .ok_or(IpcError::ConfigurationMissing {
            var: INSTANCE_SIGNATURE_ENV,
        })?;

    Ok(PathBuf::from(runtime_dir)
        .join("hypr")
        .join(signature)
        .join(".socket.sock"))
}

/// Client for the Hyprland control socket
///
/// Holds no connection of its own; each [`query`](Self::query) is an
/// independent, short-lived exchange.
///
/// # Example
///
/// ```ignore
/// let client = HyprClient::from_env()?;
/// let json = client.query(CLIENTS_QUERY).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HyprClient {
    socket_path: PathBuf,
    timeout: Option<Duration>,
}

impl HyprClient {
    /// Client for an explicit socket path, with no timeout
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            timeout: None,
        }
    }

    /// Client for the socket of the Hyprland instance named in the environment
    ///
    /// # Errors
    ///
    /// Returns `IpcError::ConfigurationMissing` if the socket cannot be located.
    pub fn from_env() -> Result<Self, IpcError> {
        Ok(Self::new(get_socket_path()?))
    }

    /// Bound each exchange (connect, write and read together) by `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send one command and return the complete reply
    ///
    /// # Errors
    ///
    /// Returns `IpcError::ConnectFailed`, `IpcError::WriteFailed` or
    /// `IpcError::ReadFailed` for the corresponding transport failure, and
    /// `IpcError::Timeout` if a timeout is set and the exchange outlives it.
    pub async fn query(&self, command: &str) -> Result<String, IpcError> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.exchange(command))
                .await
                .map_err(|_| IpcError::Timeout {
                    command: command.to_string(),
                    timeout,
                })?,
            None => self.exchange(command).await,
        }
    }

    /// Fetch the raw JSON window list
    pub async fn clients_json(&self) -> Result<String, IpcError> {
        self.query(CLIENTS_QUERY).await
    }

    /// Ask Hyprland to focus the window at `address`, returning its reply
    pub async fn focus_window(&self, address: &str) -> Result<String, IpcError> {
        self.query(&focus_window_command(address)).await
    }

    async fn exchange(&self, command: &str) -> Result<String, IpcError> {
        let mut stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|e| IpcError::ConnectFailed {
                path: self.socket_path.clone(),
                source: e,
            })?;

        stream
            .write_all(command.as_bytes())
            .await
            .map_err(IpcError::WriteFailed)?;

        let mut reply = Vec::with_capacity(INITIAL_READ_CAPACITY);
        loop {
            if reply.len() == reply.capacity() {
                reply.reserve(reply.capacity());
            }
            let bytes_read = stream
                .read_buf(&mut reply)
                .await
                .map_err(IpcError::ReadFailed)?;
            if bytes_read == 0 {
                break;
            }
        }

        debug!(command, bytes = reply.len(), "Hyprland reply received");

        Ok(String::from_utf8_lossy(&reply).into_owned())
    }
}
