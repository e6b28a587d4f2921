//! Hyprland IPC client for compositor integration
//!
//! This module provides communication with Hyprland via its control socket.
//! It enables hyprworm to:
//! - Fetch the list of open client windows
//! - Ask Hyprland to focus a chosen window
//!
//! ## Protocol
//!
//! Hyprland exposes a Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
//! A client connects, writes a single plain-text command (prefixed with `j/`
//! for a JSON reply), and reads until Hyprland closes the connection.

mod client;
mod error;
mod types;

pub use client::HyprClient;
pub use error::{CatalogError, IpcError};
pub use types::{WindowCatalog, WindowRecord};
