//! Test doubles shared by the unit tests

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixListener;
use tokio::task::JoinHandle;

use crate::hypr_ipc::HyprClient;

/// A stand-in for Hyprland's control socket
///
/// Answers each connection with the next queued reply (or `ok` once the queue
/// is empty) and then closes it, recording every command it received.
pub struct FakeHyprland {
    socket_path: PathBuf,
    received: Arc<Mutex<Vec<String>>>,
    server: JoinHandle<()>,
    _dir: TempDir,
}

impl FakeHyprland {
    /// Must be called from inside a tokio runtime
    pub fn start(replies: Vec<String>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let socket_path = dir.path().join(".socket.sock");
        let listener = UnixListener::bind(&socket_path).expect("Failed to bind fake socket");

        let received = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&received);
        let mut replies: VecDeque<String> = replies.into();

        let server = tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = vec![0u8; 1024];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                log.lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&buf[..n]).into_owned());

                let reply = replies.pop_front().unwrap_or_else(|| "ok".to_string());
                let _ = stream.write_all(reply.as_bytes()).await;
                // Dropping the stream closes the connection, ending the reply
            }
        });

        Self {
            socket_path,
            received,
            server,
            _dir: dir,
        }
    }

    pub fn client(&self) -> HyprClient {
        HyprClient::new(&self.socket_path)
    }

    /// Commands received so far, in arrival order
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

impl Drop for FakeHyprland {
    fn drop(&mut self) {
        self.server.abort();
    }
}
