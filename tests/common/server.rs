//! Test server management.
//!
//! Spawns and manages jukeboxd instances for end-to-end tests.

use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// A running jukeboxd process with its own config and database.
pub struct TestServer {
    child: Child,
    http_port: u16,
    ws_port: u16,
    _data_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn spawn() -> anyhow::Result<Self> {
        let data_dir = tempfile::tempdir()?;
        let http_port = super::free_port();
        let ws_port = super::free_port();

        let db_path: PathBuf = data_dir.path().join("jukebox.db");
        let config_path = data_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            super::config_text(http_port, ws_port, &db_path.display().to_string()),
        )?;

        let child = Command::new(env!("CARGO_BIN_EXE_jukeboxd"))
            .arg(&config_path)
            .spawn()?;

        let server = Self {
            child,
            http_port,
            ws_port,
            _data_dir: data_dir,
        };
        server.wait_until_ready().await?;
        Ok(server)
    }

    /// Wait until both listeners accept connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            let http = tokio::net::TcpStream::connect(("127.0.0.1", self.http_port)).await;
            let ws = tokio::net::TcpStream::connect(("127.0.0.1", self.ws_port)).await;
            if http.is_ok() && ws.is_ok() {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.http_port, path)
    }

    pub fn ws_address(&self) -> String {
        format!("127.0.0.1:{}", self.ws_port)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
