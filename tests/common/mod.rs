//! Integration test common infrastructure.
//!
//! Provides an in-memory video catalog, a WebSocket test player, and
//! helpers for assembling the server in-process or spawning the binary.

pub mod catalog;
pub mod player;
pub mod server;

#[allow(unused_imports)]
pub use catalog::StubCatalog;
#[allow(unused_imports)]
pub use player::TestPlayer;
#[allow(unused_imports)]
pub use server::TestServer;

use jukebox_fm::app::{self, App};
use jukebox_fm::config::Config;
use jukebox_fm::db::Database;
use std::sync::Arc;

pub const CHANNEL: &str = "C-JUKEBOX";

/// Minimal configuration text. `db_path` may be `:memory:`.
#[allow(dead_code)]
pub fn config_text(http_port: u16, ws_port: u16, db_path: &str) -> String {
    format!(
        r#"
[server]
name = "fm.test"
metrics_port = 0

[http]
address = "127.0.0.1:{http_port}"

[event_stream]
address = "127.0.0.1:{ws_port}"
state_request_timeout_ms = 500

[commands]
authorized_channel_id = "{CHANNEL}"
random_title_limit = 2

[database]
path = "{db_path}"

[youtube]
api_key = "test-key"
base_url = "http://127.0.0.1:9"
"#
    )
}

#[allow(dead_code)]
pub fn test_config() -> Config {
    toml::from_str(&config_text(0, 1, ":memory:")).expect("test config parses")
}

/// Assemble the whole server in-process against an in-memory database.
#[allow(dead_code)]
pub async fn assembled(catalog: StubCatalog) -> Arc<App> {
    let db = Database::new(":memory:").await.expect("database opens");
    Arc::new(app::assemble(db, Arc::new(catalog), &test_config()).expect("registry builds"))
}

/// A port nothing is listening on right now.
#[allow(dead_code)]
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map(|a| a.port())
        .expect("ephemeral port")
}
