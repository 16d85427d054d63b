//! Gateway - WebSocket listener for player connections.
//!
//! Binds the event stream address and spawns a [`Connection`] task for each
//! accepted client after the WebSocket handshake and origin check.

use crate::config::EventStreamConfig;
use crate::events::connection::Connection;
use crate::events::hub::Hub;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tracing::{error, info, instrument, warn};

/// The Gateway accepts incoming WebSocket connections and hands them to the hub.
pub struct Gateway {
    listener: TcpListener,
    allow_origins: Arc<Vec<String>>,
    hub: Arc<Hub>,
}

impl Gateway {
    pub async fn bind(config: &EventStreamConfig, hub: Arc<Hub>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(config.address).await?;
        info!(address = %config.address, "Event stream listener bound");
        Ok(Self {
            listener,
            allow_origins: Arc::new(config.allow_origins.clone()),
            hub,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let hub = Arc::clone(&self.hub);
                    let allowed = Arc::clone(&self.allow_origins);

                    tokio::spawn(async move {
                        let cors_callback = |req: &Request, response: Response| {
                            check_origin(&allowed, req, addr).map(|()| response)
                        };

                        match accept_hdr_async(stream, cors_callback).await {
                            Ok(ws_stream) => {
                                info!(%addr, "WebSocket handshake successful");
                                Connection::new(ws_stream, addr, hub).run().await;
                            }
                            Err(e) => {
                                warn!(%addr, error = %e, "WebSocket handshake failed");
                            }
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept event stream connection");
                }
            }
        }
    }
}

/// Empty `allowed` accepts every origin; `"*"` in the list does the same.
fn check_origin(allowed: &[String], req: &Request, addr: SocketAddr) -> Result<(), ErrorResponse> {
    if allowed.is_empty() {
        return Ok(());
    }

    if let Some(origin) = req.headers().get("Origin").and_then(|o| o.to_str().ok()) {
        if allowed.iter().any(|a| a == origin || a == "*") {
            return Ok(());
        }
        warn!(%addr, origin = %origin, "WebSocket origin rejected");
    }

    let mut response = ErrorResponse::new(Some("Origin not allowed".to_string()));
    *response.status_mut() = http::StatusCode::FORBIDDEN;
    Err(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(origin: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri("/");
        if let Some(origin) = origin {
            builder = builder.header("Origin", origin);
        }
        builder.body(()).unwrap()
    }

    fn addr() -> SocketAddr {
        "127.0.0.1:9".parse().unwrap()
    }

    #[test]
    fn empty_list_allows_anything() {
        assert!(check_origin(&[], &request(None), addr()).is_ok());
    }

    #[test]
    fn listed_origin_is_accepted() {
        let allowed = vec!["https://fm.example".to_string()];
        assert!(check_origin(&allowed, &request(Some("https://fm.example")), addr()).is_ok());
    }

    #[test]
    fn other_origin_is_forbidden() {
        let allowed = vec!["https://fm.example".to_string()];
        let err = check_origin(&allowed, &request(Some("https://evil.example")), addr()).unwrap_err();
        assert_eq!(err.status(), http::StatusCode::FORBIDDEN);
        assert!(check_origin(&allowed, &request(None), addr()).is_err());
    }
}
