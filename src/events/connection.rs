//! Connection - drives one player's WebSocket.
//!
//! ```text
//!   hub outbound queue ──▶ ws sink
//!   ws stream ──▶ ClientFrame::parse ──▶ Hub::handle_client_frame
//! ```
//!
//! Both directions run in a single `tokio::select!` loop. When either side
//! ends the connection is removed from the hub.

use crate::events::hub::{ConnectionId, Hub};
use futures_util::{SinkExt, StreamExt};
use jukebox_proto::{ClientFrame, EventData};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tracing::{Instrument, debug, info, warn};

/// A player connection handler.
pub struct Connection<S> {
    ws: WebSocketStream<S>,
    addr: SocketAddr,
    hub: Arc<Hub>,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(ws: WebSocketStream<S>, addr: SocketAddr, hub: Arc<Hub>) -> Self {
        Self { ws, addr, hub }
    }

    /// Run until the player goes away.
    pub async fn run(self) {
        let Self { ws, addr, hub } = self;
        let mut registration = hub.connect();
        let conn_id = registration.id;

        let span = crate::telemetry::spans::connection(conn_id, &addr.to_string());
        async move {
            if !registration.primary {
                sync_viewer(Arc::clone(&hub), conn_id);
            }

            let (mut sink, mut stream) = ws.split();

            loop {
                tokio::select! {
                    frame = registration.outbound.recv() => {
                        let Some(frame) = frame else { break };
                        if let Err(e) = sink.send(Message::Text(frame.to_string())).await {
                            debug!(error = %e, "Write failed");
                            break;
                        }
                    }
                    incoming = stream.next() => {
                        match incoming {
                            Some(Ok(Message::Text(text))) => match ClientFrame::parse(&text) {
                                Ok(frame) => hub.handle_client_frame(conn_id, frame),
                                Err(e) => warn!(error = %e, "Malformed frame from player"),
                            },
                            Some(Ok(Message::Ping(payload))) => {
                                if sink.send(Message::Pong(payload)).await.is_err() {
                                    break;
                                }
                            }
                            Some(Ok(Message::Close(_))) | None => break,
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                debug!(error = %e, "Read failed");
                                break;
                            }
                        }
                    }
                }
            }

            hub.disconnect(conn_id);
            let _ = sink.close().await;
            info!("Player connection closed");
        }
        .instrument(span)
        .await
    }
}

/// Bring a newly connected viewer up to date with the primary's state.
///
/// Falls back to the canonical state when the primary cannot answer.
fn sync_viewer(hub: Arc<Hub>, conn_id: ConnectionId) {
    tokio::spawn(async move {
        let state = match hub.request_state(hub.state_request_timeout()).await {
            Ok(state) => state,
            Err(e) => {
                debug!(conn_id, error = %e, "Using canonical state for new viewer");
                hub.owner().get_state()
            }
        };
        if let Err(e) = hub.send_to(conn_id, EventData::PlayerStateUpdate { state }) {
            debug!(conn_id, error = %e, "Viewer left before sync");
        }
    });
}
