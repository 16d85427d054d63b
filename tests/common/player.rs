//! Test player.
//!
//! Speaks the event stream protocol over a real WebSocket so tests can
//! assert on what the server broadcasts and answer state requests.

use futures_util::{SinkExt, StreamExt};
use jukebox_proto::{ClientFrame, EventData, PlayerState, ServerFrame};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

pub struct TestPlayer {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[allow(dead_code)]
impl TestPlayer {
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let (ws, _) = connect_async(format!("ws://{address}")).await?;
        Ok(Self { ws })
    }

    /// Receive the next server frame.
    pub async fn recv(&mut self) -> anyhow::Result<ServerFrame> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<ServerFrame> {
        loop {
            let message = timeout(dur, self.ws.next())
                .await?
                .ok_or_else(|| anyhow::anyhow!("connection closed"))??;
            if let Message::Text(text) = message {
                return Ok(ServerFrame::parse(&text)?);
            }
        }
    }

    /// Receive the next event, failing if it carries an ack id.
    pub async fn recv_event(&mut self) -> anyhow::Result<EventData> {
        match self.recv().await? {
            ServerFrame::Events { data, ack: None } => Ok(data),
            ServerFrame::Events { data, ack: Some(ack) } => {
                anyhow::bail!("unexpected request {} (ack {ack})", data.tag())
            }
        }
    }

    /// Wait for a state request and answer it with `state`.
    pub async fn answer_state_request(&mut self, state: &PlayerState) -> anyhow::Result<()> {
        match self.recv().await? {
            ServerFrame::Events {
                data: EventData::PlayerStateRequest,
                ack: Some(ack),
            } => {
                self.send(&ClientFrame::Ack {
                    ack,
                    state: state.clone(),
                })
                .await
            }
            other => anyhow::bail!("expected a state request, got {other:?}"),
        }
    }

    /// Assert nothing arrives for a short while.
    pub async fn expect_silence(&mut self) -> anyhow::Result<()> {
        match self.recv_timeout(Duration::from_millis(200)).await {
            Err(_) => Ok(()),
            Ok(frame) => anyhow::bail!("unexpected frame {frame:?}"),
        }
    }

    pub async fn send(&mut self, frame: &ClientFrame) -> anyhow::Result<()> {
        self.ws.send(Message::Text(frame.to_text()?)).await?;
        Ok(())
    }

    pub async fn close(mut self) -> anyhow::Result<()> {
        self.ws.close(None).await?;
        Ok(())
    }
}
