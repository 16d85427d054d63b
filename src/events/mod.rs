//! Real-time player synchronization.
//!
//! - [`Hub`] - live connections, primary election, broadcast, state requests
//! - [`Gateway`] - WebSocket listener feeding the hub
//! - [`Connection`] - per-player read/write loop

mod connection;
mod gateway;
mod hub;

pub use connection::Connection;
pub use gateway::Gateway;
pub use hub::{ConnectionId, Hub, OutboundFrame, Registration};
