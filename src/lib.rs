//! jukebox-fm - a shared jukebox driven by chat commands.
//!
//! Commands arrive over HTTP (Slack slash commands or JSON), run through the
//! [`commands`] pipeline, and turn into player events that the [`events`]
//! hub fans out to every connected player over WebSocket.

pub mod app;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod http;
pub mod metrics;
pub mod player;
pub mod services;
pub mod telemetry;
