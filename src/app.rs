//! Explicit assembly of the running system.
//!
//! Services are built once, leaves first, and shared by `Arc`.

use crate::catalog::VideoCatalog;
use crate::commands::{self, CommandDependencies, CommandExecutor};
use crate::config::{CommandsConfig, Config};
use crate::db::Database;
use crate::error::RegistryError;
use crate::events::Hub;
use crate::player::PlayerStateOwner;
use crate::services::{HistoryService, SongsService, XSoundsService};
use std::sync::Arc;

/// Everything the HTTP and WebSocket surfaces need.
pub struct App {
    pub db: Database,
    pub hub: Arc<Hub>,
    pub songs: Arc<SongsService>,
    pub history: Arc<HistoryService>,
    pub xsounds: Arc<XSoundsService>,
    pub executor: Arc<CommandExecutor>,
    pub commands: CommandsConfig,
}

/// Wire services, the hub and the command registry together.
pub fn assemble(
    db: Database,
    catalog: Arc<dyn VideoCatalog>,
    config: &Config,
) -> Result<App, RegistryError> {
    let history = Arc::new(HistoryService::new(db.clone()));
    let songs = Arc::new(SongsService::new(db.clone(), Arc::clone(&history), catalog));
    let xsounds = Arc::new(XSoundsService::new(db.clone()));

    let owner = Arc::new(PlayerStateOwner::new());
    let hub = Arc::new(Hub::new(
        owner,
        config.event_stream.outbound_queue,
        config.event_stream.state_request_timeout(),
    ));

    let registry = commands::initialize(&CommandDependencies {
        songs: Arc::clone(&songs),
        xsounds: Arc::clone(&xsounds),
        hub: Arc::clone(&hub),
        random_title_limit: config.commands.random_title_limit,
        command_prefix: config.commands.slash_command.clone(),
    })?;
    let executor = Arc::new(CommandExecutor::new(Arc::new(registry)));

    Ok(App {
        db,
        hub,
        songs,
        history,
        xsounds,
        executor,
        commands: config.commands.clone(),
    })
}
