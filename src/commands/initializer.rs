//! Start-up registration of every command.

use crate::commands::processors::{
    HelpCommand, ListCommand, PauseCommand, QueueCommand, RandomCommand, ResumeCommand,
    SayCommand, SkipCommand, StatusCommand, TagShowCommand, VolumeCommand, XCommand,
};
use crate::commands::processor::CommandProcessor;
use crate::commands::registry::CommandRegistry;
use crate::error::RegistryError;
use crate::events::Hub;
use crate::services::{SongsService, XSoundsService};
use std::sync::Arc;
use tracing::info;

/// Collaborators the processors are built from.
pub struct CommandDependencies {
    pub songs: Arc<SongsService>,
    pub xsounds: Arc<XSoundsService>,
    pub hub: Arc<Hub>,
    /// How many titles `random` lists before summarizing.
    pub random_title_limit: usize,
    /// What users type before a command, shown in help usages.
    pub command_prefix: String,
}

/// Build the registry. Fails on the first key collision.
pub fn initialize(deps: &CommandDependencies) -> Result<CommandRegistry, RegistryError> {
    let processors: Vec<Arc<dyn CommandProcessor>> = vec![
        Arc::new(RandomCommand::new(
            Arc::clone(&deps.songs),
            Arc::clone(&deps.hub),
            deps.random_title_limit,
        )),
        Arc::new(QueueCommand::new(Arc::clone(&deps.songs), Arc::clone(&deps.hub))),
        Arc::new(SkipCommand::new(Arc::clone(&deps.hub))),
        Arc::new(PauseCommand::new(Arc::clone(&deps.hub))),
        Arc::new(ResumeCommand::new(Arc::clone(&deps.hub))),
        Arc::new(VolumeCommand::new(Arc::clone(&deps.hub))),
        Arc::new(SayCommand::new(Arc::clone(&deps.hub))),
        Arc::new(XCommand::new(Arc::clone(&deps.xsounds), Arc::clone(&deps.hub))),
        Arc::new(TagShowCommand::new(Arc::clone(&deps.xsounds))),
        Arc::new(ListCommand::new(Arc::clone(&deps.songs))),
        Arc::new(StatusCommand::new(Arc::clone(&deps.hub))),
    ];

    let mut registry = CommandRegistry::new();
    for processor in processors {
        registry.register_processor(processor)?;
    }

    let help = HelpCommand::new(registry.definitions(), deps.command_prefix.clone());
    registry.register_processor(Arc::new(help))?;

    info!(commands = registry.len(), "Command registry initialized");
    Ok(registry)
}
