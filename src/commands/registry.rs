//! Command registry.
//!
//! Filled once at start-up by [`initialize`](crate::commands::initialize).
//! Keys and shorthands share one namespace: a definition whose key or
//! shorthand is already taken, in either role, is rejected.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext};
use crate::commands::processor::CommandProcessor;
use crate::error::{CommandResult, RegistryError};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything known about one registered command.
#[derive(Clone)]
pub struct CommandDefinition {
    pub key: &'static str,
    pub short_key: Option<&'static str>,
    pub help_message: &'static str,
    pub help_usages: Option<&'static [&'static str]>,
    processor: Arc<dyn CommandProcessor>,
}

impl CommandDefinition {
    pub fn from_processor(processor: Arc<dyn CommandProcessor>) -> Self {
        Self {
            key: processor.key(),
            short_key: processor.short_key(),
            help_message: processor.help_message(),
            help_usages: processor.help_usages(),
            processor,
        }
    }

    pub async fn execute(
        &self,
        command: &Command,
        ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        self.processor.execute(command, ctx).await
    }
}

impl std::fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("key", &self.key)
            .field("short_key", &self.short_key)
            .finish_non_exhaustive()
    }
}

/// Registry of command definitions.
#[derive(Default)]
pub struct CommandRegistry {
    by_key: HashMap<&'static str, usize>,
    by_short_key: HashMap<&'static str, usize>,
    /// Registration order, used by help listings.
    definitions: Vec<CommandDefinition>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: CommandDefinition) -> Result<(), RegistryError> {
        if definition.key.is_empty() || definition.short_key == Some("") {
            return Err(RegistryError::EmptyKey);
        }
        if definition.short_key == Some(definition.key) {
            return Err(RegistryError::DuplicateKey(definition.key.to_string()));
        }

        for name in std::iter::once(definition.key).chain(definition.short_key) {
            if self.by_key.contains_key(name) || self.by_short_key.contains_key(name) {
                return Err(RegistryError::DuplicateKey(name.to_string()));
            }
        }

        let index = self.definitions.len();
        self.by_key.insert(definition.key, index);
        if let Some(short_key) = definition.short_key {
            self.by_short_key.insert(short_key, index);
        }
        self.definitions.push(definition);
        Ok(())
    }

    /// Shorthand for registering a processor.
    pub fn register_processor(
        &mut self,
        processor: Arc<dyn CommandProcessor>,
    ) -> Result<(), RegistryError> {
        self.register(CommandDefinition::from_processor(processor))
    }

    /// Look up by key, then by shorthand.
    pub fn get(&self, key: &str) -> Option<&CommandDefinition> {
        self.by_key
            .get(key)
            .or_else(|| self.by_short_key.get(key))
            .map(|&index| &self.definitions[index])
    }

    /// Definitions in registration order.
    pub fn definitions(&self) -> &[CommandDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
