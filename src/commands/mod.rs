//! Command dispatch pipeline.
//!
//! ```text
//! text ──▶ TextCommandParser ──▶ Command ──▶ CommandExecutor
//!                                              │ CommandRegistry::get
//!                                              ▼
//!                                     dyn CommandProcessor::execute
//!                                              │
//!                                              ▼
//!                                  CommandProcessingResponse
//! ```

mod executor;
mod initializer;
mod model;
mod parser;
mod processor;
pub mod processors;
mod registry;

pub use executor::{COMMAND_DOES_NOT_EXIST, CommandExecutor};
pub use initializer::{CommandDependencies, initialize};
pub use model::{
    Command, CommandProcessingResponse, ExecutionContext, MessageType, ResponseMessage,
};
pub use parser::TextCommandParser;
pub use processor::CommandProcessor;
pub use registry::{CommandDefinition, CommandRegistry};
