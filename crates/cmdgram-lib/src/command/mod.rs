//! The seam to command implementations.
//!
//! A command is a name, optional aliases, a usage grammar and a `run` entry
//! point taking the captured arguments. What a command does with them is
//! its own business; [`CommandRegistry`] only parses usages once, routes
//! raw messages by name and matches the rest against the usage.

mod registry;


use crate::matcher::Captures;

pub use registry::{CommandRegistry, Dispatch, DispatchError, RegistryError};

pub trait Command {
    fn name(&self) -> &str;

    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Usage grammar the arguments must conform to.
    fn usage(&self) -> &str;

    fn run(&self, arguments: &Captures) -> Result<(), CommandError>;
}

/// A command rejected its (well-formed) arguments or failed while running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
