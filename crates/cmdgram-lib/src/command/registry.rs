//! Command registration and message dispatch.

use indexmap::IndexMap;

use crate::grammar::{GrammarError, GrammarParser, Node};
use crate::input::InputError;
use crate::matcher::match_input;

use super::{Command, CommandError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid usage for command `{command}`: {source}")]
    InvalidUsage {
        command: String,
        source: GrammarError,
    },

    #[error("command name `{name}` is already registered")]
    Duplicate { name: String },
}

/// Why a message addressed to a command was not run successfully.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("unknown command `{name}`")]
    UnknownCommand { name: String },

    #[error("malformed arguments for `{command}`: {source}")]
    Input { command: String, source: InputError },

    /// Arguments are well-formed but do not fit the usage; show `usage`.
    #[error("invalid command syntax, usage: {usage}")]
    UsageMismatch { command: String, usage: String },

    #[error("command `{command}` failed: {source}")]
    Command {
        command: String,
        source: CommandError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The message does not start with the prefix.
    Ignored,
    Ran { command: String },
}

struct Registered {
    command: Box<dyn Command>,
    usage: Node,
}

/// Commands by name and alias, each usage parsed once at registration.
///
/// Read-only once populated; every dispatch matches with its own state.
pub struct CommandRegistry {
    prefix: String,
    fix_position_dependence: bool,
    commands: Vec<Registered>,
    /// Name or alias → index into `commands`.
    names: IndexMap<String, usize>,
}

impl CommandRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            fix_position_dependence: false,
            commands: Vec::new(),
            names: IndexMap::new(),
        }
    }

    /// Disambiguate usages registered from now on.
    pub fn fix_position_dependence(mut self, fix: bool) -> Self {
        self.fix_position_dependence = fix;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registers `command` under its name and aliases. Nothing is
    /// registered if any of them is taken or the usage does not parse.
    pub fn register(&mut self, command: Box<dyn Command>) -> Result<(), RegistryError> {
        let usage = GrammarParser::new(command.usage())
            .fix_position_dependence(self.fix_position_dependence)
            .parse()
            .map_err(|source| RegistryError::InvalidUsage {
                command: command.name().to_owned(),
                source,
            })?;

        let keys: Vec<&str> = std::iter::once(command.name())
            .chain(command.aliases().iter().copied())
            .collect();
        for (i, key) in keys.iter().enumerate() {
            if self.names.contains_key(*key) || keys[..i].contains(key) {
                return Err(RegistryError::Duplicate {
                    name: (*key).to_owned(),
                });
            }
        }

        let idx = self.commands.len();
        for key in keys {
            self.names.insert(key.to_owned(), idx);
        }
        self.commands.push(Registered { command, usage });
        Ok(())
    }

    /// Looks a command up by name or alias.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.entry(name).map(|entry| entry.command.as_ref())
    }

    /// The parsed usage of a command, by name or alias.
    pub fn usage(&self, name: &str) -> Option<&Node> {
        self.entry(name).map(|entry| &entry.usage)
    }

    fn entry(&self, name: &str) -> Option<&Registered> {
        self.names.get(name).map(|&idx| &self.commands[idx])
    }

    /// Registered commands sorted by name, each once.
    pub fn commands(&self) -> Vec<&dyn Command> {
        let mut out: Vec<&dyn Command> = self.commands.iter().map(|e| e.command.as_ref()).collect();
        out.sort_by(|a, b| a.name().cmp(b.name()));
        out
    }

    /// Routes a raw message: `<prefix><name>[ <arguments>]`.
    pub fn dispatch(&self, content: &str) -> Result<Dispatch, DispatchError> {
        let Some(rest) = content.strip_prefix(self.prefix.as_str()) else {
            return Ok(Dispatch::Ignored);
        };
        let (name, arguments) = rest.split_once(' ').unwrap_or((rest, ""));

        let Some(entry) = self.entry(name) else {
            return Err(DispatchError::UnknownCommand {
                name: name.to_owned(),
            });
        };
        let command = entry.command.name();

        let captures = match_input(arguments, &entry.usage)
            .map_err(|source| DispatchError::Input {
                command: command.to_owned(),
                source,
            })?
            .ok_or_else(|| DispatchError::UsageMismatch {
                command: command.to_owned(),
                usage: entry.command.usage().to_owned(),
            })?;

        entry
            .command
            .run(&captures)
            .map_err(|source| DispatchError::Command {
                command: command.to_owned(),
                source,
            })?;

        Ok(Dispatch::Ran {
            command: command.to_owned(),
        })
    }
}
