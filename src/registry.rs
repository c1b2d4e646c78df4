// Command registry: maps the first word of an input line to a handler.
//
// The registry is filled once during startup and then only read. Handlers
// share one signature, so anything registered can be dispatched the same
// way by the loop.

use anyhow::Result;
use std::collections::HashMap;
use std::io::Write;

use crate::session::Session;

/// What the loop should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything a handler may touch while it runs.
pub struct Context<'a> {
    pub session: &'a Session,
    /// The registry being dispatched from, so `help` lists its real state.
    pub registry: &'a CommandRegistry,
    pub out: &'a mut dyn Write,
}

/// Handlers receive the remainder of the input line, which may be empty.
pub type Handler = fn(&mut Context<'_>, &str) -> Result<Flow>;

pub struct Command {
    name: String,
    description: String,
    handler: Handler,
}

impl Command {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description shown by `help`.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn run(&self, ctx: &mut Context<'_>, argument: &str) -> Result<Flow> {
        (self.handler)(ctx, argument)
    }
}

/// Registered commands in insertion order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in console commands.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        crate::commands::register_builtins(&mut reg);
        reg
    }

    /// Register a command. Re-registering a name replaces its description
    /// and handler but keeps its place in `help` output.
    pub fn register(&mut self, name: &str, description: &str, handler: Handler) {
        let cmd = Command {
            name: name.to_string(),
            description: description.to_string(),
            handler,
        };
        match self.index.get(name) {
            Some(&slot) => self.commands[slot] = cmd,
            None => {
                self.index.insert(name.to_string(), self.commands.len());
                self.commands.push(cmd);
            }
        }
    }

    /// Exact-name lookup. No prefixes, no abbreviations.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.index.get(name).map(|&slot| &self.commands[slot])
    }

    /// `(name, description)` pairs in registration order.
    pub fn list_all(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.commands.iter().map(|c| (c.name(), c.description()))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
