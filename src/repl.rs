// The command loop: read a line, split off the command word, dispatch it
// through the registry, repeat until a handler asks to quit.

use anyhow::Result;
use std::io::Write;
use tracing::{debug, error};

use crate::registry::{CommandRegistry, Context, Flow};
use crate::session::Session;

/// Printed for any line whose first word is not a registered command.
pub const UNKNOWN_COMMAND: &str = "Invalid command. Use 'help' for a list of commands.";

/// Where the loop gets its input. `None` means input is exhausted.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Split a line into the command word and the rest of the line.
///
/// The split happens at the first whitespace run. Without whitespace the
/// whole line is the command and the rest is empty.
pub fn split_command(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(at) => (&line[..at], line[at..].trim_start()),
        None => (line, ""),
    }
}

/// Fallback for lines that name no registered command.
fn unknown(ctx: &mut Context<'_>, _rest: &str) -> Result<Flow> {
    writeln!(ctx.out, "{UNKNOWN_COMMAND}")?;
    Ok(Flow::Continue)
}

pub struct Console<'a> {
    session: &'a Session,
    registry: &'a CommandRegistry,
    state: LoopState,
}

impl<'a> Console<'a> {
    pub fn new(session: &'a Session, registry: &'a CommandRegistry) -> Self {
        Console {
            session,
            registry,
            state: LoopState::Running,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run a single input line.
    ///
    /// A failing handler is reported on `out` and the loop keeps going;
    /// only `Flow::Quit` moves the console to `Terminated`.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow> {
        let (name, rest) = split_command(line);
        let mut ctx = Context {
            session: self.session,
            registry: self.registry,
            out: &mut *out,
        };
        let result = match self.registry.lookup(name) {
            Some(cmd) => {
                debug!(command = name, "dispatching");
                cmd.run(&mut ctx, rest)
            }
            None => unknown(&mut ctx, rest),
        };
        let flow = match result {
            Ok(flow) => flow,
            Err(err) => {
                let message = format!("{err:#}");
                error!(command = name, error = %message, "command failed");
                writeln!(out, "Error: {message}")?;
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            self.state = LoopState::Terminated;
        }
        Ok(flow)
    }

    /// Print the banner and process lines until `quit` or end of input.
    pub fn run(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Welcome to tootstream!")?;
        writeln!(out, "Enter a command. Use 'help' for a list of commands.")?;
        writeln!(out)?;

        let prompt = self.session.prompt();
        while self.state == LoopState::Running {
            out.flush()?;
            let Some(line) = input.read_line(&prompt)? else {
                debug!("input closed");
                self.state = LoopState::Terminated;
                break;
            };
            self.execute(&line, out)?;
        }
        writeln!(out, "Goodbye!")?;
        Ok(())
    }
}
