// Terminal side of the console: line input for the command loop, the
// login prompts and a spinner shown while waiting on the instance.

use anyhow::Result;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::repl::LineSource;
use crate::session::CredentialPrompt;

/// Reads command lines from stdin. On a terminal the prompt is drawn with
/// `dialoguer`; piped input gets the same `prompt: ` written to stdout and
/// is read line by line.
#[derive(Default)]
pub struct TerminalInput;

impl LineSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        if !io::stdin().is_terminal() {
            let line = read_prompted(&mut io::stdin().lock(), &mut io::stdout(), prompt)?;
            return Ok(line);
        }
        // `Input` renders the prompt followed by ": ".
        match Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => Ok(Some(line)),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Write `prompt: ` to `out`, then read one line from `input` without its
/// line ending. `None` at end of input.
fn read_prompted(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}: ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Asks for login details on the terminal. The secret is read with
/// `Password`, which hides input.
#[derive(Default)]
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn identifier(&mut self) -> Result<String> {
        let email: String = Input::new()
            .with_prompt("Email used to login")
            .interact_text()?;
        Ok(email)
    }

    fn secret(&mut self) -> Result<String> {
        let password = Password::new().with_prompt("Password").interact()?;
        Ok(password)
    }
}

/// Run `work` while a spinner line with `message` is shown. The spinner is
/// cleared before returning so it never mixes with printed output. When
/// stderr is not a terminal nothing is drawn.
pub fn with_spinner<T>(message: &str, work: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    // Drawn once; a steady tick would need a background thread.
    spinner.tick();
    let result = work();
    spinner.finish_and_clear();
    result
}
