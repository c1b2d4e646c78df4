// Command-line arguments.

use clap::Parser;

use crate::session::Credentials;

/// Interactive console for Mastodon.
#[derive(Parser, Debug)]
#[command(name = "tootstream", version, about)]
pub struct Cli {
    /// Account email; with --password, forces a fresh login
    #[arg(long)]
    pub email: Option<String>,

    /// Account password; with --email, forces a fresh login
    #[arg(long)]
    pub password: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Login details, only when both halves were given.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some(Credentials {
                identifier: email.clone(),
                secret: password.clone(),
            }),
            _ => None,
        }
    }
}
