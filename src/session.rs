// Session bootstrap: make sure the app is registered and the user holds a
// working access token before the console starts taking commands.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::{AppRegistration, MastodonApi};
use crate::config::Config;
use crate::ui::with_spinner;

/// The authenticated binding between the local user and the instance.
/// Built once at startup and held until the process exits.
pub struct Session {
    client: Box<dyn MastodonApi>,
    username: String,
}

impl Session {
    pub fn new(client: Box<dyn MastodonApi>, username: impl Into<String>) -> Self {
        Session {
            client,
            username: username.into(),
        }
    }

    pub fn client(&self) -> &dyn MastodonApi {
        self.client.as_ref()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Prompt label shown before each input line.
    pub fn prompt(&self) -> String {
        format!("[@{}]", self.username)
    }
}

/// Identifier and secret supplied up front, e.g. on the command line.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

/// Interactive source of login details.
pub trait CredentialPrompt {
    fn identifier(&mut self) -> Result<String>;
    /// Must not echo what is typed.
    fn secret(&mut self) -> Result<String>;
}

/// Load the stored app registration, registering with the instance first
/// if there is none. Creates the configuration directory as needed.
pub fn ensure_app_registered<F>(config: &Config, register: F) -> Result<AppRegistration>
where
    F: FnOnce(&str) -> Result<AppRegistration>,
{
    config.ensure_dir()?;
    if let Some(app) = config.load_app()? {
        debug!(path = %config.app_path().display(), "using stored app registration");
        return Ok(app);
    }
    info!(instance = config.api_base_url(), "registering application");
    let app = with_spinner("Registering application...", || register(config.api_base_url()))
        .context("Failed to register application")?;
    config.save_app(&app)?;
    Ok(app)
}

/// Authenticate `client` and open the session.
///
/// With `credentials`, always logs in. Otherwise reuses the stored token
/// when it still verifies, and falls back to prompting. A failed login is
/// returned as an error; there is no retry.
pub fn start(
    config: &Config,
    mut client: Box<dyn MastodonApi>,
    credentials: Option<Credentials>,
    prompt: &mut dyn CredentialPrompt,
) -> Result<Session> {
    match credentials {
        Some(creds) => log_in(config, client.as_mut(), &creds)?,
        None if !authenticated(config, client.as_ref()) => {
            let creds = Credentials {
                identifier: prompt.identifier()?,
                secret: prompt.secret()?,
            };
            log_in(config, client.as_mut(), &creds)?;
        }
        None => debug!("stored access token is valid"),
    }

    let account = with_spinner("Loading account...", || client.own_account())
        .context("Failed to load own account")?;
    info!(username = %account.username, "session started");
    Ok(Session::new(client, account.username))
}

/// A token file exists and the instance accepts it.
fn authenticated(config: &Config, client: &dyn MastodonApi) -> bool {
    if !config.token_path().is_file() {
        debug!("no stored access token");
        return false;
    }
    match client.verify_credentials() {
        Ok(_) => true,
        Err(err) => {
            warn!(error = %err, "stored access token rejected");
            false
        }
    }
}

fn log_in(config: &Config, client: &mut dyn MastodonApi, creds: &Credentials) -> Result<()> {
    info!(identifier = %creds.identifier, "logging in");
    let token = with_spinner("Logging in...", || {
        client.log_in(&creds.identifier, &creds.secret)
    })
    .context("Login failed")?;
    config.save_token(&token)
}
