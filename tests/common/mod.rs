#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tootstream::api::MastodonApi;
use tootstream::error::{ApiError, ApiResult};
use tootstream::model::{Account, Notification, Status};
use tootstream::repl::LineSource;
use tootstream::session::CredentialPrompt;

/// What the fake instance holds and what it has been asked to do.
#[derive(Default)]
pub struct FakeState {
    pub username: String,
    pub token_valid: bool,
    pub login_fails: bool,
    pub remote_fails: bool,
    pub home: Vec<Status>,
    pub public: Vec<Status>,
    pub notifications: Vec<Notification>,
    pub posted: Vec<String>,
    pub logins: Vec<(String, String)>,
    pub verify_calls: usize,
}

/// In-memory `MastodonApi`. Clones share state, so a test can keep one
/// handle while the session owns the other.
#[derive(Clone, Default)]
pub struct FakeClient {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeClient {
    pub fn new(username: &str) -> Self {
        let client = FakeClient::default();
        {
            let mut state = client.state.borrow_mut();
            state.username = username.to_string();
            state.token_valid = true;
        }
        client
    }

    fn unavailable() -> ApiError {
        ApiError::Status {
            status: 503,
            body: "instance unavailable".into(),
        }
    }
}

impl MastodonApi for FakeClient {
    fn verify_credentials(&self) -> ApiResult<Account> {
        let mut state = self.state.borrow_mut();
        state.verify_calls += 1;
        if !state.token_valid {
            return Err(ApiError::Status {
                status: 401,
                body: "The access token is invalid".into(),
            });
        }
        Ok(account(&state.username))
    }

    fn post_status(&self, text: &str) -> ApiResult<Status> {
        let mut state = self.state.borrow_mut();
        if state.remote_fails {
            return Err(Self::unavailable());
        }
        state.posted.push(text.to_string());
        Ok(status("100", text))
    }

    fn home_timeline(&self) -> ApiResult<Vec<Status>> {
        let state = self.state.borrow();
        if state.remote_fails {
            return Err(Self::unavailable());
        }
        Ok(state.home.clone())
    }

    fn public_timeline(&self) -> ApiResult<Vec<Status>> {
        let state = self.state.borrow();
        if state.remote_fails {
            return Err(Self::unavailable());
        }
        Ok(state.public.clone())
    }

    fn notifications(&self) -> ApiResult<Vec<Notification>> {
        let state = self.state.borrow();
        if state.remote_fails {
            return Err(Self::unavailable());
        }
        Ok(state.notifications.clone())
    }

    fn log_in(&mut self, identifier: &str, secret: &str) -> ApiResult<String> {
        let mut state = self.state.borrow_mut();
        state
            .logins
            .push((identifier.to_string(), secret.to_string()));
        if state.login_fails {
            return Err(ApiError::Status {
                status: 400,
                body: "invalid_grant".into(),
            });
        }
        state.token_valid = true;
        Ok(format!("token-for-{identifier}"))
    }
}

pub fn account(username: &str) -> Account {
    Account {
        id: "1".into(),
        username: username.into(),
        display_name: format!("{username} display"),
        url: format!("https://mastodon.social/@{username}"),
        note: "<p>Just <b>testing</b></p>".into(),
    }
}

pub fn status(id: &str, content: &str) -> Status {
    Status {
        id: id.into(),
        created_at: "2017-04-02T08:00:00.000Z".into(),
        account: account("bob"),
        content: content.into(),
        reblogs_count: 1,
        favourites_count: 2,
        reblog: None,
    }
}

/// Input lines fed to the loop in order, then end of input.
pub struct Script {
    lines: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl Script {
    pub fn new(lines: &[&str]) -> Self {
        Script {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for Script {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

/// Answers login prompts with fixed values and counts how often it was asked.
pub struct FixedPrompt {
    pub identifier: String,
    pub secret: String,
    pub asked: usize,
}

impl FixedPrompt {
    pub fn new(identifier: &str, secret: &str) -> Self {
        FixedPrompt {
            identifier: identifier.into(),
            secret: secret.into(),
            asked: 0,
        }
    }
}

impl CredentialPrompt for FixedPrompt {
    fn identifier(&mut self) -> anyhow::Result<String> {
        self.asked += 1;
        Ok(self.identifier.clone())
    }

    fn secret(&mut self) -> anyhow::Result<String> {
        Ok(self.secret.clone())
    }
}
