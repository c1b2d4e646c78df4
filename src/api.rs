// API client module: the `MastodonApi` capability the console depends on,
// and a small blocking HTTP client implementing it against a Mastodon
// instance. It is synchronous on purpose: the console runs one command at
// a time and waits for every remote call to finish.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::model::{Account, Notification, Status};

/// Name the application registers itself under.
pub const CLIENT_NAME: &str = "tootstream";
/// Scopes requested at registration and login.
pub const SCOPES: &str = "read write follow";
/// Out-of-band redirect; the console never runs a browser flow.
const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// The remote operations the console needs. Request and response schemas
/// belong to the implementation.
pub trait MastodonApi {
    /// Check the current access token and return the account it belongs to.
    fn verify_credentials(&self) -> ApiResult<Account>;

    /// The authenticated user's own account.
    fn own_account(&self) -> ApiResult<Account> {
        self.verify_credentials()
    }

    /// Publish a new status with the given text.
    fn post_status(&self, text: &str) -> ApiResult<Status>;

    /// Home timeline, newest first.
    fn home_timeline(&self) -> ApiResult<Vec<Status>>;

    /// Public timeline, newest first.
    fn public_timeline(&self) -> ApiResult<Vec<Status>>;

    /// Notifications, newest first.
    fn notifications(&self) -> ApiResult<Vec<Notification>>;

    /// Exchange an account identifier and secret for an access token. The
    /// client keeps using the new token and returns it for persistence.
    fn log_in(&mut self, identifier: &str, secret: &str) -> ApiResult<String>;
}

/// Registration artifact for this application on one instance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppRegistration {
    pub client_id: String,
    pub client_secret: String,
    pub api_base_url: String,
}

/// Shape of `POST /api/v1/apps` responses we care about.
#[derive(Deserialize)]
struct RegisteredApp {
    client_id: String,
    client_secret: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Some failures come back as `{"error": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking client for one instance. Holds the reqwest client, the app
/// registration and the access token once there is one.
#[derive(Clone)]
pub struct MastodonClient {
    client: Client,
    app: AppRegistration,
    token: Option<String>,
}

impl MastodonClient {
    /// Build a client from a stored registration and an optional token.
    pub fn new(app: AppRegistration, token: Option<String>) -> Result<Self> {
        let client = http_client()?;
        Ok(MastodonClient { client, app, token })
    }

    /// Register this application with the instance at `base_url`.
    pub fn register_app(base_url: &str) -> Result<AppRegistration> {
        let base_url = base_url.trim_end_matches('/');
        let url = format!("{}/api/v1/apps", base_url);
        debug!(%url, "registering application");
        let res = http_client()?
            .post(&url)
            .form(&[
                ("client_name", CLIENT_NAME),
                ("redirect_uris", REDIRECT_URI),
                ("scopes", SCOPES),
            ])
            .send()
            .context("Failed to send app registration request")?;
        let app: RegisteredApp = read_json(res).context("App registration failed")?;
        Ok(AppRegistration {
            client_id: app.client_id,
            client_secret: app.client_secret,
            api_base_url: base_url.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", &self.app.api_base_url, path)
    }

    /// Attach the bearer token, or fail before touching the network.
    fn authorized(&self, req: RequestBuilder) -> ApiResult<RequestBuilder> {
        match &self.token {
            Some(token) => Ok(req.bearer_auth(token)),
            None => Err(ApiError::NotAuthenticated),
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(path, "GET");
        let req = self.authorized(self.client.get(self.url(path)))?;
        read_json(req.send()?)
    }
}

impl MastodonApi for MastodonClient {
    fn verify_credentials(&self) -> ApiResult<Account> {
        self.get("/api/v1/accounts/verify_credentials")
    }

    fn post_status(&self, text: &str) -> ApiResult<Status> {
        debug!("POST /api/v1/statuses");
        let req = self.authorized(self.client.post(self.url("/api/v1/statuses")))?;
        read_json(req.form(&[("status", text)]).send()?)
    }

    fn home_timeline(&self) -> ApiResult<Vec<Status>> {
        self.get("/api/v1/timelines/home")
    }

    fn public_timeline(&self) -> ApiResult<Vec<Status>> {
        self.get("/api/v1/timelines/public")
    }

    fn notifications(&self) -> ApiResult<Vec<Notification>> {
        self.get("/api/v1/notifications")
    }

    fn log_in(&mut self, identifier: &str, secret: &str) -> ApiResult<String> {
        debug!(identifier, "requesting access token");
        let res = self
            .client
            .post(self.url("/oauth/token"))
            .form(&[
                ("grant_type", "password"),
                ("client_id", self.app.client_id.as_str()),
                ("client_secret", self.app.client_secret.as_str()),
                ("username", identifier),
                ("password", secret),
                ("scope", SCOPES),
            ])
            .send()?;
        let token: TokenResponse = read_json(res)?;
        self.token = Some(token.access_token.clone());
        Ok(token.access_token)
    }
}

fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("tootstream/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Turn a response into `T`.
fn read_json<T: DeserializeOwned>(res: reqwest::blocking::Response) -> ApiResult<T> {
    let status = res.status().as_u16();
    let body = res.text()?;
    parse_response(status, &body)
}

/// Map failure statuses and `error` bodies to `ApiError::Status`, decode
/// anything else as `T`.
fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            status,
            body: body.to_string(),
        });
    }
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
        return Err(ApiError::Status {
            status,
            body: error,
        });
    }
    Ok(serde_json::from_str(body)?)
}
