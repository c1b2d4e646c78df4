// Remote entities returned by a Mastodon instance. Only the fields the
// console renders are declared; serde ignores the rest of each payload.

use serde::Deserialize;

/// An account as returned by `/api/v1/accounts/*` and embedded in
/// statuses and notifications.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    /// Local handle, rendered as `@username`.
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub url: String,
    /// Profile bio. Carries HTML markup.
    #[serde(default)]
    pub note: String,
}

/// A single toot. For a pure reblog the outer `content` is usually empty
/// and the text lives in `reblog`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Status {
    pub id: String,
    pub created_at: String,
    pub account: Account,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub reblogs_count: u64,
    #[serde(default)]
    pub favourites_count: u64,
    #[serde(default)]
    pub reblog: Option<Box<Status>>,
}

impl Status {
    /// The status whose text should be shown: the reblogged one if any.
    pub fn shown(&self) -> &Status {
        self.reblog.as_deref().unwrap_or(self)
    }
}

/// A notification, tagged by the `type` field of the payload.
///
/// `Follow` carries no status, so rendering a follow can never reach for
/// one. The other kinds normally carry one, but a deleted status comes
/// back as `null`. Kinds this console doesn't know about land in `Other`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Notification {
    Mention {
        account: Account,
        #[serde(default)]
        status: Option<Status>,
    },
    Favourite {
        account: Account,
        #[serde(default)]
        status: Option<Status>,
    },
    Reblog {
        account: Account,
        #[serde(default)]
        status: Option<Status>,
    },
    Follow {
        account: Account,
    },
    #[serde(other)]
    Other,
}
