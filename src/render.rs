// Turns remote entities into display lines. Nothing here prints; callers
// write the returned lines wherever they like.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::{Account, Notification, Status};

const INDENT: &str = "  ";

/// A tag is `<`, then at least one non-`<` character, then `>`.
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<]+?>").expect("markup pattern is valid"));

/// Remove markup tags in a single pass. Entities and broken tags are left
/// alone; this is not an HTML parser.
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}

fn actor(account: &Account) -> String {
    format!("{} @{}", account.display_name, account.username)
}

fn body(status: &Status) -> String {
    format!("{INDENT}{}", strip_markup(&status.shown().content))
}

/// Header, stats and body of one status, followed by a blank line.
pub fn status_lines(status: &Status) -> Vec<String> {
    vec![
        format!("{INDENT}{} {}", actor(&status.account), status.created_at),
        format!(
            "{INDENT}♺:{} ♥:{} id:{}",
            status.reblogs_count, status.favourites_count, status.id
        ),
        body(status),
        String::new(),
    ]
}

/// Lines for one notification, followed by a blank line. A status that
/// didn't come with the notification contributes no lines.
pub fn notification_lines(note: &Notification) -> Vec<String> {
    let mut lines = match note {
        Notification::Mention { account, status } => {
            let mut lines = vec![format!("{INDENT}{}", actor(account))];
            lines.extend(status.as_ref().map(body));
            lines
        }
        Notification::Favourite { account, status } => {
            let mut lines = vec![format!("{INDENT}{} favorited your status:", actor(account))];
            if let Some(status) = status {
                lines.push(format!(
                    "{INDENT}♺:{} ♥:{} {}",
                    status.reblogs_count, status.favourites_count, status.created_at
                ));
                lines.push(body(status));
            }
            lines
        }
        Notification::Reblog { account, status } => {
            let mut lines = vec![format!("{INDENT}{} boosted your status:", actor(account))];
            lines.extend(status.as_ref().map(body));
            lines
        }
        Notification::Follow { account } => {
            vec![format!("{INDENT}{} followed you!", actor(account))]
        }
        Notification::Other => Vec::new(),
    };
    lines.push(String::new());
    lines
}

/// Profile summary used by `info`.
pub fn account_lines(account: &Account) -> Vec<String> {
    vec![
        format!("@{}", account.username),
        account.display_name.clone(),
        account.url.clone(),
        strip_markup(&account.note),
    ]
}

/// A timeline in reverse of the order given, so a newest-first fetch
/// prints with the newest toot last, just above the prompt.
pub fn timeline_lines(statuses: &[Status]) -> Vec<String> {
    statuses.iter().rev().flat_map(status_lines).collect()
}

/// Notifications, reversed like timelines.
pub fn notifications_lines(notes: &[Notification]) -> Vec<String> {
    notes.iter().rev().flat_map(notification_lines).collect()
}
