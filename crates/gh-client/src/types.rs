//! GitHub API data transfer objects
//!
//! These types represent the notification data returned from the GitHub API.
//! They are intentionally separate from octocrab's models so callers (and
//! tests) never have to construct octocrab types by hand.

use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Identifier of a notification thread
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThreadId(pub String);

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThreadId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Kind of subject a notification thread is about
///
/// GitHub reports this as a free-form type tag (`PullRequest`, `Issue`,
/// `Commit`, `Release`, ...). Only pull requests and issues have a
/// resolvable lifecycle state, every other tag is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    PullRequest,
    Issue,
    Other(String),
}

impl SubjectKind {
    /// The raw type tag as used by the GitHub API
    pub fn as_str(&self) -> &str {
        match self {
            SubjectKind::PullRequest => "PullRequest",
            SubjectKind::Issue => "Issue",
            SubjectKind::Other(tag) => tag,
        }
    }
}

impl FromStr for SubjectKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "PullRequest" => SubjectKind::PullRequest,
            "Issue" => SubjectKind::Issue,
            other => SubjectKind::Other(other.to_string()),
        })
    }
}

impl From<&str> for SubjectKind {
    fn from(tag: &str) -> Self {
        match tag.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The discussion subject a notification refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Human readable title (PR or issue title)
    pub title: String,

    /// Subject type tag
    pub kind: SubjectKind,

    /// API URL of the subject's detail resource
    ///
    /// GitHub omits this for some subject kinds (e.g. discussions).
    pub url: Option<String>,
}

/// A notification thread from the GitHub API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Thread identifier
    pub id: ThreadId,

    /// Whether the thread has unread activity
    pub unread: bool,

    /// Subscription reason (e.g. "author", "review_requested", "mention")
    pub reason: String,

    /// Full name of the owning repository (e.g. "rust-lang/rust")
    pub repository: String,

    /// What the thread is about
    pub subject: Subject,
}

/// Lifecycle state shared by issues and pull requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// The part of a pull request resource needed to resolve its state
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestDetail {
    pub state: IssueState,

    /// Set once the pull request has been merged (state is then `closed`)
    #[serde(default)]
    pub merged: bool,
}

/// The part of an issue resource needed to resolve its state
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueDetail {
    pub state: IssueState,
}

/// Parameters for listing notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationQuery {
    /// Also return notifications already marked as read
    pub include_read: bool,

    /// Restrict the listing to one repository (`owner/name`)
    pub repository: Option<String>,

    /// Page size requested from the API
    pub per_page: u8,

    /// Follow pagination until the last page instead of stopping after the first
    pub all_pages: bool,
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self {
            include_read: false,
            repository: None,
            per_page: 50,
            all_pages: true,
        }
    }
}

impl NotificationQuery {
    /// Split the repository filter into owner and name
    ///
    /// Returns `None` when no repository is set or it is not of the form
    /// `owner/name`.
    pub fn repository_parts(&self) -> Option<(&str, &str)> {
        let (owner, name) = self.repository.as_deref()?.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some((owner, name))
    }
}
