//! Subject state resolution
//!
//! Notifications only carry a link to their subject. The lifecycle state
//! has to be looked up with one extra request per notification.

use crate::error::{NotifyError, Result};
use gh_client::{IssueState, Notification, NotificationClient, SubjectKind};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Normalized lifecycle state of a notification subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectState {
    Open,
    Closed,
    /// Only pull requests can be merged
    Merged,
}

impl SubjectState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectState::Open => "open",
            SubjectState::Closed => "closed",
            SubjectState::Merged => "merged",
        }
    }
}

impl fmt::Display for SubjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "open" => Ok(SubjectState::Open),
            "closed" => Ok(SubjectState::Closed),
            "merged" => Ok(SubjectState::Merged),
            other => Err(format!(
                "unknown state '{}', supported options: open, closed and merged",
                other
            )),
        }
    }
}

impl From<IssueState> for SubjectState {
    fn from(state: IssueState) -> Self {
        match state {
            IssueState::Open => SubjectState::Open,
            IssueState::Closed => SubjectState::Closed,
        }
    }
}

/// Look up the current state of the notification's subject
///
/// Pull requests that have been merged resolve to `Merged` even though
/// GitHub reports them as `closed`. Subjects other than pull requests and
/// issues have no state and fail with `UnsupportedSubjectType`.
pub async fn resolve_subject_state(
    client: &dyn NotificationClient,
    notification: &Notification,
) -> Result<SubjectState> {
    let state = match &notification.subject.kind {
        SubjectKind::PullRequest => {
            let url = detail_url(notification)?;
            let pr = client
                .fetch_pull_request(url)
                .await
                .map_err(|source| NotifyError::DetailFetch {
                    kind: SubjectKind::PullRequest,
                    source,
                })?;
            if pr.merged {
                SubjectState::Merged
            } else {
                pr.state.into()
            }
        }
        SubjectKind::Issue => {
            let url = detail_url(notification)?;
            let issue = client
                .fetch_issue(url)
                .await
                .map_err(|source| NotifyError::DetailFetch {
                    kind: SubjectKind::Issue,
                    source,
                })?;
            issue.state.into()
        }
        other => return Err(NotifyError::UnsupportedSubjectType(other.clone())),
    };

    debug!("Thread {} resolved to {}", notification.id, state);
    Ok(state)
}

fn detail_url(notification: &Notification) -> Result<&str> {
    let subject = &notification.subject;
    subject.url.as_deref().ok_or_else(|| NotifyError::DetailFetch {
        kind: subject.kind.clone(),
        source: anyhow::anyhow!("subject '{}' has no detail URL", subject.title),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{issue, pull_request, Call, MockClient};

    #[test]
    fn test_subject_state_parse() {
        assert_eq!("open".parse::<SubjectState>(), Ok(SubjectState::Open));
        assert_eq!("closed".parse::<SubjectState>(), Ok(SubjectState::Closed));
        assert_eq!("merged".parse::<SubjectState>(), Ok(SubjectState::Merged));
        assert!("Merged".parse::<SubjectState>().is_err());
        assert!("draft".parse::<SubjectState>().is_err());
    }

    #[tokio::test]
    async fn test_merged_pull_request_resolves_to_merged() {
        let n = pull_request("1", "a/b", "Fix bug");
        let client = MockClient::new(vec![n.clone()])
            .with_pull_request(&n, IssueState::Closed, true);

        let state = resolve_subject_state(&client, &n).await.unwrap();
        assert_eq!(state, SubjectState::Merged);
        assert_eq!(
            client.calls(),
            vec![Call::FetchPullRequest(n.subject.url.clone().unwrap())]
        );
    }

    #[tokio::test]
    async fn test_closed_unmerged_pull_request_resolves_to_closed() {
        let n = pull_request("1", "a/b", "Abandoned");
        let client = MockClient::new(vec![n.clone()])
            .with_pull_request(&n, IssueState::Closed, false);

        let state = resolve_subject_state(&client, &n).await.unwrap();
        assert_eq!(state, SubjectState::Closed);
    }

    #[tokio::test]
    async fn test_issue_resolves_to_its_state() {
        let n = issue("2", "a/b", "Crash on start");
        let client = MockClient::new(vec![n.clone()]).with_issue(&n, IssueState::Open);

        let state = resolve_subject_state(&client, &n).await.unwrap();
        assert_eq!(state, SubjectState::Open);
        assert_eq!(
            client.calls(),
            vec![Call::FetchIssue(n.subject.url.clone().unwrap())]
        );
    }

    #[tokio::test]
    async fn test_unsupported_subject_type_makes_no_request() {
        let mut n = issue("3", "a/b", "v1.0.0");
        n.subject.kind = SubjectKind::from("Release");
        let client = MockClient::new(vec![n.clone()]);

        let err = resolve_subject_state(&client, &n).await.unwrap_err();
        assert!(matches!(
            err,
            NotifyError::UnsupportedSubjectType(SubjectKind::Other(ref tag)) if tag == "Release"
        ));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_detail_fetch_error() {
        let n = pull_request("4", "a/b", "Gone");
        // no detail registered, the mock answers with 404
        let client = MockClient::new(vec![n.clone()]);

        let err = resolve_subject_state(&client, &n).await.unwrap_err();
        assert!(matches!(
            err,
            NotifyError::DetailFetch {
                kind: SubjectKind::PullRequest,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_detail_url_is_detail_fetch_error() {
        let mut n = issue("5", "a/b", "No link");
        n.subject.url = None;
        let client = MockClient::new(vec![n.clone()]);

        let err = resolve_subject_state(&client, &n).await.unwrap_err();
        assert!(matches!(err, NotifyError::DetailFetch { .. }));
        assert!(client.calls().is_empty());
    }
}
