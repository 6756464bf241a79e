//! In-memory `NotificationClient` for tests

use async_trait::async_trait;
use gh_client::{
    IssueDetail, IssueState, Notification, NotificationClient, NotificationQuery,
    PullRequestDetail, Subject, SubjectKind, ThreadId,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Remote call recorded by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListNotifications { include_read: bool },
    FetchPullRequest(String),
    FetchIssue(String),
    MarkThreadRead(ThreadId),
    DeleteThreadSubscription(ThreadId),
}

#[derive(Debug, Clone, Default)]
pub struct MockClient {
    notifications: Vec<Notification>,
    pull_requests: HashMap<String, PullRequestDetail>,
    issues: HashMap<String, IssueDetail>,
    fail_listing: bool,
    fail_mark_read: HashSet<ThreadId>,
    unsubscribed: Arc<Mutex<HashSet<ThreadId>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockClient {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            ..Default::default()
        }
    }

    pub fn with_pull_request(mut self, n: &Notification, state: IssueState, merged: bool) -> Self {
        let url = n.subject.url.clone().unwrap_or_default();
        self.pull_requests
            .insert(url, PullRequestDetail { state, merged });
        self
    }

    pub fn with_issue(mut self, n: &Notification, state: IssueState) -> Self {
        let url = n.subject.url.clone().unwrap_or_default();
        self.issues.insert(url, IssueDetail { state });
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_mark_read(mut self, id: &str) -> Self {
        self.fail_mark_read.insert(ThreadId::from(id));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that change remote state
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::MarkThreadRead(_) | Call::DeleteThreadSubscription(_)
                )
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl NotificationClient for MockClient {
    async fn list_notifications(
        &self,
        query: &NotificationQuery,
    ) -> anyhow::Result<Vec<Notification>> {
        self.record(Call::ListNotifications {
            include_read: query.include_read,
        });
        if self.fail_listing {
            anyhow::bail!("502 Bad Gateway");
        }
        Ok(self
            .notifications
            .iter()
            .filter(|n| query.include_read || n.unread)
            .cloned()
            .collect())
    }

    async fn fetch_pull_request(&self, url: &str) -> anyhow::Result<PullRequestDetail> {
        self.record(Call::FetchPullRequest(url.to_string()));
        self.pull_requests
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404 Not Found"))
    }

    async fn fetch_issue(&self, url: &str) -> anyhow::Result<IssueDetail> {
        self.record(Call::FetchIssue(url.to_string()));
        self.issues
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404 Not Found"))
    }

    async fn mark_thread_read(&self, thread_id: &ThreadId) -> anyhow::Result<()> {
        self.record(Call::MarkThreadRead(thread_id.clone()));
        if self.fail_mark_read.contains(thread_id) {
            anyhow::bail!("403 Forbidden");
        }
        Ok(())
    }

    async fn delete_thread_subscription(&self, thread_id: &ThreadId) -> anyhow::Result<()> {
        self.record(Call::DeleteThreadSubscription(thread_id.clone()));
        if !self.unsubscribed.lock().unwrap().insert(thread_id.clone()) {
            anyhow::bail!("404 Not Found");
        }
        Ok(())
    }
}

fn notification(id: &str, repo: &str, title: &str, kind: SubjectKind, path: &str) -> Notification {
    Notification {
        id: ThreadId::from(id),
        unread: false,
        reason: "author".to_string(),
        repository: repo.to_string(),
        subject: Subject {
            title: title.to_string(),
            kind,
            url: Some(format!("https://api.github.com/repos/{}/{}/{}", repo, path, id)),
        },
    }
}

/// A read pull request notification
pub fn pull_request(id: &str, repo: &str, title: &str) -> Notification {
    notification(id, repo, title, SubjectKind::PullRequest, "pulls")
}

/// A read issue notification
pub fn issue(id: &str, repo: &str, title: &str) -> Notification {
    notification(id, repo, title, SubjectKind::Issue, "issues")
}
