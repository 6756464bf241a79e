//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `NotificationClient` trait using the octocrab library.

use crate::client::NotificationClient;
use crate::types::{
    IssueDetail, Notification, NotificationQuery, PullRequestDetail, Subject, SubjectKind,
    ThreadId,
};
use anyhow::Context;
use async_trait::async_trait;
use log::{debug, warn};
use octocrab::models::{NotificationId, ThreadId as SubscriptionThreadId};
use octocrab::Octocrab;
use std::sync::Arc;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    async fn get_resource<T>(&self, url: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("GET {}", url);
        let resource: T = self.octocrab.get(url, None::<&()>).await?;
        Ok(resource)
    }
}

#[async_trait]
impl NotificationClient for OctocrabClient {
    async fn list_notifications(
        &self,
        query: &NotificationQuery,
    ) -> anyhow::Result<Vec<Notification>> {
        let scope = query.repository_parts();
        match scope {
            Some((owner, repo)) => debug!(
                "Listing notifications for {}/{} (include read: {})",
                owner, repo, query.include_read
            ),
            None => debug!("Listing notifications (include read: {})", query.include_read),
        }

        let mut notifications = Vec::new();
        let mut page_num = 1u8;

        loop {
            let handler = self.octocrab.activity().notifications();
            let request = match scope {
                Some((owner, repo)) => handler.list_for_repo(owner, repo),
                None => handler.list(),
            };

            let page = request
                .all(query.include_read)
                .per_page(query.per_page)
                .page(page_num)
                .send()
                .await?;

            let page_is_empty = page.items.is_empty();
            let has_next = page.next.is_some();
            debug!("Page {} returned {} notifications", page_num, page.items.len());

            notifications.extend(page.items.into_iter().map(convert_notification));

            match next_page(query, page_is_empty, has_next, page_num) {
                Some(next) => page_num = next,
                None => break,
            }
        }

        debug!("Fetched {} notifications", notifications.len());
        Ok(notifications)
    }

    async fn fetch_pull_request(&self, url: &str) -> anyhow::Result<PullRequestDetail> {
        self.get_resource(url).await
    }

    async fn fetch_issue(&self, url: &str) -> anyhow::Result<IssueDetail> {
        self.get_resource(url).await
    }

    async fn mark_thread_read(&self, thread_id: &ThreadId) -> anyhow::Result<()> {
        debug!("Marking thread {} as read", thread_id);
        self.octocrab
            .activity()
            .notifications()
            .mark_as_read(to_notification_id(thread_id)?)
            .await?;
        Ok(())
    }

    async fn delete_thread_subscription(&self, thread_id: &ThreadId) -> anyhow::Result<()> {
        debug!("Deleting subscription of thread {}", thread_id);
        self.octocrab
            .activity()
            .notifications()
            .delete_thread_subscription(to_subscription_thread_id(thread_id)?)
            .await?;
        Ok(())
    }
}

/// Convert octocrab Notification to our Notification type
fn convert_notification(notification: octocrab::models::activity::Notification) -> Notification {
    Notification {
        id: ThreadId(notification.id.0.to_string()),
        unread: notification.unread,
        reason: notification.reason,
        repository: notification
            .repository
            .full_name
            .unwrap_or(notification.repository.name),
        subject: Subject {
            title: notification.subject.title,
            kind: SubjectKind::from(notification.subject.r#type.as_str()),
            url: notification.subject.url.map(|u| u.to_string()),
        },
    }
}

/// Page to request after `page_num`, None once the listing is complete
fn next_page(
    query: &NotificationQuery,
    page_is_empty: bool,
    has_next: bool,
    page_num: u8,
) -> Option<u8> {
    if !query.all_pages || page_is_empty || !has_next {
        return None;
    }

    let next = page_num.checked_add(1);
    if next.is_none() {
        warn!("Stopping after {} pages of notifications", page_num);
    }
    next
}

/// Thread ids travel as strings, the notifications API wants them numeric
fn parse_thread_id(thread_id: &ThreadId) -> anyhow::Result<u64> {
    thread_id
        .0
        .parse::<u64>()
        .with_context(|| format!("Invalid thread id '{}'", thread_id))
}

fn to_notification_id(thread_id: &ThreadId) -> anyhow::Result<NotificationId> {
    Ok(NotificationId(parse_thread_id(thread_id)?))
}

/// The subscription endpoints use their own id type for the same number
fn to_subscription_thread_id(thread_id: &ThreadId) -> anyhow::Result<SubscriptionThreadId> {
    Ok(SubscriptionThreadId(parse_thread_id(thread_id)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_notification_id() {
        let id = to_notification_id(&ThreadId::from("1234567890")).unwrap();
        assert_eq!(id, NotificationId(1234567890));
    }

    #[test]
    fn test_to_notification_id_rejects_garbage() {
        let err = to_notification_id(&ThreadId::from("abc")).unwrap_err();
        assert!(err.to_string().contains("Invalid thread id 'abc'"));
    }

    #[test]
    fn test_to_subscription_thread_id() {
        let id = to_subscription_thread_id(&ThreadId::from("1234567890")).unwrap();
        assert_eq!(id, SubscriptionThreadId(1234567890));

        let err = to_subscription_thread_id(&ThreadId::from("12a")).unwrap_err();
        assert!(err.to_string().contains("Invalid thread id '12a'"));
    }

    fn query(all_pages: bool) -> NotificationQuery {
        NotificationQuery {
            all_pages,
            ..Default::default()
        }
    }

    #[test]
    fn test_next_page_follows_next_link() {
        assert_eq!(next_page(&query(true), false, true, 1), Some(2));
        assert_eq!(next_page(&query(true), false, true, 41), Some(42));
    }

    #[test]
    fn test_next_page_first_page_only() {
        assert_eq!(next_page(&query(false), false, true, 1), None);
    }

    #[test]
    fn test_next_page_stops_on_empty_page() {
        assert_eq!(next_page(&query(true), true, true, 3), None);
    }

    #[test]
    fn test_next_page_stops_without_next_link() {
        assert_eq!(next_page(&query(true), false, false, 3), None);
    }

    #[test]
    fn test_next_page_stops_at_page_limit() {
        assert_eq!(next_page(&query(true), false, true, 254), Some(255));
        assert_eq!(next_page(&query(true), false, true, u8::MAX), None);
    }
}
