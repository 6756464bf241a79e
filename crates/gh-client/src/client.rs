//! GitHub notification client trait
//!
//! This module defines the core `NotificationClient` trait that all client
//! implementations must satisfy.

use crate::types::{IssueDetail, Notification, NotificationQuery, PullRequestDetail, ThreadId};
use async_trait::async_trait;

/// GitHub notification API client trait
///
/// Defines the interface for reading and managing notification threads.
/// Implementations can be direct (hitting the API) or in-memory fakes
/// for tests.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{NotificationClient, NotificationQuery};
///
/// async fn unread(client: &dyn NotificationClient) -> anyhow::Result<usize> {
///     let notifications = client.list_notifications(&NotificationQuery::default()).await?;
///     Ok(notifications.iter().filter(|n| n.unread).count())
/// }
/// ```
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// List notification threads for the authenticated user
    ///
    /// # Arguments
    ///
    /// * `query` - Read/unread selection, repository scope and paging
    ///
    /// # Returns
    ///
    /// The notifications in the order the API returned them.
    async fn list_notifications(
        &self,
        query: &NotificationQuery,
    ) -> anyhow::Result<Vec<Notification>>;

    /// Fetch the pull request resource behind a notification subject
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute API URL taken from the notification subject
    async fn fetch_pull_request(&self, url: &str) -> anyhow::Result<PullRequestDetail>;

    /// Fetch the issue resource behind a notification subject
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute API URL taken from the notification subject
    async fn fetch_issue(&self, url: &str) -> anyhow::Result<IssueDetail>;

    /// Mark a notification thread as read
    async fn mark_thread_read(&self, thread_id: &ThreadId) -> anyhow::Result<()>;

    /// Delete the subscription to a notification thread
    ///
    /// The thread stops producing notifications until the user
    /// participates in it again.
    async fn delete_thread_subscription(&self, thread_id: &ThreadId) -> anyhow::Result<()>;
}
