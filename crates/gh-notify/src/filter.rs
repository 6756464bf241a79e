//! Notification filter pipeline
//!
//! Lists notifications once, drops everything that does not match the
//! configured filters and hands the survivors to an action, one at a time
//! and in listing order. The first error stops the run, so notifications
//! after the failing one are left untouched.

use crate::error::{NotifyError, Result};
use crate::resolver::{resolve_subject_state, SubjectState};
use async_trait::async_trait;
use gh_client::{Notification, NotificationClient, NotificationQuery, SubjectKind};
use log::{debug, info};

/// Which notifications a command acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Exact repository full name, None = any repository
    pub repository: Option<String>,

    /// Subject type notifications must have
    pub subject_kind: SubjectKind,

    /// Resolved subject state notifications must have, None = any state
    pub subject_state: Option<SubjectState>,

    /// List notifications already marked as read
    pub include_read: bool,

    /// Allow unsubscribing from unread threads (marks them read first)
    pub unsubscribe_unread: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            repository: None,
            subject_kind: SubjectKind::PullRequest,
            subject_state: None,
            include_read: false,
            unsubscribe_unread: false,
        }
    }
}

/// Listing page settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub per_page: u8,
    pub all_pages: bool,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            per_page: 50,
            all_pages: true,
        }
    }
}

impl FilterConfig {
    /// The listing request matching these filters
    pub fn query(&self, paging: Paging) -> NotificationQuery {
        NotificationQuery {
            include_read: self.include_read,
            repository: self.repository.clone(),
            per_page: paging.per_page,
            all_pages: paging.all_pages,
        }
    }

    /// Cheap checks that need no extra request
    fn matches_structure(&self, notification: &Notification) -> bool {
        if notification.subject.kind != self.subject_kind {
            return false;
        }

        match &self.repository {
            Some(repo) => *repo == notification.repository,
            None => true,
        }
    }
}

/// Something to do with every notification that passes the filters
#[async_trait]
pub trait NotificationAction: Send {
    async fn apply(
        &mut self,
        client: &dyn NotificationClient,
        filters: &FilterConfig,
        notification: &Notification,
    ) -> Result<()>;
}

/// Run `action` on every listed notification that passes all filters
///
/// The subject state is only looked up when a state filter is set.
/// Returns the first resolver or action error.
pub async fn for_each_notification(
    client: &dyn NotificationClient,
    filters: &FilterConfig,
    paging: Paging,
    action: &mut dyn NotificationAction,
) -> Result<()> {
    let notifications = client
        .list_notifications(&filters.query(paging))
        .await
        .map_err(NotifyError::ListingFetch)?;

    let total = notifications.len();
    let mut matched = 0usize;

    for notification in &notifications {
        if !filters.matches_structure(notification) {
            continue;
        }

        if let Some(wanted) = filters.subject_state {
            let state = resolve_subject_state(client, notification).await?;
            if state != wanted {
                debug!(
                    "Skipping thread {}: state {} does not match {}",
                    notification.id, state, wanted
                );
                continue;
            }
        }

        action.apply(client, filters, notification).await?;
        matched += 1;
    }

    info!("Processed {} of {} notifications", matched, total);
    Ok(())
}
