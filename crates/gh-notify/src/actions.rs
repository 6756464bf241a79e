//! What to do with matching notifications
//!
//! `ListAction` only reports, `UnsubscribeAction` changes remote state.
//! Both write their report lines to any `Write` sink (stdout in the binary).

use crate::error::{NotifyError, Result};
use crate::filter::{FilterConfig, NotificationAction};
use crate::resolver::resolve_subject_state;
use async_trait::async_trait;
use gh_client::{Notification, NotificationClient};
use log::debug;
use std::io::Write;

/// Prints title and subject state of each notification
pub struct ListAction<W> {
    out: W,
    title_width: usize,
}

impl<W: Write + Send> ListAction<W> {
    pub fn new(out: W, title_width: usize) -> Self {
        Self { out, title_width }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: Write + Send> NotificationAction for ListAction<W> {
    async fn apply(
        &mut self,
        client: &dyn NotificationClient,
        filters: &FilterConfig,
        notification: &Notification,
    ) -> Result<()> {
        // the pipeline already checked the state when a filter is set
        let state = match filters.subject_state {
            Some(state) => state,
            None => resolve_subject_state(client, notification).await?,
        };

        writeln!(
            self.out,
            "{:<width$} {}",
            notification.subject.title,
            state,
            width = self.title_width
        )?;
        Ok(())
    }
}

/// Unsubscribes from each notification thread
///
/// Unread threads are skipped unless `unsubscribe_unread` is set, in which
/// case they are marked as read before the subscription is deleted.
pub struct UnsubscribeAction<W> {
    out: W,
}

impl<W: Write + Send> UnsubscribeAction<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: Write + Send> NotificationAction for UnsubscribeAction<W> {
    async fn apply(
        &mut self,
        client: &dyn NotificationClient,
        filters: &FilterConfig,
        notification: &Notification,
    ) -> Result<()> {
        let thread = &notification.id;

        if notification.unread {
            if !filters.unsubscribe_unread {
                debug!("Skipping unread thread {}", thread);
                return Ok(());
            }
            client
                .mark_thread_read(thread)
                .await
                .map_err(|source| NotifyError::MarkRead {
                    thread: thread.clone(),
                    source,
                })?;
        }

        client
            .delete_thread_subscription(thread)
            .await
            .map_err(|source| NotifyError::Unsubscribe {
                thread: thread.clone(),
                source,
            })?;

        let subject = &notification.subject;
        writeln!(
            self.out,
            "✅  {} (thread {}, reason was {:?}, {})",
            subject.title,
            thread,
            notification.reason,
            subject.url.as_deref().unwrap_or_default()
        )?;
        Ok(())
    }
}
