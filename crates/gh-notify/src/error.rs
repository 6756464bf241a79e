//! Errors surfaced by the notification pipeline
//!
//! Every variant aborts the current run. Remote failures keep the
//! underlying cause so it is printed after the one-line context.

use gh_client::{SubjectKind, ThreadId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Please provide an API token using the {variable} env var.")]
    CredentialMissing { variable: String },

    #[error("failed to create GitHub client, {0:#}")]
    ClientSetup(#[source] anyhow::Error),

    #[error("failed to list notifications, {0:#}")]
    ListingFetch(#[source] anyhow::Error),

    #[error("failed to get {kind} details, {source:#}")]
    DetailFetch {
        kind: SubjectKind,
        #[source]
        source: anyhow::Error,
    },

    #[error("unhandled subject type \"{0}\"")]
    UnsupportedSubjectType(SubjectKind),

    #[error("failed to mark thread {thread} as read, {source:#}")]
    MarkRead {
        thread: ThreadId,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to unsubscribe from thread {thread}, {source:#}")]
    Unsubscribe {
        thread: ThreadId,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write output, {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NotifyError>;
