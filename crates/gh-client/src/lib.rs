//! GitHub notification API client
//!
//! This crate provides a trait-based client for the GitHub notifications
//! API. The pipeline code only talks to the `NotificationClient` trait, so
//! tests can swap the octocrab-backed client for an in-memory one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │            NotificationClient trait              │
//! │  - list_notifications()                          │
//! │  - fetch_pull_request() / fetch_issue()          │
//! │  - mark_thread_read()                            │
//! │  - delete_thread_subscription()                  │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │ OctocrabClient  │
//!              │ (direct API)    │
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{build_client, NotificationClient, NotificationQuery, TokenResolver};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let token = TokenResolver::new()
//!     .get_token(None)
//!     .ok_or_else(|| anyhow::anyhow!("GITHUB_TOKEN not set"))?;
//! let client = build_client(None, token)?;
//!
//! let notifications = client.list_notifications(&NotificationQuery::default()).await?;
//! for n in notifications {
//!     println!("{} {}", n.repository, n.subject.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod client_factory;
pub mod octocrab_client;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use client::NotificationClient;
pub use client_factory::{api_base_url, build_client, TokenResolver};
pub use octocrab_client::OctocrabClient;
pub use types::{
    IssueDetail, IssueState, Notification, NotificationQuery, PullRequestDetail, Subject,
    SubjectKind, ThreadId,
};
