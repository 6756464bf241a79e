//! gh-notify - list and bulk-unsubscribe from GitHub notification threads.

mod actions;
mod error;
mod filter;
mod logger;
mod resolver;
#[cfg(test)]
mod test_support;

use actions::{ListAction, UnsubscribeAction};
use clap::{Args, Parser, Subcommand};
use error::NotifyError;
use filter::{for_each_notification, FilterConfig, NotificationAction, Paging};
use gh_client::{build_client, OctocrabClient, SubjectKind, TokenResolver};
use gh_notify_config::AppConfig;
use log::info;
use resolver::SubjectState;
use std::process::ExitCode;

/// Manage GitHub notification subscriptions in bulk.
#[derive(Parser, Debug)]
#[command(name = "gh-notify")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Consider this repository only. Example: org/reponame
    #[arg(long = "repo", global = true)]
    repository: Option<String>,

    /// Notifications for this type of subject only. Supported options: PullRequest or Issue
    #[arg(long = "type", global = true)]
    subject_type: Option<String>,

    /// GitHub Enterprise host (default: github.com)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List notifications
    List {
        /// Act on notifications where the subject is in that state. Supported options: open, closed and merged. Merged is for PR only
        #[arg(long)]
        state: Option<SubjectState>,

        /// Show read notifications
        #[arg(long)]
        show_read: bool,
    },

    /// Unsubscribe from the notifications matching the filters
    Unsubscribe {
        /// Act on notifications where the subject is in that state. Supported options: open, closed and merged. Merged is for PR only
        #[arg(long, default_value = "closed")]
        state: SubjectState,

        /// Unsubscribe from unread notifications
        #[arg(long)]
        unread: bool,
    },
}

impl Commands {
    /// Filters for this command, flags first, then config file values
    fn filters(&self, global: &GlobalArgs, config: &AppConfig) -> FilterConfig {
        let repository = global
            .repository
            .clone()
            .or_else(|| config.repository.clone());
        let subject_kind = SubjectKind::from(
            global
                .subject_type
                .as_deref()
                .unwrap_or(&config.subject_type),
        );

        match self {
            Commands::List { state, show_read } => FilterConfig {
                repository,
                subject_kind,
                subject_state: *state,
                include_read: *show_read,
                unsubscribe_unread: false,
            },
            // unread threads are listed too, the action decides whether to skip them
            Commands::Unsubscribe { state, unread } => FilterConfig {
                repository,
                subject_kind,
                subject_state: Some(*state),
                include_read: true,
                unsubscribe_unread: *unread,
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(&cli.global.log_level);

    let config = AppConfig::load();

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ NotifyError::CredentialMissing { .. }) => {
            println!("{}", err);
            ExitCode::FAILURE
        }
        Err(err) => {
            println!("Failed to process notifications, {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), NotifyError> {
    let client = connect(&cli.global, &config)?;
    let filters = cli.command.filters(&cli.global, &config);
    let paging = Paging {
        per_page: config.per_page,
        all_pages: config.all_pages,
    };
    info!("Running {:?} with {:?}", cli.command, filters);

    let stdout = std::io::stdout();
    let mut action: Box<dyn NotificationAction> = match cli.command {
        Commands::List { .. } => Box::new(ListAction::new(stdout, config.title_width)),
        Commands::Unsubscribe { .. } => Box::new(UnsubscribeAction::new(stdout)),
    };

    for_each_notification(&client, &filters, paging, action.as_mut()).await
}

fn connect(global: &GlobalArgs, config: &AppConfig) -> Result<OctocrabClient, NotifyError> {
    let host = global.host.as_deref().or(config.host.as_deref());

    let token = TokenResolver::new()
        .get_token(host)
        .ok_or_else(|| NotifyError::CredentialMissing {
            variable: TokenResolver::expected_variable(host),
        })?;

    build_client(host, token).map_err(NotifyError::ClientSetup)
}
