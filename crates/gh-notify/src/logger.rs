//! Logger setup
//!
//! Logs go to stderr so stdout only carries the command's report.
//! `RUST_LOG` takes precedence over `--log-level`.

use env_logger::Env;

pub fn init(default_level: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
