//! Configuration for gh-notify
//!
//! This crate provides:
//! - Configuration file discovery (`.gh-notify.toml`)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
