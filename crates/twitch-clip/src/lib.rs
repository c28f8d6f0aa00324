//! Minimal client for the Twitch clips API
//!
//! Refreshes OAuth tokens, creates clips and looks them up by id. Every
//! operation takes a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! so callers can abandon a request in flight.

pub mod config;
pub mod twitch;

pub use config::Config;
pub use twitch::{ClipError, Credentials, TwitchClient};
