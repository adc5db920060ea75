//! Upstream side of the release notes pipeline: the GitHub releases client
//! and the user agent filter applied before it is called.

pub mod client;
pub mod user_agent;

pub use client::{GithubClient, UpstreamError};
pub use user_agent::is_automated_client;
