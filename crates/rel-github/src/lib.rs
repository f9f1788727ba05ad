//! rel github - GitHub as a release host
//!
//! A thin REST client implementing [`rel_core::host::ReleaseHost`] plus API
//! token resolution from the rel configuration.

pub mod client;
pub mod credentials;

pub use client::GitHubClient;
pub use credentials::{resolve_token, TokenSource};
