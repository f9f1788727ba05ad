//! Project identity from remote URLs

use std::sync::OnceLock;

use regex::Regex;
use rel_core::error::GitError;
use rel_core::types::ProjectIdentity;

use crate::repository::Result;

fn url_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // [user@]host:owner/repo[.git]
            r"^(?:[^@/]+@)?[^:/]+:([^/]+)/([^/]+?)(?:\.git)?/?$",
            // ssh://[user@]host[:port]/owner/repo[.git]
            r"^ssh://(?:[^@/]+@)?[^/]+/([^/]+)/([^/]+?)(?:\.git)?/?$",
            // https://host/owner/repo[.git]
            r"^https?://(?:[^@/]+@)?[^/]+/([^/]+)/([^/]+?)(?:\.git)?/?$",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid pattern"))
        .collect()
    })
}

/// Extract `{owner, repo}` from a remote URL, stripping a trailing `.git`
pub fn parse_remote_url(url: &str) -> Result<ProjectIdentity> {
    url_patterns()
        .iter()
        .find_map(|re| re.captures(url.trim()))
        .map(|caps| ProjectIdentity::new(&caps[1], &caps[2]))
        .ok_or_else(|| GitError::IdentityResolution {
            url: url.to_string(),
        })
}
