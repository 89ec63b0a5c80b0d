//! Host name and search list constraints.

use crate::config::HostConfig;
use crate::error::{HostNameError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Longest host name accepted.
pub const MAX_HOSTNAME_LEN: usize = 63;

/// resolv.conf(5) limits the search list to six domains...
pub const MAX_SEARCH_DOMAINS: usize = 6;

/// ...and 256 characters in total.
pub const MAX_SEARCH_LEN: usize = 256;

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][-.A-Za-z0-9]*[A-Za-z0-9]$").expect("static regex is valid")
});

/// Checks `config` against the host name and search list limits, failing on
/// the first violation.
///
/// # Errors
///
/// Returns [`HostNameError::Config`] describing the violated constraint.
pub fn verify(config: &HostConfig) -> Result<()> {
    if !HOSTNAME.is_match(&config.hostname) {
        return Err(HostNameError::Config(format!(
            "Invalid host name {}",
            config.hostname
        )));
    }

    let len = config.hostname.len();
    if !(1..=MAX_HOSTNAME_LEN).contains(&len) {
        return Err(HostNameError::Config(format!(
            "Invalid host-name length, must be less than {MAX_HOSTNAME_LEN} characters"
        )));
    }

    if config.domain_search.len() > MAX_SEARCH_DOMAINS {
        return Err(HostNameError::Config(
            "The search list is currently limited to six domains".to_string(),
        ));
    }

    if config.domain_search.join(" ").chars().count() > MAX_SEARCH_LEN {
        return Err(HostNameError::Config(format!(
            "The search list is currently limited to {MAX_SEARCH_LEN} characters"
        )));
    }

    Ok(())
}
