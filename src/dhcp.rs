//! Nameservers and search domains handed out by DHCP.
//!
//! `dhclient` leaves one `resolv.conf.dhclient-new*` file per interface; these
//! are read here so the values can be merged into the system resolver config.

use crate::error::Result;
use std::path::Path;

/// File name pattern of the per-interface resolver files written by dhclient.
pub const DHCLIENT_RESOLV_PATTERN: &str = "resolv.conf.dhclient-new*";

/// Values collected from one or more DHCP resolver files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DhcpResolvers {
    /// Addresses from `nameserver` lines.
    pub nameservers: Vec<String>,
    /// Domains from `search` lines.
    pub search: Vec<String>,
}

impl DhcpResolvers {
    /// Returns `true` if nothing was discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nameservers.is_empty() && self.search.is_empty()
    }

    fn extend(&mut self, other: Self) {
        self.nameservers.extend(other.nameservers);
        self.search.extend(other.search);
    }
}

/// Parses resolver-config text.
///
/// Anything after `#` is a comment. The second token of a line whose first
/// token is `nameserver` or `search` is collected; other lines are ignored.
#[must_use]
pub fn parse_resolv_conf(content: &str) -> DhcpResolvers {
    let mut found = DhcpResolvers::default();
    for line in content.lines() {
        let line = line.split('#').next().unwrap_or_default();
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some("nameserver"), Some(ns)) => found.nameservers.push(ns.to_string()),
            (Some("search"), Some(domain)) => found.search.push(domain.to_string()),
            _ => {}
        }
    }
    found
}

/// Reads and parses a single resolver file. Unreadable files yield an empty
/// result.
#[must_use]
pub fn read_resolv_file(path: &Path) -> DhcpResolvers {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_resolv_conf(&content),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Skipping unreadable DHCP resolver file");
            DhcpResolvers::default()
        }
    }
}

/// Collects values from every `resolv.conf.dhclient-new*` file in `dir`,
/// in file then line order.
///
/// # Errors
///
/// Returns [`HostNameError::Pattern`](crate::HostNameError::Pattern) if `dir`
/// produces an invalid glob pattern.
pub fn scan(dir: &Path) -> Result<DhcpResolvers> {
    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy()))
        .join(DHCLIENT_RESOLV_PATTERN);
    let mut found = DhcpResolvers::default();

    for entry in glob::glob(&pattern.to_string_lossy())? {
        match entry {
            Ok(path) => {
                let resolvers = read_resolv_file(&path);
                tracing::debug!(
                    path = %path.display(),
                    nameservers = ?resolvers.nameservers,
                    search = ?resolvers.search,
                    "Read DHCP resolver file"
                );
                found.extend(resolvers);
            }
            Err(e) => tracing::debug!(error = %e, "Skipping DHCP resolver file"),
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_comments_and_matches_first_token() {
        let r = parse_resolv_conf(
            "# generated by dhclient\n\
             nameserver 192.0.2.1 # primary\n\
             #nameserver 192.0.2.99\n\
             search lan.example\n\
             domain example\n\
             options nameserver-like\n\
             nameserver\n\
             \x20 nameserver 192.0.2.2\n",
        );
        assert_eq!(r.nameservers, vec!["192.0.2.1", "192.0.2.2"]);
        assert_eq!(r.search, vec!["lan.example"]);
    }

    #[test]
    fn search_takes_first_domain_only() {
        let r = parse_resolv_conf("search a.example b.example\n");
        assert_eq!(r.search, vec!["a.example"]);
    }

    #[test]
    fn missing_file_is_empty() {
        assert!(read_resolv_file(Path::new("/nonexistent/resolv.conf")).is_empty());
    }

    #[test]
    fn scan_collects_matching_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("resolv.conf.dhclient-new.eth0"),
            "nameserver 192.0.2.1\nsearch a.example\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("resolv.conf.dhclient-new.eth1"),
            "nameserver 192.0.2.2\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("resolv.conf"), "nameserver 203.0.113.1\n").unwrap();

        let r = scan(dir.path()).unwrap();
        assert_eq!(r.nameservers, vec!["192.0.2.1", "192.0.2.2"]);
        assert_eq!(r.search, vec!["a.example"]);
    }

    #[test]
    fn scan_dir_with_glob_metacharacters() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("etc[1]");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(
            dir.join("resolv.conf.dhclient-new.eth0"),
            "nameserver 192.0.2.1\nsearch a.example\n",
        )
        .unwrap();

        let r = scan(&dir).unwrap();
        assert_eq!(r.nameservers, vec!["192.0.2.1"]);
        assert_eq!(r.search, vec!["a.example"]);
    }

    #[test]
    fn scan_empty_and_nonexistent_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan(dir.path()).unwrap().is_empty());
        assert!(scan(Path::new("/nonexistent")).unwrap().is_empty());
    }
}
