//! Text of the generated `/etc/hosts` and `/etc/resolv.conf`.

use crate::config::HostConfig;
use std::fmt::Write as _;

/// First line of every generated file.
pub const GENERATED_MARKER: &str = "### Autogenerated by host-name-conf ###";

/// Renders `/etc/hosts`.
///
/// ```text
///
/// ### Autogenerated by host-name-conf ###
/// 127.0.0.1       localhost router1.example.com
///
/// # The following lines are desirable for IPv6 capable hosts
/// ::1             localhost ip6-localhost ip6-loopback
/// ...
/// ```
#[must_use]
pub fn render_hosts(config: &HostConfig) -> String {
    format!(
        "\n{GENERATED_MARKER}\n\
         127.0.0.1       localhost {fqdn}\n\
         \n\
         # The following lines are desirable for IPv6 capable hosts\n\
         ::1             localhost ip6-localhost ip6-loopback\n\
         fe00::0         ip6-localnet\n\
         ff00::0         ip6-mcastprefix\n\
         ff02::1         ip6-allnodes\n\
         ff02::2         ip6-allrouters\n\
         \n\
         ### modifications from other scripts should be added below\n\
         \n",
        fqdn = config.fqdn(),
    )
}

/// Renders `/etc/resolv.conf`: one `nameserver` line per entry, then
/// `domain` and `search` when set.
///
/// ```text
///
/// ### Autogenerated by host-name-conf ###
/// nameserver 1.1.1.1
/// nameserver 8.8.8.8
///
/// domain example.com
/// search example.com lan
/// ```
#[must_use]
pub fn render_resolv_conf(config: &HostConfig) -> String {
    let mut out = format!("\n{GENERATED_MARKER}\n");
    for ns in &config.nameserver {
        let _ = writeln!(out, "nameserver {ns}");
    }
    if let Some(domain) = &config.domain_name {
        let _ = write!(out, "\ndomain {domain}");
    }
    if !config.domain_search.is_empty() {
        let _ = write!(out, "\nsearch {}", config.domain_search.join(" "));
    }
    out.push('\n');
    out
}
