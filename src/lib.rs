//! # host-name-conf
//!
//! Render `/etc/hosts` and `/etc/resolv.conf` from the router's
//! `system host-name`, `system domain-name`, `system domain-search` and
//! `system name-server` configuration, and apply the host name to the
//! running system.
//!
//! A run is a single pass:
//!
//! 1. [`HostConfig::load`] reads the values from a [`ConfigStore`], either the
//!    pending commit or the effective (already applied) tree.
//! 2. [`verify`] checks host name syntax and the resolver search list limits.
//! 3. [`dhcp::scan`] collects nameservers and search domains from the
//!    `resolv.conf.dhclient-new*` files left by dhclient, which are appended
//!    unless `system disable-dhcp-nameservers` is set.
//! 4. [`SystemFiles::write`] regenerates both files and [`apply`] sets the
//!    host name and restarts the services that cache it.
//!
//! [`commit`] runs all of the above.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use host_name_conf::{CliShellApi, ReadMode, SystemFiles, Systemd, commit};
//!
//! // Requires root.
//! let config = commit(&CliShellApi::new(), ReadMode::Pending, &SystemFiles::new(), &Systemd)?;
//! println!("host name is now {}", config.fqdn());
//! ```
//!
//! ## Testing
//!
//! [`MemoryStore`] and [`SystemFiles::with_root`] let the whole pipeline run
//! against a temporary directory; any [`SystemEffector`] can stand in for
//! [`Systemd`].

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod commit;
pub mod config;
pub mod dhcp;
pub mod error;
pub mod files;
pub mod render;
pub mod store;
pub mod system;
pub mod util;
pub mod validate;

pub use commit::commit;
pub use config::{DEFAULT_HOSTNAME, HostConfig};
pub use dhcp::DhcpResolvers;
pub use error::{HostNameError, Result};
pub use files::SystemFiles;
pub use store::{CliShellApi, ConfigStore, MemoryStore, ReadMode};
pub use system::{SystemEffector, Systemd, apply};
pub use validate::verify;
