//! Generated system files.
//!
//! Both files are overwritten in full on every run; manual edits are lost.

use crate::config::HostConfig;
use crate::error::Result;
use crate::render::{render_hosts, render_resolv_conf};
use crate::util::{FileLock, write_atomic};
use std::path::{Path, PathBuf};

const HOSTS_FILE: &str = "etc/hosts";
const RESOLV_CONF_FILE: &str = "etc/resolv.conf";
const DHCLIENT_DIR: &str = "etc";
const LOCK_FILE: &str = "run/host-name-conf.lock";

const FILE_MODE: u32 = 0o644;

/// Locations of the files read and written by a run.
///
/// # Example
///
/// ```
/// use host_name_conf::SystemFiles;
/// use std::path::Path;
///
/// let files = SystemFiles::new();
/// assert_eq!(files.hosts(), Path::new("/etc/hosts"));
///
/// let files = SystemFiles::with_root("/tmp/sandbox");
/// assert_eq!(files.resolv_conf(), Path::new("/tmp/sandbox/etc/resolv.conf"));
/// ```
#[derive(Debug, Clone)]
pub struct SystemFiles {
    hosts: PathBuf,
    resolv_conf: PathBuf,
    dhclient_dir: PathBuf,
    lock: PathBuf,
}

impl SystemFiles {
    /// Targets the live system paths under `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root("/")
    }

    /// Places every path under `root` (useful for testing). Parent
    /// directories are created on demand.
    #[must_use]
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            hosts: root.join(HOSTS_FILE),
            resolv_conf: root.join(RESOLV_CONF_FILE),
            dhclient_dir: root.join(DHCLIENT_DIR),
            lock: root.join(LOCK_FILE),
        }
    }

    /// Path of the hosts file.
    #[must_use]
    pub fn hosts(&self) -> &Path {
        &self.hosts
    }

    /// Path of the resolver configuration.
    #[must_use]
    pub fn resolv_conf(&self) -> &Path {
        &self.resolv_conf
    }

    /// Directory scanned for DHCP resolver files.
    #[must_use]
    pub fn dhclient_dir(&self) -> &Path {
        &self.dhclient_dir
    }

    /// Takes the exclusive lock serializing concurrent runs, blocking until
    /// it is available.
    ///
    /// # Errors
    ///
    /// Returns [`HostNameError::Io`](crate::HostNameError::Io) if the lock
    /// file cannot be created or locked.
    pub fn lock(&self) -> Result<FileLock> {
        ensure_parent(&self.lock)?;
        let lock = FileLock::acquire(&self.lock)?;
        tracing::debug!(path = %self.lock.display(), "Acquired host-name lock");
        Ok(lock)
    }

    /// Writes the hosts file and the resolver configuration for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HostNameError::Io`](crate::HostNameError::Io) if either
    /// file cannot be written.
    pub fn write(&self, config: &HostConfig) -> Result<()> {
        write_file(&self.hosts, &render_hosts(config))?;
        write_file(&self.resolv_conf, &render_resolv_conf(config))?;
        Ok(())
    }
}

impl Default for SystemFiles {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path)?;
    write_atomic(path, content, FILE_MODE)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
