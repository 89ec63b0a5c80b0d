//! The host-name commit pipeline.

use crate::config::HostConfig;
use crate::dhcp;
use crate::error::Result;
use crate::files::SystemFiles;
use crate::store::{ConfigStore, ReadMode};
use crate::system::{SystemEffector, apply};
use crate::validate::verify;

/// Loads, validates, renders and applies the host-name configuration.
///
/// Validation happens before anything is touched; a rejected config leaves
/// the files and the running system unchanged. Writing and applying run
/// under the [`SystemFiles::lock`] so a commit and a DHCP hook cannot
/// interleave.
///
/// Returns the final config, including merged DHCP values.
///
/// # Errors
///
/// Returns [`HostNameError::Config`](crate::HostNameError::Config) for
/// constraint violations, or the first store, I/O or command failure.
pub fn commit<S, E>(
    store: &S,
    mode: ReadMode,
    files: &SystemFiles,
    effector: &E,
) -> Result<HostConfig>
where
    S: ConfigStore + ?Sized,
    E: SystemEffector + ?Sized,
{
    let mut config = HostConfig::load(store, mode)?;
    verify(&config)?;

    let _lock = files.lock()?;
    config.merge_dhcp(dhcp::scan(files.dhclient_dir())?);
    files.write(&config)?;
    apply(&config, effector)?;

    tracing::info!(
        fqdn = %config.fqdn(),
        nameservers = ?config.nameserver,
        search = ?config.domain_search,
        "Committed host-name configuration"
    );
    Ok(config)
}
