//! Error types.

use thiserror::Error;

/// Result alias for host-name operations.
pub type Result<T> = std::result::Result<T, HostNameError>;

/// Errors returned while loading, validating, rendering or applying the
/// host-name configuration.
#[derive(Debug, Error)]
pub enum HostNameError {
    /// The configuration violates a host-name or resolver constraint.
    ///
    /// This is the only error the operator is expected to fix; the message is
    /// shown as-is.
    #[error("{0}")]
    Config(String),

    /// Filesystem I/O failed (typically `PermissionDenied` on `/etc`).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Querying the configuration store failed.
    #[error("failed to query configuration path '{path}': {source}")]
    Store {
        /// The configuration path being read.
        path: String,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// An external command could not be run or exited unsuccessfully.
    #[error("command '{program}' failed: {detail}")]
    Command {
        /// The program that was invoked.
        program: String,
        /// Exit status or spawn error.
        detail: String,
    },

    /// The DHCP resolver glob pattern is malformed.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl HostNameError {
    /// Returns `true` for validation failures the operator has to correct.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` if the underlying I/O error is `PermissionDenied`.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_bare_message() {
        let e = HostNameError::Config("Invalid host name -x".into());
        assert_eq!(e.to_string(), "Invalid host name -x");
        assert!(e.is_config_error());
    }

    #[test]
    fn io_error_is_not_config_error() {
        let e = HostNameError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(!e.is_config_error());
        assert!(e.is_permission_denied());
    }
}
