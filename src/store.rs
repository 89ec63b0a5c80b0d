//! Read-only access to the appliance configuration tree.

use crate::error::{HostNameError, Result};
use std::collections::{HashMap, HashSet};
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

/// Which view of the configuration tree to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadMode {
    /// The working configuration of the current commit.
    #[default]
    Pending,
    /// The configuration that is already applied (used from DHCP hooks,
    /// which run outside of a configuration session).
    Effective,
}

/// Hierarchical configuration store queried by space-separated path strings,
/// e.g. `"system host-name"`.
pub trait ConfigStore {
    /// Returns the single value at `path`, or `None` if it is not set.
    ///
    /// # Errors
    ///
    /// Returns [`HostNameError::Store`] if the store cannot be queried.
    fn value(&self, path: &str, mode: ReadMode) -> Result<Option<String>>;

    /// Returns all values of the multi-value node at `path`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`HostNameError::Store`] if the store cannot be queried.
    fn values(&self, path: &str, mode: ReadMode) -> Result<Vec<String>>;

    /// Returns `true` if the node at `path` exists.
    ///
    /// # Errors
    ///
    /// Returns [`HostNameError::Store`] if the store cannot be queried.
    fn exists(&self, path: &str, mode: ReadMode) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// cli-shell-api backend
// ---------------------------------------------------------------------------

const CLI_SHELL_API: &str = "cli-shell-api";

static QUOTED_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(.*?)'").expect("static regex is valid"));

/// Store backed by the `cli-shell-api` helper of the configuration backend.
///
/// A non-zero exit status from the helper means the node is absent.
#[derive(Debug, Clone)]
pub struct CliShellApi {
    program: String,
}

impl CliShellApi {
    /// Creates a store invoking `cli-shell-api` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: CLI_SHELL_API.to_string(),
        }
    }

    /// Creates a store invoking a different helper binary.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs `<program> <op> <path...>`, returning stdout on success and
    /// `None` when the helper reports the node as absent.
    fn run(&self, op: &str, path: &str) -> Result<Option<String>> {
        let output = Command::new(&self.program)
            .arg(op)
            .args(path.split_whitespace())
            .output()
            .map_err(|source| HostNameError::Store {
                path: path.to_string(),
                source,
            })?;

        tracing::debug!(op, path, status = %output.status, "Queried configuration store");

        if !output.status.success() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

impl Default for CliShellApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for CliShellApi {
    fn value(&self, path: &str, mode: ReadMode) -> Result<Option<String>> {
        let op = match mode {
            ReadMode::Pending => "returnValue",
            ReadMode::Effective => "returnEffectiveValue",
        };
        Ok(self
            .run(op, path)?
            .map(|out| out.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    fn values(&self, path: &str, mode: ReadMode) -> Result<Vec<String>> {
        let op = match mode {
            ReadMode::Pending => "returnValues",
            ReadMode::Effective => "returnEffectiveValues",
        };
        Ok(self
            .run(op, path)?
            .map(|out| parse_quoted_values(&out))
            .unwrap_or_default())
    }

    fn exists(&self, path: &str, mode: ReadMode) -> Result<bool> {
        let op = match mode {
            ReadMode::Pending => "exists",
            ReadMode::Effective => "existsEffective",
        };
        Ok(self.run(op, path)?.is_some())
    }
}

/// Splits `'a' 'b c'` into `["a", "b c"]`.
fn parse_quoted_values(out: &str) -> Vec<String> {
    QUOTED_VALUE
        .captures_iter(out)
        .map(|c| c[1].to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// In-memory store with separate pending and effective trees.
///
/// # Example
///
/// ```
/// use host_name_conf::{ConfigStore, MemoryStore, ReadMode};
///
/// let store = MemoryStore::new()
///     .set_value(ReadMode::Pending, "system host-name", "router1")
///     .set_values(ReadMode::Pending, "system name-server", ["1.1.1.1"]);
///
/// assert_eq!(
///     store.value("system host-name", ReadMode::Pending).unwrap().as_deref(),
///     Some("router1")
/// );
/// assert!(store.value("system host-name", ReadMode::Effective).unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<(ReadMode, String), Vec<String>>,
    nodes: HashSet<(ReadMode, String)>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single-value node.
    #[must_use]
    pub fn set_value(self, mode: ReadMode, path: &str, value: impl Into<String>) -> Self {
        self.set_values(mode, path, [value.into()])
    }

    /// Sets a multi-value node.
    #[must_use]
    pub fn set_values<I, V>(mut self, mode: ReadMode, path: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = (mode, path.to_string());
        self.nodes.insert(key.clone());
        self.values
            .insert(key, values.into_iter().map(Into::into).collect());
        self
    }

    /// Marks a valueless node as present.
    #[must_use]
    pub fn set_exists(mut self, mode: ReadMode, path: &str) -> Self {
        self.nodes.insert((mode, path.to_string()));
        self
    }
}

impl ConfigStore for MemoryStore {
    fn value(&self, path: &str, mode: ReadMode) -> Result<Option<String>> {
        Ok(self
            .values
            .get(&(mode, path.to_string()))
            .and_then(|v| v.first().cloned()))
    }

    fn values(&self, path: &str, mode: ReadMode) -> Result<Vec<String>> {
        Ok(self
            .values
            .get(&(mode, path.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn exists(&self, path: &str, mode: ReadMode) -> Result<bool> {
        Ok(self.nodes.contains(&(mode, path.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quoted_values_splits_tokens() {
        assert_eq!(
            parse_quoted_values("'1.1.1.1' '2001:db8::1'\n"),
            vec!["1.1.1.1", "2001:db8::1"]
        );
        assert!(parse_quoted_values("").is_empty());
    }

    #[test]
    fn memory_store_modes_are_separate() {
        let store = MemoryStore::new()
            .set_values(ReadMode::Effective, "system name-server", ["9.9.9.9"])
            .set_exists(ReadMode::Pending, "system disable-dhcp-nameservers");

        assert!(store.values("system name-server", ReadMode::Pending).unwrap().is_empty());
        assert_eq!(
            store.values("system name-server", ReadMode::Effective).unwrap(),
            vec!["9.9.9.9"]
        );
        assert!(store.exists("system disable-dhcp-nameservers", ReadMode::Pending).unwrap());
        assert!(!store.exists("system disable-dhcp-nameservers", ReadMode::Effective).unwrap());
    }

    #[test]
    fn missing_program_is_store_error() {
        let store = CliShellApi::with_program("/nonexistent/cli-shell-api");
        let err = store.value("system host-name", ReadMode::Pending).unwrap_err();
        assert!(matches!(err, HostNameError::Store { ref path, .. } if path == "system host-name"));
    }

    #[test]
    fn failing_program_means_absent() {
        // `false` ignores its arguments and exits 1.
        let store = CliShellApi::with_program("false");
        assert!(store.value("system host-name", ReadMode::Pending).unwrap().is_none());
        assert!(store.values("system name-server", ReadMode::Effective).unwrap().is_empty());
        assert!(!store.exists("system disable-dhcp-nameservers", ReadMode::Pending).unwrap());
    }
}
