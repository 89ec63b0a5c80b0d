//! Host name and resolver configuration.

use crate::dhcp::DhcpResolvers;
use crate::error::Result;
use crate::store::{ConfigStore, ReadMode};

/// Host name used when `system host-name` is not configured.
pub const DEFAULT_HOSTNAME: &str = "vyos";

const PATH_HOST_NAME: &str = "system host-name";
const PATH_DOMAIN_NAME: &str = "system domain-name";
const PATH_DOMAIN_SEARCH: &str = "system domain-search domain";
const PATH_NAME_SERVER: &str = "system name-server";
const PATH_NO_DHCP_NS: &str = "system disable-dhcp-nameservers";

/// Host name, domain and resolver settings for a single run.
///
/// # Example
///
/// ```
/// use host_name_conf::HostConfig;
///
/// let config = HostConfig::new("router1").with_domain_name("example.com");
///
/// assert_eq!(config.fqdn(), "router1.example.com");
/// assert_eq!(config.domain_search, vec!["example.com"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Short host name.
    pub hostname: String,

    /// Domain name, appended to the host name to form the FQDN.
    pub domain_name: Option<String>,

    /// Search suffixes: the domain name first, then configured domains, then
    /// DHCP-discovered domains.
    pub domain_search: Vec<String>,

    /// Nameserver addresses: configured first, then DHCP-discovered.
    pub nameserver: Vec<String>,

    /// Set when `system disable-dhcp-nameservers` is configured.
    pub no_dhcp_ns: bool,
}

impl HostConfig {
    /// Creates a config with the given host name and nothing else set.
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            domain_name: None,
            domain_search: Vec::new(),
            nameserver: Vec::new(),
            no_dhcp_ns: false,
        }
    }

    /// Sets the domain name and puts it at the head of the search list.
    #[must_use]
    pub fn with_domain_name(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        self.domain_search.insert(0, domain.clone());
        self.domain_name = Some(domain);
        self
    }

    /// Appends search domains.
    #[must_use]
    pub fn with_search<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain_search.extend(domains.into_iter().map(Into::into));
        self
    }

    /// Appends nameservers.
    #[must_use]
    pub fn with_nameservers<I, S>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nameserver.extend(servers.into_iter().map(Into::into));
        self
    }

    /// Sets the "disable DHCP nameservers" flag.
    #[must_use]
    pub const fn with_no_dhcp_ns(mut self, no_dhcp_ns: bool) -> Self {
        self.no_dhcp_ns = no_dhcp_ns;
        self
    }

    /// Reads the configuration from `store`, filling in defaults for
    /// anything absent. No validation is done here.
    ///
    /// # Errors
    ///
    /// Propagates store query failures.
    pub fn load<S: ConfigStore + ?Sized>(store: &S, mode: ReadMode) -> Result<Self> {
        let hostname = store
            .value(PATH_HOST_NAME, mode)?
            .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string());

        let mut config = Self::new(hostname);
        if let Some(domain) = store
            .value(PATH_DOMAIN_NAME, mode)?
            .filter(|d| !d.is_empty())
        {
            config = config.with_domain_name(domain);
        }

        config = config
            .with_search(store.values(PATH_DOMAIN_SEARCH, mode)?)
            .with_nameservers(store.values(PATH_NAME_SERVER, mode)?)
            .with_no_dhcp_ns(store.exists(PATH_NO_DHCP_NS, mode)?);

        tracing::debug!(
            ?mode,
            hostname = %config.hostname,
            domain = config.domain_name.as_deref().unwrap_or(""),
            nameservers = config.nameserver.len(),
            search = config.domain_search.len(),
            no_dhcp_ns = config.no_dhcp_ns,
            "Loaded host-name configuration"
        );
        Ok(config)
    }

    /// Appends DHCP-discovered nameservers and search domains, unless
    /// DHCP nameservers are disabled.
    pub fn merge_dhcp(&mut self, dhcp: DhcpResolvers) {
        if self.no_dhcp_ns {
            if !dhcp.is_empty() {
                tracing::warn!(
                    nameservers = ?dhcp.nameservers,
                    search = ?dhcp.search,
                    "Ignoring DHCP resolvers, disable-dhcp-nameservers is set"
                );
            }
            return;
        }
        self.nameserver.extend(dhcp.nameservers);
        self.domain_search.extend(dhcp.search);
    }

    /// Returns `<hostname>[.<domain_name>]`.
    #[must_use]
    pub fn fqdn(&self) -> String {
        match &self.domain_name {
            Some(domain) => format!("{}.{domain}", self.hostname),
            None => self.hostname.clone(),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOSTNAME)
    }
}
