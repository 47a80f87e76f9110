//! Service endpoint addressing
//!
//! Builds the per-ecosystem repository URLs and the install endpoints
//! (token negotiation, rpm base-URL discovery) off a single service root.

use url::Url;

use crate::error::{ProvisionError, Result};

/// Default root of the hosted repository service
pub const DEFAULT_SERVICE_ROOT: &str = "https://packagecloud.io";

/// Root URL of the repository service, with URL construction helpers
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    root: Url,
}

impl Default for ServiceEndpoint {
    fn default() -> Self {
        Self {
            root: Url::parse(DEFAULT_SERVICE_ROOT).expect("default service root is a valid URL"),
        }
    }
}

impl ServiceEndpoint {
    /// Create an endpoint from a service root URL (testing, self-hosted mirrors)
    pub fn new(root: &str) -> Result<Self> {
        let root = Url::parse(root).map_err(|e| ProvisionError::InvalidEndpoint {
            url: root.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { root })
    }

    fn root_str(&self) -> &str {
        self.root.as_str().trim_end_matches('/')
    }

    fn parse_repo_url(&self, url: String) -> Result<Url> {
        Url::parse(&url).map_err(|e| ProvisionError::InvalidEndpoint {
            url,
            reason: e.to_string(),
        })
    }

    /// Repository base URL for deb repositories: `<root>/<name>/<platform>/`
    pub fn deb_repo_url(&self, name: &str, platform: &str) -> Result<Url> {
        self.parse_repo_url(format!("{}/{}/{}/", self.root_str(), name, platform))
    }

    /// Repository base URL for gem indexes: `<root>/<name>/`
    pub fn gem_repo_url(&self, name: &str) -> Result<Url> {
        self.parse_repo_url(format!("{}/{}/", self.root_str(), name))
    }

    /// Token negotiation endpoint for a repository
    pub fn tokens_url(&self, name: &str) -> String {
        format!("{}/install/repositories/{}/tokens.text", self.root_str(), name)
    }

    /// rpm base-URL discovery endpoint for a repository
    pub fn rpm_base_url(&self, name: &str) -> String {
        format!("{}/install/repositories/{}/rpm_base_url", self.root_str(), name)
    }

    /// URL of the service's GPG signing key
    pub fn gpg_key_url(&self) -> String {
        format!("{}/gpg.key", self.root_str())
    }
}
