//! Repository type dispatch
//!
//! Selects the deb/rpm/gem configuration path for a spec and sequences
//! URL resolution and token negotiation. Pure selection logic: all I/O
//! happens in the transport, resolver, and negotiator.

use url::Url;

use crate::config::{RepoType, RepositorySpec};
use crate::endpoint::ServiceEndpoint;
use crate::error::Result;
use crate::identity::HostIdentity;
use crate::resolver;
use crate::token;
use crate::transport::Transport;

/// Provisions repositories against a single service endpoint
pub struct Provisioner {
    transport: Transport,
    endpoint: ServiceEndpoint,
}

impl Provisioner {
    pub fn new(endpoint: ServiceEndpoint) -> Result<Self> {
        Ok(Self {
            transport: Transport::new()?,
            endpoint,
        })
    }

    /// Provisioner for the default hosted service
    pub fn with_default_endpoint() -> Result<Self> {
        Self::new(ServiceEndpoint::default())
    }

    /// Resolve the authenticated repository URL for one spec.
    ///
    /// - deb: base `<root>/<name>/<platform>/`, dist = distribution codename
    /// - rpm: base looked up via `rpm_base_url`, dist = platform version
    /// - gem: base `<root>/<name>/`, no dist
    pub async fn provision(
        &self,
        spec: &RepositorySpec,
        identity: &HostIdentity,
    ) -> Result<ProvisionedRepository> {
        let master_token = spec.master_token.as_deref();

        let (url, distribution) = match spec.repo_type {
            RepoType::Deb => {
                let dist = identity.distribution_codename.as_str();
                let base = self.endpoint.deb_repo_url(&spec.name, &identity.platform)?;
                let url = token::negotiate(
                    &self.transport,
                    &self.endpoint,
                    &spec.name,
                    Some(dist),
                    identity,
                    master_token,
                    base,
                )
                .await?;
                (url, Some(dist.to_string()))
            }
            RepoType::Rpm => {
                let dist = identity.platform_version.as_str();
                let base = resolver::resolve_rpm_base_url(
                    &self.transport,
                    &self.endpoint,
                    &spec.name,
                    dist,
                    identity,
                    master_token,
                )
                .await?;
                let url = token::negotiate(
                    &self.transport,
                    &self.endpoint,
                    &spec.name,
                    Some(dist),
                    identity,
                    master_token,
                    base,
                )
                .await?;
                (url, Some(dist.to_string()))
            }
            RepoType::Gem => {
                let base = self.endpoint.gem_repo_url(&spec.name)?;
                let url = token::negotiate(
                    &self.transport,
                    &self.endpoint,
                    &spec.name,
                    None,
                    identity,
                    master_token,
                    base,
                )
                .await?;
                (url, None)
            }
        };

        tracing::debug!(name = %spec.name, repo_type = %spec.repo_type, "repository provisioned");

        Ok(ProvisionedRepository {
            name: spec.name.clone(),
            repo_type: spec.repo_type,
            distribution,
            url,
            gpg_key_url: self.endpoint.gpg_key_url(),
        })
    }
}

/// A fully resolved, credential-embedded repository, ready to be written
/// into the ecosystem's native configuration by the caller
#[derive(Debug, Clone)]
pub struct ProvisionedRepository {
    pub name: String,
    pub repo_type: RepoType,
    /// Distribution the repository was resolved for (absent for gem)
    pub distribution: Option<String>,
    /// Repository URL with the read token as username and empty password
    pub url: Url,
    /// Signing key location for package-manager trust setup
    pub gpg_key_url: String,
}

impl ProvisionedRepository {
    /// Filesystem-safe identifier ("acme/tools" becomes "acme_tools")
    pub fn file_stem(&self) -> String {
        self.name.replacen('/', "_", 1)
    }

    /// Render the ecosystem-native configuration snippet for this
    /// repository. The caller is responsible for writing it to the
    /// package manager's configuration mechanism.
    pub fn render_native_config(&self) -> String {
        match self.repo_type {
            RepoType::Deb => {
                let dist = self.distribution.as_deref().unwrap_or_default();
                format!(
                    "deb {url} {dist} main\ndeb-src {url} {dist} main\n",
                    url = self.url,
                    dist = dist,
                )
            }
            RepoType::Rpm => {
                let stem = self.file_stem();
                format!(
                    "[{stem}]\n\
                     name={stem}\n\
                     baseurl={url}\n\
                     repo_gpgcheck=1\n\
                     gpgcheck=0\n\
                     enabled=1\n\
                     gpgkey={gpgkey}\n\
                     sslverify=1\n\
                     sslcacert=/etc/pki/tls/certs/ca-bundle.crt\n",
                    stem = stem,
                    url = self.url,
                    gpgkey = self.gpg_key_url,
                )
            }
            RepoType::Gem => format!("gem source --add {}\n", self.url),
        }
    }
}
