//! rpm base-URL discovery
//!
//! RPM repositories do not have a statically constructible base URL: the
//! service maps (os, dist) to an ecosystem-specific location. The lookup
//! itself may be gated, so it is authenticated with the master token when
//! one is available, unlike the deb/gem paths.

use url::Url;

use crate::endpoint::ServiceEndpoint;
use crate::error::{ProvisionError, Result};
use crate::identity::HostIdentity;
use crate::transport::{InstallParams, Transport};

/// Look up the rpm base repository URL for `repo_name`.
///
/// The returned URL is not yet credentialed for package fetches; a
/// subsequent token negotiation pass embeds the read token.
pub async fn resolve_rpm_base_url(
    transport: &Transport,
    endpoint: &ServiceEndpoint,
    repo_name: &str,
    dist: &str,
    identity: &HostIdentity,
    master_token: Option<&str>,
) -> Result<Url> {
    let params = InstallParams::new(identity, Some(dist));
    let body = transport
        .get(&endpoint.rpm_base_url(repo_name), &params, master_token)
        .await?;
    let base_url = body.trim();

    Url::parse(base_url).map_err(|e| ProvisionError::Resolution {
        body: base_url.to_string(),
        reason: e.to_string(),
    })
}
