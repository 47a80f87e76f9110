//! Read-token negotiation
//!
//! Exchanges the long-lived master token for a short-lived read token
//! scoped to this host, and embeds the read token into the repository URL.
//! The master token itself never ends up in the returned URL.

use url::Url;

use crate::endpoint::ServiceEndpoint;
use crate::error::{ProvisionError, Result};
use crate::identity::HostIdentity;
use crate::transport::{InstallParams, Transport};

/// Negotiate a read token for `repo_name` and return `target` with the
/// token embedded as the URL username (empty password).
///
/// When no master token is supplied the repository is assumed public and
/// `target` is returned unchanged without any network call.
pub async fn negotiate(
    transport: &Transport,
    endpoint: &ServiceEndpoint,
    repo_name: &str,
    dist: Option<&str>,
    identity: &HostIdentity,
    master_token: Option<&str>,
    mut target: Url,
) -> Result<Url> {
    let Some(master) = master_token else {
        return Ok(target);
    };

    let params = InstallParams::new(identity, dist);
    let body = transport
        .post_form(&endpoint.tokens_url(repo_name), &params, Some(master))
        .await?;
    let read_token = body.trim();

    embed_credentials(&mut target, read_token)?;
    Ok(target)
}

fn embed_credentials(url: &mut Url, read_token: &str) -> Result<()> {
    url.set_username(read_token)
        .and_then(|_| url.set_password(Some("")))
        .map_err(|_| ProvisionError::InvalidEndpoint {
            url: url.to_string(),
            reason: "URL cannot carry credentials".to_string(),
        })
}
