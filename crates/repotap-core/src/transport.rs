//! Single-shot authenticated HTTPS requests
//!
//! One request per call, no retries, no caching. Any 2xx response yields
//! the raw body; anything else is a `RemoteRequest` error carrying the
//! status and body so callers can branch on failure kind.

use serde::Serialize;

use crate::error::{ProvisionError, Result};
use crate::identity::HostIdentity;

/// Identity parameters sent to both install endpoints
#[derive(Debug, Clone, Serialize)]
pub struct InstallParams<'a> {
    pub os: &'a str,
    /// Omitted entirely for repositories that are not distribution-qualified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist: Option<&'a str>,
    pub name: &'a str,
}

impl<'a> InstallParams<'a> {
    pub fn new(identity: &'a HostIdentity, dist: Option<&'a str>) -> Self {
        Self {
            os: &identity.platform,
            dist,
            name: &identity.fqdn,
        }
    }
}

/// Timeout applied to each request, and the value reported by
/// `ProvisionError::Timeout`
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP transport for the install endpoints
pub struct Transport {
    client: reqwest::Client,
}

impl Transport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProvisionError::Network {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// GET with parameters in the query string.
    ///
    /// If `auth` is present it is sent as the Basic username with an
    /// empty password (token-style authentication, password unused).
    pub async fn get(
        &self,
        url: &str,
        params: &InstallParams<'_>,
        auth: Option<&str>,
    ) -> Result<String> {
        tracing::debug!(url, authenticated = auth.is_some(), "GET");

        let mut request = self.client.get(url).query(params);
        if let Some(user) = auth {
            request = request.basic_auth(user, Some(""));
        }

        Self::read_body(request.send().await?).await
    }

    /// POST with parameters as an application/x-www-form-urlencoded body
    pub async fn post_form(
        &self,
        url: &str,
        params: &InstallParams<'_>,
        auth: Option<&str>,
    ) -> Result<String> {
        tracing::debug!(url, authenticated = auth.is_some(), "POST");

        let mut request = self.client.post(url).form(params);
        if let Some(user) = auth {
            request = request.basic_auth(user, Some(""));
        }

        Self::read_body(request.send().await?).await
    }

    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ProvisionError::RemoteRequest {
                status: status.as_u16(),
                body,
            })
        }
    }
}
