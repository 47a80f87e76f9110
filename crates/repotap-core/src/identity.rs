//! Host identity facts
//!
//! Collected by the caller (CLI flags, a fact-discovery tool, or a
//! configuration-management runtime) and passed through as opaque strings.
//! The core never mutates or validates them.

use serde::{Deserialize, Serialize};

/// Identity of the host being provisioned
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostIdentity {
    /// Platform name, e.g. "ubuntu" or "el"
    pub platform: String,

    /// Distribution codename, e.g. "focal" (deb repositories)
    pub distribution_codename: String,

    /// Platform version, e.g. "9" (rpm repositories)
    pub platform_version: String,

    /// Fully-qualified hostname, sent as the identity the read token
    /// is scoped to
    pub fqdn: String,
}

impl HostIdentity {
    pub fn new(
        platform: impl Into<String>,
        distribution_codename: impl Into<String>,
        platform_version: impl Into<String>,
        fqdn: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            distribution_codename: distribution_codename.into(),
            platform_version: platform_version.into(),
            fqdn: fqdn.into(),
        }
    }
}
