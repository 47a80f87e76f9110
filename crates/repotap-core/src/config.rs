//! Repository specifications and provisioning manifests
//!
//! A manifest is the declarative input to a provisioning run: which
//! repositories to set up, for which ecosystem, and with which master token.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{ProvisionError, Result};

/// Packaging ecosystem of a hosted repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RepoType {
    /// Debian/APT repositories
    Deb,
    /// RPM/YUM repositories
    Rpm,
    /// Rubygems indexes
    Gem,
}

impl RepoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoType::Deb => "deb",
            RepoType::Rpm => "rpm",
            RepoType::Gem => "gem",
        }
    }
}

impl FromStr for RepoType {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deb" => Ok(RepoType::Deb),
            "rpm" => Ok(RepoType::Rpm),
            "gem" => Ok(RepoType::Gem),
            other => Err(ProvisionError::UnknownRepositoryType {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for RepoType {
    type Error = ProvisionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<RepoType> for String {
    fn from(t: RepoType) -> String {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for RepoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single repository to provision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySpec {
    /// Qualified repository identifier, e.g. "acme/tools"
    pub name: String,

    /// Packaging ecosystem
    #[serde(rename = "type")]
    pub repo_type: RepoType,

    /// Master token used to negotiate a scoped read token.
    /// Absent for repositories that allow unauthenticated access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_token: Option<String>,
}

impl RepositorySpec {
    /// Create a spec, validating the declared type up front.
    ///
    /// An unrecognized type fails here, before any provisioner exists to
    /// issue network calls.
    pub fn new(
        name: impl Into<String>,
        repo_type: &str,
        master_token: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            repo_type: repo_type.parse()?,
            master_token: master_token.filter(|t| !t.is_empty()),
        })
    }

    /// Filesystem-safe identifier derived from the repository name
    /// ("acme/tools" becomes "acme_tools")
    pub fn file_stem(&self) -> String {
        self.name.replacen('/', "_", 1)
    }
}

/// Provisioning manifest: the set of repositories to configure on a host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionManifest {
    #[serde(default)]
    pub repositories: Vec<RepositorySpec>,
}

impl ProvisionManifest {
    /// Load a manifest from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_yaml::from_str(&content)?;
        Ok(manifest)
    }
}
