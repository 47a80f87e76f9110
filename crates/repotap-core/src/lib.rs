//! repotap core provisioning client
//!
//! Provisions a host to trust and pull packages from a hosted,
//! packagecloud-style repository service across three packaging
//! ecosystems:
//!
//! - **deb**: APT repositories, addressed per platform and codename
//! - **rpm**: YUM repositories, base URL discovered from the service
//! - **gem**: Rubygems indexes, not distribution-qualified
//!
//! The interesting part is the credential negotiation: a long-lived
//! master token is exchanged for a short-lived read token scoped to the
//! requesting host, and the read token is embedded into the resolved
//! repository URL. The master token is only ever used to authenticate
//! the negotiation itself.
//!
//! ## Example
//!
//! ```rust,no_run
//! use repotap_core::{HostIdentity, Provisioner, RepositorySpec};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = RepositorySpec::new("acme/tools", "deb", Some("MASTER".into()))?;
//! let identity = HostIdentity::new("ubuntu", "focal", "20.04", "host1.example.com");
//!
//! let provisioner = Provisioner::with_default_endpoint()?;
//! let repo = provisioner.provision(&spec, &identity).await?;
//!
//! // Hand off to the package-manager configuration layer
//! println!("{}", repo.render_native_config());
//! # Ok(())
//! # }
//! ```
//!
//! Each provisioning run is one-shot and fail-fast: no token caching,
//! no retries, no partial state. Errors are structured
//! ([`ProvisionError`]) so callers can branch on failure kind.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod identity;
pub mod provision;
pub mod resolver;
pub mod token;
pub mod transport;

// Re-exports for convenience
pub use config::{ProvisionManifest, RepoType, RepositorySpec};
pub use endpoint::{DEFAULT_SERVICE_ROOT, ServiceEndpoint};
pub use error::{ProvisionError, Result};
pub use identity::HostIdentity;
pub use provision::{ProvisionedRepository, Provisioner};
pub use transport::{InstallParams, Transport};
