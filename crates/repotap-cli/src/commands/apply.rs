//! Provision every repository in a manifest
//!
//! Failures are isolated per spec: one repository failing to provision
//! does not abort or corrupt the others. The command exits non-zero if
//! any entry failed.

use std::path::Path;

use crate::error::{CliError, Result};
use repotap_core::{HostIdentity, ProvisionManifest, Provisioner, ServiceEndpoint};

pub async fn run(manifest_path: &Path, identity: HostIdentity, endpoint: &str) -> Result<()> {
    let manifest = ProvisionManifest::load_from(manifest_path)?;

    if manifest.repositories.is_empty() {
        println!("No repositories in manifest.");
        return Ok(());
    }

    let endpoint = ServiceEndpoint::new(endpoint)?;
    let provisioner = Provisioner::new(endpoint)?;

    let total = manifest.repositories.len();
    let mut failed = 0;

    println!("{:<6} {:<30} URL", "TYPE", "NAME");
    for spec in &manifest.repositories {
        match provisioner.provision(spec, &identity).await {
            Ok(repo) => {
                println!("{:<6} {:<30} {}", repo.repo_type, repo.name, repo.url);
            }
            Err(e) => {
                eprintln!("{}: {}", spec.name, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::PartialFailure { failed, total });
    }

    Ok(())
}
