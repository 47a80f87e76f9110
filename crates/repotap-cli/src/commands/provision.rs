//! Provision a single repository

use crate::error::Result;
use repotap_core::{
    HostIdentity, ProvisionedRepository, Provisioner, RepositorySpec, ServiceEndpoint,
};

pub async fn run(
    name: &str,
    repo_type: &str,
    master_token: Option<String>,
    identity: HostIdentity,
    endpoint: &str,
    json: bool,
    render: bool,
) -> Result<()> {
    let spec = RepositorySpec::new(name, repo_type, master_token)?;
    let endpoint = ServiceEndpoint::new(endpoint)?;

    let provisioner = Provisioner::new(endpoint)?;
    let repo = provisioner.provision(&spec, &identity).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(&repo))?);
    } else if render {
        print!("{}", repo.render_native_config());
    } else {
        println!("{}", repo.url);
    }

    Ok(())
}

pub(crate) fn to_json(repo: &ProvisionedRepository) -> serde_json::Value {
    serde_json::json!({
        "name": repo.name,
        "type": repo.repo_type.as_str(),
        "distribution": repo.distribution,
        "url": repo.url.as_str(),
        "gpgKey": repo.gpg_key_url,
    })
}
