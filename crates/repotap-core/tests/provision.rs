//! Integration tests for the provisioning pipeline against a mock service

use repotap_core::{
    HostIdentity, ProvisionError, Provisioner, RepositorySpec, ServiceEndpoint, Transport, token,
};
use url::Url;
use wiremock::matchers::{basic_auth, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn identity() -> HostIdentity {
    HostIdentity::new("ubuntu", "focal", "20.04", "host1.example.com")
}

async fn provisioner_for(server: &MockServer) -> Provisioner {
    let endpoint = ServiceEndpoint::new(&server.uri()).expect("mock server URI is a valid root");
    Provisioner::new(endpoint).expect("provisioner construction")
}

#[tokio::test]
async fn deb_provisioning_negotiates_read_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/install/repositories/acme/tools/tokens.text"))
        .and(basic_auth("M", ""))
        .and(body_string_contains("os=ubuntu"))
        .and(body_string_contains("dist=focal"))
        .and(body_string_contains("name=host1.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string("R1\n"))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RepositorySpec::new("acme/tools", "deb", Some("M".into())).unwrap();
    let repo = provisioner_for(&server)
        .await
        .provision(&spec, &identity())
        .await
        .unwrap();

    assert_eq!(repo.url.path(), "/acme/tools/ubuntu/");
    assert_eq!(repo.url.username(), "R1");
    assert_eq!(repo.url.password().unwrap_or(""), "");
    assert_eq!(repo.distribution.as_deref(), Some("focal"));
}

#[tokio::test]
async fn missing_master_token_skips_negotiation() {
    let server = MockServer::start().await;

    // No mocks mounted: any request would 404 and fail the run
    let spec = RepositorySpec::new("acme/tools", "deb", None).unwrap();
    let repo = provisioner_for(&server)
        .await
        .provision(&spec, &identity())
        .await
        .unwrap();

    assert_eq!(repo.url.username(), "");
    assert!(repo.url.password().is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn negotiate_without_token_returns_target_unchanged() {
    let server = MockServer::start().await;
    let endpoint = ServiceEndpoint::new(&server.uri()).unwrap();
    let transport = Transport::new().unwrap();

    let target = Url::parse("https://packagecloud.io/acme/tools/ubuntu/").unwrap();
    let result = token::negotiate(
        &transport,
        &endpoint,
        "acme/tools",
        Some("focal"),
        &identity(),
        None,
        target.clone(),
    )
    .await
    .unwrap();

    assert_eq!(result, target);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn read_token_is_trimmed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/install/repositories/acme/tools/tokens.text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  abc  \n"))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RepositorySpec::new("acme/tools", "deb", Some("M".into())).unwrap();
    let repo = provisioner_for(&server)
        .await
        .provision(&spec, &identity())
        .await
        .unwrap();

    assert_eq!(repo.url.username(), "abc");
}

#[tokio::test]
async fn rpm_resolves_base_url_before_negotiating() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/install/repositories/acme/tools/rpm_base_url"))
        .and(basic_auth("M", ""))
        .and(query_param("os", "ubuntu"))
        .and(query_param("dist", "20.04"))
        .and(query_param("name", "host1.example.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("https://packages.example.com/acme/tools/el/9/x86_64\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/install/repositories/acme/tools/tokens.text"))
        .and(basic_auth("M", ""))
        .and(body_string_contains("dist=20.04"))
        .respond_with(ResponseTemplate::new(200).set_body_string("R9\n"))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RepositorySpec::new("acme/tools", "rpm", Some("M".into())).unwrap();
    let repo = provisioner_for(&server)
        .await
        .provision(&spec, &identity())
        .await
        .unwrap();

    // Negotiation runs against the discovered base URL, with the
    // platform version (not the codename) as the distribution
    assert_eq!(repo.url.host_str(), Some("packages.example.com"));
    assert_eq!(repo.url.username(), "R9");
    assert_eq!(repo.distribution.as_deref(), Some("20.04"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.path().ends_with("/rpm_base_url"));
    assert!(requests[1].url.path().ends_with("/tokens.text"));
}

#[tokio::test]
async fn rpm_base_url_lookup_is_unauthenticated_without_master_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/install/repositories/acme/tools/rpm_base_url"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("https://packages.example.com/acme/tools/el/9/x86_64\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let spec = RepositorySpec::new("acme/tools", "rpm", None).unwrap();
    let repo = provisioner_for(&server)
        .await
        .provision(&spec, &identity())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));

    // Public repository: resolved base URL passes through untouched
    assert_eq!(repo.url.username(), "");
}

#[tokio::test]
async fn malformed_rpm_base_url_is_a_resolution_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/install/repositories/acme/tools/rpm_base_url"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not a url\n"))
        .mount(&server)
        .await;

    let spec = RepositorySpec::new("acme/tools", "rpm", Some("M".into())).unwrap();
    let err = provisioner_for(&server)
        .await
        .provision(&spec, &identity())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProvisionError::Resolution { ref body, .. } if body == "not a url"
    ));

    // Fail-fast: negotiation is never attempted after a failed lookup
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn gem_provisioning_omits_distribution() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/install/repositories/acme/tools/tokens.text"))
        .and(basic_auth("M", ""))
        .respond_with(ResponseTemplate::new(200).set_body_string("G1\n"))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RepositorySpec::new("acme/tools", "gem", Some("M".into())).unwrap();
    let repo = provisioner_for(&server)
        .await
        .provision(&spec, &identity())
        .await
        .unwrap();

    assert_eq!(repo.url.path(), "/acme/tools/");
    assert_eq!(repo.url.username(), "G1");
    assert!(repo.distribution.is_none());

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(!body.contains("dist="), "gem negotiation sent a dist: {body}");
}

#[tokio::test]
async fn negotiation_failure_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/install/repositories/acme/tools/tokens.text"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let spec = RepositorySpec::new("acme/tools", "deb", Some("BAD".into())).unwrap();
    let err = provisioner_for(&server)
        .await
        .provision(&spec, &identity())
        .await
        .unwrap_err();

    match err {
        ProvisionError::RemoteRequest { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "unauthorized");
        }
        other => panic!("expected RemoteRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_repository_type_fails_before_any_request() {
    let server = MockServer::start().await;

    let err = RepositorySpec::new("acme/tools", "pip", Some("M".into())).unwrap_err();
    assert!(matches!(
        err,
        ProvisionError::UnknownRepositoryType { ref value } if value == "pip"
    ));

    // An invalid type never produces a spec, so nothing can reach the wire
    assert!(server.received_requests().await.unwrap().is_empty());
}
