mod common;

use acmex::client::AcmeConfig;
use acmex::{AcmeClient, Contact, DnsProvider, MockDnsProvider};
use common::MockAcmeServer;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn issue_walks_the_full_acme_flow_against_a_mock_authority() {
    let mut mock = MockAcmeServer::new().await;
    let _directory_mock = mock.mock_directory().await;
    let _nonce_mock = mock.mock_new_nonce().await;
    let _account_mock = mock.mock_new_account().await;
    let _new_order_mock = mock.mock_new_order().await;
    let _authz_mock = mock.mock_authorization_dns01("/authz/1").await;
    let _challenge_mock = mock.mock_challenge_status("valid").await;
    // The order resource already reports `valid` with a certificate URL so the
    // same static mock serves both the pre- and post-finalize polls.
    let _order_poll_mock = mock.mock_order_valid("/authz/1", "/order/1/finalize", "/cert/1").await;
    let _finalize_mock = mock.mock_finalize().await;
    let _cert_mock = mock.mock_certificate_download("/cert/1").await;

    let config = AcmeConfig::new(format!("{}/directory", mock.url()))
        .with_contact(Contact::email("admin@example.com"))
        .with_tos_agreed(true)
        .with_challenge_wait(Duration::from_millis(1))
        .with_max_polls(3)
        .with_bits(2048);

    let provider: Arc<dyn DnsProvider> = Arc::new(MockDnsProvider::new());
    let mut client = AcmeClient::new("example.com", Arc::clone(&provider), config).expect("client construction");

    let bundle = client.issue().await.expect("issuance should succeed end-to-end");

    assert_eq!(bundle.domain, "example.com");
    assert!(bundle.certificate_pem.contains("BEGIN CERTIFICATE"));
    assert!(bundle.certificate_key_pem.contains("PRIVATE KEY"));
}

#[tokio::test]
async fn issue_surfaces_challenge_failure_without_ever_finalizing() {
    let mut mock = MockAcmeServer::new().await;
    let _directory_mock = mock.mock_directory().await;
    let _nonce_mock = mock.mock_new_nonce().await;
    let _account_mock = mock.mock_new_account().await;
    let _new_order_mock = mock.mock_new_order().await;
    let _authz_mock = mock.mock_authorization_dns01("/authz/1").await;
    let _challenge_mock = mock.mock_challenge_status("invalid").await;
    // No finalize/certificate mocks: if the client tried to finalize despite
    // the invalid challenge, the unmocked POST would surface as a different
    // (protocol) error and this assertion would fail.

    let config = AcmeConfig::new(format!("{}/directory", mock.url()))
        .with_contact(Contact::email("admin@example.com"))
        .with_tos_agreed(true)
        .with_challenge_wait(Duration::from_millis(1))
        .with_max_polls(3);

    let provider: Arc<dyn DnsProvider> = Arc::new(MockDnsProvider::new());
    let mut client = AcmeClient::new("example.com", provider, config).expect("client construction");

    let result = client.issue().await;
    assert!(matches!(result, Err(acmex::AcmeError::ChallengeFailed { .. })));
}
