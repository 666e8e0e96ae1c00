use mockito::Server;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

pub struct MockAcmeServer {
    pub server: mockito::ServerGuard,
}

impl MockAcmeServer {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        Self { server }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    pub async fn mock_directory(&mut self) -> mockito::Mock {
        let url = self.url();
        self.server
            .mock("GET", "/directory")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "newNonce": format!("{}/new-nonce", url),
                    "newAccount": format!("{}/new-account", url),
                    "newOrder": format!("{}/new-order", url),
                    "revokeCert": format!("{}/revoke-cert", url),
                    "keyChange": format!("{}/key-change", url),
                    "meta": {
                        "termsOfService": "https://example.com/tos"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    pub async fn mock_new_nonce(&mut self) -> mockito::Mock {
        self.server
            .mock("HEAD", "/new-nonce")
            .with_status(200)
            .with_header("replay-nonce", "test-nonce-123")
            .create_async()
            .await
    }

    pub async fn mock_new_account(&mut self) -> mockito::Mock {
        self.server
            .mock("POST", "/new-account")
            .with_status(201)
            .with_header("location", &format!("{}/account/1", self.url()))
            .with_header("replay-nonce", "nonce-after-account")
            .with_body(
                json!({
                    "status": "valid",
                    "contact": ["mailto:admin@example.com"],
                    "orders": format!("{}/account/1/orders", self.url())
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    /// A 409 Conflict response, as an authority returns when the account key
    /// is already registered. RFC 8555 treats this the same as a fresh 201.
    pub async fn mock_new_account_conflict(&mut self) -> mockito::Mock {
        self.server
            .mock("POST", "/new-account")
            .with_status(409)
            .with_header("location", &format!("{}/account/1", self.url()))
            .with_body(
                json!({
                    "status": "valid",
                    "contact": ["mailto:admin@example.com"],
                    "orders": format!("{}/account/1/orders", self.url())
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    /// A static order resource that is already `valid` with a certificate
    /// URL, so the same mock can serve the pre- and post-finalize polls.
    pub async fn mock_order_valid(&mut self, authz_path: &str, finalize_path: &str, cert_path: &str) -> mockito::Mock {
        let url = self.url();
        self.server
            .mock("POST", "/order/1")
            .with_status(200)
            .with_header("replay-nonce", "nonce-after-order-poll")
            .with_body(
                json!({
                    "status": "valid",
                    "expires": "2026-02-10T00:00:00Z",
                    "identifiers": [{"type": "dns", "value": "example.com"}],
                    "authorizations": [format!("{}{}", url, authz_path)],
                    "finalize": format!("{}{}", url, finalize_path),
                    "certificate": format!("{}{}", url, cert_path),
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    pub async fn mock_new_order(&mut self) -> mockito::Mock {
        self.server
            .mock("POST", "/new-order")
            .with_status(201)
            .with_header("location", &format!("{}/order/1", self.url()))
            .with_header("replay-nonce", "nonce-after-new-order")
            .with_body(
                json!({
                    "status": "valid",
                    "expires": "2026-02-10T00:00:00Z",
                    "identifiers": [{"type": "dns", "value": "example.com"}],
                    "authorizations": [format!("{}/authz/1", self.url())],
                    "finalize": format!("{}/order/1/finalize", self.url()),
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    pub async fn mock_authorization_dns01(&mut self, path: &str) -> mockito::Mock {
        let url = self.url();
        self.server
            .mock("POST", path)
            .with_status(200)
            .with_header("replay-nonce", "nonce-after-authz")
            .with_body(
                json!({
                    "identifier": {"type": "dns", "value": "example.com"},
                    "status": "pending",
                    "expires": "2026-02-10T00:00:00Z",
                    "challenges": [
                        {
                            "type": "dns-01",
                            "url": format!("{}/challenge/1", url),
                            "status": "pending",
                            "token": "test-token",
                        }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    pub async fn mock_authorization_http01_only(&mut self, path: &str) -> mockito::Mock {
        let url = self.url();
        self.server
            .mock("POST", path)
            .with_status(200)
            .with_body(
                json!({
                    "identifier": {"type": "dns", "value": "example.com"},
                    "status": "pending",
                    "expires": "2026-02-10T00:00:00Z",
                    "challenges": [
                        {
                            "type": "http-01",
                            "url": format!("{}/challenge/1", url),
                            "status": "pending",
                            "token": "test-token",
                        }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    /// Serves both the notify POST and every subsequent poll with `status`.
    pub async fn mock_challenge_status(&mut self, status: &str) -> mockito::Mock {
        self.server
            .mock("POST", "/challenge/1")
            .with_status(200)
            .with_header("replay-nonce", "nonce-after-challenge")
            .with_body(
                json!({
                    "type": "dns-01",
                    "url": format!("{}/challenge/1", self.url()),
                    "status": status,
                    "token": "test-token",
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    /// Serves `pending` for the first `pending_calls` requests to the
    /// challenge resource, then `final_status` on every call after that.
    /// Exercises the mid-loop retry branch of `notify_and_poll`.
    pub async fn mock_challenge_status_sequence(&mut self, pending_calls: u32, final_status: &str) -> mockito::Mock {
        let calls = Arc::new(AtomicU32::new(0));
        let challenge_url = format!("{}/challenge/1", self.url());
        let final_status = final_status.to_string();
        self.server
            .mock("POST", "/challenge/1")
            .with_status(200)
            .with_header("replay-nonce", "nonce-after-challenge")
            .with_body_from_request(move |_request| {
                let seen = calls.fetch_add(1, Ordering::SeqCst);
                let status = if seen < pending_calls { "pending" } else { final_status.as_str() };
                json!({
                    "type": "dns-01",
                    "url": challenge_url,
                    "status": status,
                    "token": "test-token",
                })
                .to_string()
                .into_bytes()
            })
            .create_async()
            .await
    }

    /// Serves `pending` for the first `pending_calls` requests to the order
    /// resource, then `final_status` (with a certificate URL) on every call
    /// after that. Exercises the mid-loop retry branch of `poll_order`.
    pub async fn mock_order_status_sequence(
        &mut self,
        pending_calls: u32,
        final_status: &str,
        authz_path: &str,
        finalize_path: &str,
        cert_path: &str,
    ) -> mockito::Mock {
        let calls = Arc::new(AtomicU32::new(0));
        let url = self.url();
        let final_status = final_status.to_string();
        let authz_path = authz_path.to_string();
        let finalize_path = finalize_path.to_string();
        let cert_path = cert_path.to_string();
        self.server
            .mock("POST", "/order/1")
            .with_status(200)
            .with_header("replay-nonce", "nonce-after-order-poll")
            .with_body_from_request(move |_request| {
                let seen = calls.fetch_add(1, Ordering::SeqCst);
                let status = if seen < pending_calls { "pending" } else { final_status.as_str() };
                json!({
                    "status": status,
                    "expires": "2026-02-10T00:00:00Z",
                    "identifiers": [{"type": "dns", "value": "example.com"}],
                    "authorizations": [format!("{}{}", url, authz_path)],
                    "finalize": format!("{}{}", url, finalize_path),
                    "certificate": format!("{}{}", url, cert_path),
                })
                .to_string()
                .into_bytes()
            })
            .create_async()
            .await
    }

    pub async fn mock_finalize(&mut self) -> mockito::Mock {
        self.server
            .mock("POST", "/order/1/finalize")
            .with_status(200)
            .with_header("replay-nonce", "nonce-after-finalize")
            .with_body(
                json!({
                    "status": "valid",
                    "expires": "2026-02-10T00:00:00Z",
                    "identifiers": [{"type": "dns", "value": "example.com"}],
                    "authorizations": [format!("{}/authz/1", self.url())],
                    "finalize": format!("{}/order/1/finalize", self.url()),
                    "certificate": format!("{}/cert/1", self.url()),
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    pub async fn mock_certificate_download(&mut self, path: &str) -> mockito::Mock {
        self.server
            .mock("POST", path)
            .with_status(200)
            .with_header("content-type", "application/pem-certificate-chain")
            .with_body(
                "-----BEGIN CERTIFICATE-----\nZmFrZS1sZWFmLWNlcnRpZmljYXRlLWJvZHk=\n-----END CERTIFICATE-----\n\
                 -----BEGIN CERTIFICATE-----\nZmFrZS1pc3N1ZXItY2VydGlmaWNhdGUtYm9keQ==\n-----END CERTIFICATE-----\n",
            )
            .create_async()
            .await
    }
}
