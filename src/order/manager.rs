use crate::account::AccountManager;
/// Order lifecycle management: creation, polling, finalization, and download.
use crate::error::{AcmeError, Result};
use crate::events::EventSink;
use crate::order::{Authorization, Challenge, NewOrderRequest, Order};
use crate::protocol::{DirectoryManager, NonceManager};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;
use std::time::Duration;

/// Drives an order from creation through certificate download.
///
/// Every request is POSTed as a flattened JWS signed with the account's `kid`;
/// GET-shaped requests (order/authorization/challenge polling, certificate
/// download) use POST-as-GET with an empty payload, per RFC 8555.
pub struct OrderManager<'a> {
    account_manager: &'a AccountManager<'a>,
    directory_manager: &'a DirectoryManager,
    nonce_manager: &'a NonceManager,
    http_client: &'a reqwest::Client,
    account_id: String,
    event_sink: &'a dyn EventSink,
}

impl<'a> OrderManager<'a> {
    pub fn new(
        account_manager: &'a AccountManager<'a>,
        directory_manager: &'a DirectoryManager,
        nonce_manager: &'a NonceManager,
        http_client: &'a reqwest::Client,
        account_id: String,
        event_sink: &'a dyn EventSink,
    ) -> Self {
        Self {
            account_manager,
            directory_manager,
            nonce_manager,
            http_client,
            account_id,
            event_sink,
        }
    }

    async fn cache_nonce(&self, response: &reqwest::Response) {
        if let Some(header) = response.headers().get("replay-nonce")
            && let Ok(nonce) = header.to_str()
        {
            self.nonce_manager.cache_nonce(nonce.to_string()).await;
        }
    }

    pub async fn create_order(&self, request: &NewOrderRequest) -> Result<(String, Order)> {
        let directory = self.directory_manager.get().await?;
        let nonce = self.nonce_manager.get_nonce().await?;

        let payload = json!(request);
        let jws = self.account_manager.get_signer().sign_with_kid(
            &self.account_id,
            &directory.new_order,
            &nonce,
            &payload,
        )?;

        let response = self
            .http_client
            .post(&directory.new_order)
            .header("Content-Type", "application/jose+json")
            .body(jws.to_json_string())
            .send()
            .await?;

        self.cache_nonce(&response).await;

        let order_url = response
            .headers()
            .get("location")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| AcmeError::protocol("missing Location header in order response"))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AcmeError::protocol(format!(
                "order creation failed: HTTP {status}: {detail}"
            )));
        }

        let order: Order = response
            .json()
            .await
            .map_err(|e| AcmeError::protocol(format!("failed to parse order: {e}")))?;

        self.event_sink.emit("order_resource_created", &[("order_url", &order_url)]);
        Ok((order_url, order))
    }

    /// POST-as-GET fetch, used for orders, authorizations, and challenge refresh.
    async fn post_as_get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let nonce = self.nonce_manager.get_nonce().await?;
        let jws = self
            .account_manager
            .get_signer()
            .sign_post_as_get(&self.account_id, url, &nonce)?;

        let response = self
            .http_client
            .post(url)
            .header("Content-Type", "application/jose+json")
            .body(jws.to_json_string())
            .send()
            .await?;

        self.cache_nonce(&response).await;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AcmeError::protocol(format!(
                "POST-as-GET {url} failed: HTTP {status}: {detail}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AcmeError::protocol(format!("failed to parse response from {url}: {e}")))
    }

    pub async fn get_order(&self, order_url: &str) -> Result<Order> {
        self.post_as_get(order_url).await
    }

    pub async fn get_authorization(&self, auth_url: &str) -> Result<Authorization> {
        self.post_as_get(auth_url).await
    }

    /// Refetches a single challenge resource (used while polling).
    pub async fn get_challenge(&self, challenge_url: &str) -> Result<Challenge> {
        self.post_as_get(challenge_url).await
    }

    /// Notifies the authority the challenge response is ready to be validated.
    pub async fn respond_to_challenge(&self, challenge_url: &str) -> Result<Challenge> {
        let nonce = self.nonce_manager.get_nonce().await?;
        let payload = json!({});
        let jws = self.account_manager.get_signer().sign_with_kid(
            &self.account_id,
            challenge_url,
            &nonce,
            &payload,
        )?;

        let response = self
            .http_client
            .post(challenge_url)
            .header("Content-Type", "application/jose+json")
            .body(jws.to_json_string())
            .send()
            .await?;

        self.cache_nonce(&response).await;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AcmeError::protocol(format!(
                "challenge notification failed: HTTP {status}: {detail}"
            )));
        }

        let challenge: Challenge = response
            .json()
            .await
            .map_err(|e| AcmeError::protocol(format!("failed to parse challenge: {e}")))?;

        self.event_sink
            .emit("challenge_response_submitted", &[("challenge_url", challenge_url)]);
        Ok(challenge)
    }

    /// Polls the order until it reaches `ready`, `valid`, or `invalid`, or the
    /// attempt budget is exhausted. A transport error during a single poll is
    /// treated as a transient failure of that attempt, not as order success.
    pub async fn poll_order(&self, order_url: &str, max_attempts: u32, interval: Duration) -> Result<Order> {
        for attempt in 1..=max_attempts {
            let order = match self.get_order(order_url).await {
                Ok(order) => order,
                Err(e) => {
                    self.event_sink.emit(
                        "order_poll_retry",
                        &[("error", &e.to_string()), ("attempt", &attempt.to_string())],
                    );
                    if attempt < max_attempts {
                        tokio::time::sleep(interval).await;
                    }
                    continue;
                }
            };

            match order.status.as_str() {
                "ready" | "valid" | "invalid" => {
                    self.event_sink.emit(
                        "order_poll_terminal",
                        &[("status", &order.status), ("attempt", &attempt.to_string())],
                    );
                    return Ok(order);
                }
                "pending" | "processing" => {
                    self.event_sink.emit("order_poll_pending", &[("attempt", &attempt.to_string())]);
                    if attempt < max_attempts {
                        tokio::time::sleep(interval).await;
                    }
                }
                other => {
                    return Err(AcmeError::protocol(format!("unexpected order status: {other}")));
                }
            }
        }

        Err(AcmeError::PollTimeout { polls: max_attempts })
    }

    pub async fn finalize_order(&self, finalize_url: &str, csr_der: &[u8]) -> Result<Order> {
        let nonce = self.nonce_manager.get_nonce().await?;
        let payload = json!({ "csr": URL_SAFE_NO_PAD.encode(csr_der) });
        let jws = self.account_manager.get_signer().sign_with_kid(
            &self.account_id,
            finalize_url,
            &nonce,
            &payload,
        )?;

        let response = self
            .http_client
            .post(finalize_url)
            .header("Content-Type", "application/jose+json")
            .body(jws.to_json_string())
            .send()
            .await?;

        self.cache_nonce(&response).await;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AcmeError::protocol(format!(
                "finalize failed: HTTP {status}: {detail}"
            )));
        }

        let order: Order = response
            .json()
            .await
            .map_err(|e| AcmeError::protocol(format!("failed to parse finalized order: {e}")))?;

        self.event_sink.emit("order_finalized", &[]);
        Ok(order)
    }

    /// Downloads the issued certificate, including any intermediates the
    /// authority bundled into the same PEM response.
    pub async fn download_certificate(&self, certificate_url: &str) -> Result<String> {
        let nonce = self.nonce_manager.get_nonce().await?;
        let jws = self
            .account_manager
            .get_signer()
            .sign_post_as_get(&self.account_id, certificate_url, &nonce)?;

        let response = self
            .http_client
            .post(certificate_url)
            .header("Content-Type", "application/jose+json")
            .body(jws.to_json_string())
            .send()
            .await?;

        self.cache_nonce(&response).await;

        let status = response.status();
        if !status.is_success() {
            return Err(AcmeError::protocol(format!(
                "certificate download failed: HTTP {status}"
            )));
        }

        let cert_pem = response
            .text()
            .await
            .map_err(|e| AcmeError::protocol(format!("failed to read certificate body: {e}")))?;

        self.event_sink.emit("certificate_downloaded", &[]);
        Ok(cert_pem)
    }
}
