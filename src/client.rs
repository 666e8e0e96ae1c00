/// High-level ACME client: orchestrates account registration, order
/// creation, DNS-01 challenge solving, finalization, and certificate
/// download into a single `issue`/`renew` call.
use crate::account::{AccountKey, AccountManager};
use crate::certificate::CertificateKey;
use crate::challenge::{ChallengeDriver, DnsProvider};
use crate::crypto::MIN_KEY_BITS;
use crate::error::{AcmeError, Result};
use crate::events::{EventSink, TracingEventSink};
use crate::order::{NewOrderRequest, OrderManager};
use crate::protocol::{DirectoryManager, NonceManager};
use crate::types::{Contact, Identifier};
use std::sync::Arc;
use std::time::Duration;

/// Well-known Let's Encrypt production directory.
pub const LETS_ENCRYPT_DIRECTORY: &str = "https://acme-v02.api.letsencrypt.org/directory";
/// Well-known Let's Encrypt staging directory.
pub const LETS_ENCRYPT_STAGING_DIRECTORY: &str = "https://acme-staging-v02.api.letsencrypt.org/directory";

/// Construction options for [`AcmeClient`]. Not a file-backed configuration
/// system — just a builder over the handful of knobs the orchestrator needs.
#[derive(Clone)]
pub struct AcmeConfig {
    pub directory_url: String,
    pub contacts: Vec<Contact>,
    pub terms_of_service_agreed: bool,
    pub bits: usize,
    pub request_timeout: Duration,
    pub challenge_wait: Duration,
    pub max_polls: u32,
}

impl AcmeConfig {
    pub fn new(directory_url: impl Into<String>) -> Self {
        Self {
            directory_url: directory_url.into(),
            contacts: Vec::new(),
            terms_of_service_agreed: false,
            bits: MIN_KEY_BITS,
            request_timeout: Duration::from_secs(65),
            challenge_wait: Duration::from_secs(4),
            max_polls: 15,
        }
    }

    pub fn lets_encrypt() -> Self {
        Self::new(LETS_ENCRYPT_DIRECTORY)
    }

    pub fn lets_encrypt_staging() -> Self {
        Self::new(LETS_ENCRYPT_STAGING_DIRECTORY)
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contacts.push(contact);
        self
    }

    pub fn with_tos_agreed(mut self, agreed: bool) -> Self {
        self.terms_of_service_agreed = agreed;
        self
    }

    pub fn with_bits(mut self, bits: usize) -> Self {
        self.bits = bits;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_challenge_wait(mut self, wait: Duration) -> Self {
        self.challenge_wait = wait;
        self
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }
}

/// Drives a single domain from account registration through a downloaded
/// certificate bundle. One client is bound to one domain at construction.
pub struct AcmeClient {
    domain: String,
    config: AcmeConfig,
    http_client: reqwest::Client,
    account_key: AccountKey,
    account_id: Option<String>,
    certificate_key_pem: Option<String>,
    dns_provider: Arc<dyn DnsProvider>,
    event_sink: Arc<dyn EventSink>,
}

impl AcmeClient {
    /// Builds a client for `domain`, generating a fresh account key.
    pub fn new(domain: impl Into<String>, dns_provider: Arc<dyn DnsProvider>, config: AcmeConfig) -> Result<Self> {
        let account_key = AccountKey::generate(config.bits)?;
        Self::with_account_key(domain, dns_provider, config, account_key)
    }

    /// Builds a client reusing a caller-supplied account key (for renewal).
    pub fn with_account_key(
        domain: impl Into<String>,
        dns_provider: Arc<dyn DnsProvider>,
        config: AcmeConfig,
        account_key: AccountKey,
    ) -> Result<Self> {
        let user_agent = format!(
            "acmex/{} ({} {})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH,
        );
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AcmeError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            domain: domain.into(),
            config,
            http_client,
            account_key,
            account_id: None,
            certificate_key_pem: None,
            dns_provider,
            event_sink: Arc::new(TracingEventSink),
        })
    }

    /// Overrides the default `tracing`-backed event sink.
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    /// PEM encoding of the account's private key.
    pub fn account_key(&self) -> String {
        self.account_key.serialize_pem()
    }

    /// PEM encoding of the most recently issued certificate's private key.
    /// `None` until the first successful `issue`/`renew` call.
    pub fn certificate_key(&self) -> Option<String> {
        self.certificate_key_pem.clone()
    }

    async fn ensure_registered(&mut self, account_mgr: &AccountManager<'_>) -> Result<String> {
        if let Some(id) = &self.account_id {
            return Ok(id.clone());
        }

        let account = account_mgr
            .register(&self.config.contacts, self.config.terms_of_service_agreed)
            .await?;
        self.event_sink.emit("account_registered", &[("account_id", &account.id)]);
        self.account_id = Some(account.id.clone());
        Ok(account.id)
    }

    /// Runs the end-to-end issuance procedure described in the orchestrator
    /// design: register (if needed), order, solve the DNS-01 challenge for
    /// every listed authorization, finalize, and download the certificate.
    pub async fn issue(&mut self) -> Result<CertificateBundle> {
        let dir_mgr = DirectoryManager::new(&self.config.directory_url, self.http_client.clone());
        let directory = dir_mgr.get().await?;
        let nonce_mgr = NonceManager::new(&directory.new_nonce, self.http_client.clone());
        let account_mgr = AccountManager::new(&self.account_key, &nonce_mgr, &dir_mgr, &self.http_client);

        let account_id = self.ensure_registered(&account_mgr).await?;

        let order_mgr = OrderManager::new(
            &account_mgr,
            &dir_mgr,
            &nonce_mgr,
            &self.http_client,
            account_id,
            self.event_sink.as_ref(),
        );

        let order_req = NewOrderRequest::new(vec![self.domain.clone()]);
        let (order_url, order) = order_mgr.create_order(&order_req).await?;
        self.event_sink.emit("order_created", &[("domain", &self.domain)]);

        let challenge_driver = ChallengeDriver::new(
            &order_mgr,
            &account_mgr,
            self.dns_provider.as_ref(),
            self.config.challenge_wait,
            self.config.max_polls,
            self.event_sink.as_ref(),
        );

        for auth_url in &order.authorizations {
            let authorization = order_mgr.get_authorization(auth_url).await?;
            challenge_driver.solve(&self.domain, &authorization).await?;
        }

        let ready_order = order_mgr
            .poll_order(&order_url, self.config.max_polls, self.config.challenge_wait)
            .await?;
        if ready_order.status != "ready" && ready_order.status != "valid" {
            return Err(AcmeError::protocol(format!(
                "order not ready for finalization: status={}",
                ready_order.status
            )));
        }

        let certificate_key = CertificateKey::generate(self.config.bits)?;
        let csr_der = certificate_key.build_csr(&self.domain)?;

        order_mgr.finalize_order(&ready_order.finalize, &csr_der).await?;

        let finalized = order_mgr
            .poll_order(&order_url, self.config.max_polls, self.config.challenge_wait)
            .await?;
        if finalized.status != "valid" {
            return Err(AcmeError::protocol(format!(
                "order not valid after finalization: status={}",
                finalized.status
            )));
        }

        let certificate_url = finalized
            .certificate
            .ok_or_else(|| AcmeError::protocol("finalized order has no certificate URL"))?;
        let certificate_pem = order_mgr.download_certificate(&certificate_url).await?;
        self.event_sink.emit("certificate_issued", &[("domain", &self.domain)]);

        let certificate_key_pem = certificate_key.serialize_pem();
        self.certificate_key_pem = Some(certificate_key_pem.clone());

        Ok(CertificateBundle {
            certificate_pem,
            certificate_key_pem,
            domain: self.domain.clone(),
        })
    }

    /// Structurally identical to `issue`; the authority treats a request
    /// over the same name, reusing the same account key, as a renewal.
    pub async fn renew(&mut self) -> Result<CertificateBundle> {
        self.issue().await
    }
}

/// Identifier helper, kept for callers assembling multi-name orders by hand.
pub fn dns_identifier(domain: &str) -> Identifier {
    Identifier::dns(domain)
}

/// The issued certificate chain plus the key it was requested under.
#[derive(Debug, Clone)]
pub struct CertificateBundle {
    /// Leaf certificate plus issuer chain, PEM-encoded.
    pub certificate_pem: String,
    /// The certificate's private key, PEM-encoded.
    pub certificate_key_pem: String,
    pub domain: String,
}
