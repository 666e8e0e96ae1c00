/// DNS-01 provider contract: the injected capability that publishes and
/// retracts the `_acme-challenge.<domain>` TXT record.
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;

/// Publishes and retracts the TXT record that proves domain control.
///
/// Implementations must not wait for DNS propagation themselves; the
/// authority's own validator retries, bounded by the caller's poll budget.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Publishes a TXT record at `_acme-challenge.<domain>.` with body `value`.
    /// Returns only after the provider API confirms acceptance.
    async fn create_auth_record(&self, domain: &str, value: &str) -> Result<()>;

    /// Removes the record created by `create_auth_record`. Idempotent.
    async fn delete_auth_record(&self, domain: &str, value: &str) -> Result<()>;
}

/// In-memory provider for tests: tracks live records and every call made,
/// so a test can assert cleanup ran exactly once with the expected value.
pub struct MockDnsProvider {
    records: Arc<RwLock<HashSet<(String, String)>>>,
    creates: Arc<RwLock<Vec<(String, String)>>>,
    deletes: Arc<RwLock<Vec<(String, String)>>>,
    fail_create: bool,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashSet::new())),
            creates: Arc::new(RwLock::new(Vec::new())),
            deletes: Arc::new(RwLock::new(Vec::new())),
            fail_create: false,
        }
    }

    /// A provider whose `create_auth_record` always fails, for testing S6.
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::new()
        }
    }

    pub async fn create_calls(&self) -> Vec<(String, String)> {
        self.creates.read().await.clone()
    }

    pub async fn delete_calls(&self) -> Vec<(String, String)> {
        self.deletes.read().await.clone()
    }

    pub async fn has_record(&self, domain: &str, value: &str) -> bool {
        self.records
            .read()
            .await
            .contains(&(domain.to_string(), value.to_string()))
    }
}

impl Default for MockDnsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    async fn create_auth_record(&self, domain: &str, value: &str) -> Result<()> {
        if self.fail_create {
            return Err(crate::error::AcmeError::provider(format!(
                "mock provider refused to create record for {domain}"
            )));
        }
        self.creates
            .write()
            .await
            .push((domain.to_string(), value.to_string()));
        self.records
            .write()
            .await
            .insert((domain.to_string(), value.to_string()));
        Ok(())
    }

    async fn delete_auth_record(&self, domain: &str, value: &str) -> Result<()> {
        self.deletes
            .write()
            .await
            .push((domain.to_string(), value.to_string()));
        self.records
            .write()
            .await
            .remove(&(domain.to_string(), value.to_string()));
        Ok(())
    }
}
