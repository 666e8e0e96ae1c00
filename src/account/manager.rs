/// Account registration and lifecycle against the ACME authority.
use crate::account::credentials::AccountKey;
use crate::error::{AcmeError, Result};
use crate::protocol::{DirectoryManager, Jwk, JwsSigner, NonceManager};
use crate::types::Contact;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Account information as returned by the authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account URL, used thereafter as the JWS `kid`.
    #[serde(default)]
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub contact: Vec<String>,
    #[serde(rename = "termsOfServiceAgreed", default)]
    pub terms_of_service_agreed: bool,
    #[serde(default)]
    pub orders: Option<String>,
}

/// Drives account registration and carries the signer every later request reuses.
pub struct AccountManager<'a> {
    signer: JwsSigner<'a>,
    jwk: Jwk,
    nonce_manager: &'a NonceManager,
    directory_manager: &'a DirectoryManager,
    http_client: &'a reqwest::Client,
}

impl<'a> AccountManager<'a> {
    pub fn new(
        key: &'a AccountKey,
        nonce_manager: &'a NonceManager,
        directory_manager: &'a DirectoryManager,
        http_client: &'a reqwest::Client,
    ) -> Self {
        let signer = JwsSigner::new(key.material().private_key());
        let jwk = Jwk::from_rsa_components(key.jwk_components());
        Self {
            signer,
            jwk,
            nonce_manager,
            directory_manager,
            http_client,
        }
    }

    /// Registers the account if needed. A 409 (already registered) is treated
    /// as success, matching an authority that recognizes the key from a prior run.
    pub async fn register(&self, contacts: &[Contact], terms_of_service_agreed: bool) -> Result<Account> {
        let directory = self.directory_manager.get().await?;
        let nonce = self.nonce_manager.get_nonce().await?;

        let contact_uris: Vec<String> = contacts.iter().map(Contact::to_uri).collect();
        let payload = json!({
            "termsOfServiceAgreed": terms_of_service_agreed,
            "contact": contact_uris,
        });

        let jws = self
            .signer
            .sign_with_jwk(&self.jwk, &directory.new_account, &nonce, &payload)?;

        let response = self
            .http_client
            .post(&directory.new_account)
            .header("Content-Type", "application/jose+json")
            .body(jws.to_json_string())
            .send()
            .await?;

        self.cache_nonce(&response).await;

        let status = response.status();
        if !status.is_success() && status.as_u16() != 409 {
            let detail = response.text().await.unwrap_or_default();
            return Err(AcmeError::protocol(format!(
                "account registration failed: HTTP {status}: {detail}"
            )));
        }

        let account_url = response
            .headers()
            .get("location")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| AcmeError::protocol("missing Location header in account response"))?;

        let mut account: Account = response.json().await.map_err(|e| {
            AcmeError::protocol(format!("failed to parse account response: {e}"))
        })?;
        account.id = account_url;
        Ok(account)
    }

    async fn cache_nonce(&self, response: &reqwest::Response) {
        if let Some(header) = response.headers().get("replay-nonce")
            && let Ok(nonce) = header.to_str()
        {
            self.nonce_manager.cache_nonce(nonce.to_string()).await;
        }
    }

    /// `key_authorization = token + "." + jwk_thumbprint`.
    pub fn compute_key_authorization(&self, token: &str) -> Result<String> {
        Ok(format!("{}.{}", token, self.jwk.thumbprint_sha256()?))
    }

    pub fn get_jwk_thumbprint(&self) -> Result<String> {
        self.jwk.thumbprint_sha256()
    }

    pub fn get_jwk(&self) -> &Jwk {
        &self.jwk
    }

    pub fn get_signer(&self) -> &JwsSigner<'a> {
        &self.signer
    }
}
