/// Account key management: the RSA key identifying the ACME account, kept as
/// a distinct type from [`crate::certificate::CertificateKey`] so a signing
/// path can never reach for the wrong key.
use crate::crypto::{JwkComponents, RsaKeyMaterial, MIN_KEY_BITS};
use crate::error::Result;
use std::fs;
use std::path::Path;

pub struct AccountKey(RsaKeyMaterial);

impl AccountKey {
    /// Generate a new RSA account key of at least [`MIN_KEY_BITS`] bits.
    pub fn generate(bits: usize) -> Result<Self> {
        Ok(Self(RsaKeyMaterial::generate(bits)?))
    }

    /// Parse an existing PKCS#1 PEM-encoded RSA private key as the account key.
    pub fn from_pem(pem_str: &str) -> Result<Self> {
        Ok(Self(RsaKeyMaterial::from_pem(pem_str)?))
    }

    /// Save the account key to a PEM file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.0.pem())?;
        Ok(())
    }

    /// Load an account key from a PEM file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_pem(&content)
    }

    pub fn serialize_pem(&self) -> String {
        self.0.pem().to_string()
    }

    pub fn jwk_components(&self) -> &JwkComponents {
        self.0.jwk_components()
    }

    pub(crate) fn material(&self) -> &RsaKeyMaterial {
        &self.0
    }
}
