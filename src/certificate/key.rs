/// Certificate key management: the RSA key a CSR is built and signed with.
/// Kept distinct from [`crate::account::AccountKey`] so a signing path can
/// never reach for the wrong key — generated fresh for every issuance.
use crate::crypto::{build_csr, RsaKeyMaterial, MIN_KEY_BITS};
use crate::error::Result;

pub struct CertificateKey(RsaKeyMaterial);

impl CertificateKey {
    /// Generate a new RSA certificate key of at least [`MIN_KEY_BITS`] bits.
    pub fn generate(bits: usize) -> Result<Self> {
        Ok(Self(RsaKeyMaterial::generate(bits)?))
    }

    pub fn serialize_pem(&self) -> String {
        self.0.pem().to_string()
    }

    /// Builds a PKCS#10 CSR for `domain`, signed with this key.
    pub fn build_csr(&self, domain: &str) -> Result<Vec<u8>> {
        build_csr(domain, self.0.private_key())
    }
}
