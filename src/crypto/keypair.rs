//! RSA key pair generation and the big-endian components needed to build a JWK.

use crate::error::{AcmeError, Result};
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;

/// Minimum RSA modulus size this client will generate or accept.
pub const MIN_KEY_BITS: usize = 2048;

/// Big-endian, sign-byte-stripped modulus and public exponent of an RSA key,
/// ready for base64url encoding into a JWK's `n`/`e` members.
#[derive(Debug, Clone)]
pub struct JwkComponents {
    pub n: Vec<u8>,
    pub e: Vec<u8>,
}

/// A generated or parsed RSA key together with its PEM form and JWK components.
///
/// This is the shared representation behind both [`crate::account::AccountKey`]
/// and [`crate::certificate::CertificateKey`] — two distinct newtypes wrap it so
/// a signing path cannot accidentally reach for the wrong key.
pub struct RsaKeyMaterial {
    pem: String,
    private_key: RsaPrivateKey,
    jwk: JwkComponents,
}

impl RsaKeyMaterial {
    /// Generates a fresh RSA private key of at least [`MIN_KEY_BITS`] bits.
    pub fn generate(bits: usize) -> Result<Self> {
        if bits < MIN_KEY_BITS {
            return Err(AcmeError::config(format!(
                "RSA key size {bits} is below the minimum of {MIN_KEY_BITS} bits"
            )));
        }
        let private_key = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|e| AcmeError::crypto(format!("RSA key generation failed: {e}")))?;
        Self::from_private_key(private_key)
    }

    /// Parses a PKCS#1 PEM-encoded RSA private key.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs1_pem(pem)
            .map_err(|e| AcmeError::crypto(format!("failed to parse RSA private key: {e}")))?;
        Self::from_private_key(private_key)
    }

    fn from_private_key(private_key: RsaPrivateKey) -> Result<Self> {
        let pem = private_key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| AcmeError::crypto(format!("PEM encoding failed: {e}")))?
            .to_string();
        let public = private_key.to_public_key();
        let jwk = JwkComponents {
            n: strip_leading_zero(public.n().to_bytes_be()),
            e: strip_leading_zero(public.e().to_bytes_be()),
        };
        Ok(Self {
            pem,
            private_key,
            jwk,
        })
    }

    pub fn pem(&self) -> &str {
        &self.pem
    }

    pub fn jwk_components(&self) -> &JwkComponents {
        &self.jwk
    }

    pub(crate) fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }
}

/// `BigUint::to_bytes_be` never emits a leading sign byte, but a stray one
/// would corrupt the big-endian JWK interpretation, so strip it defensively.
fn strip_leading_zero(mut bytes: Vec<u8>) -> Vec<u8> {
    while bytes.len() > 1 && bytes[0] == 0 {
        bytes.remove(0);
    }
    bytes
}
