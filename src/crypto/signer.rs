//! RSASSA-PKCS1-v1_5 signing over SHA-256, the only signature scheme ACME
//! JWS envelopes in this client use.

use crate::error::{AcmeError, Result};
use rsa::pkcs1v15::Pkcs1v15Sign;
use rsa::RsaPrivateKey;
use sha2::{Digest, Sha256};

/// Signs `message` with `private_key` using RSASSA-PKCS1-v1_5 over SHA-256.
pub fn sign_rs256(private_key: &RsaPrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    let digest = Sha256::digest(message);
    private_key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| AcmeError::crypto(format!("RS256 signing failed: {e}")))
}
