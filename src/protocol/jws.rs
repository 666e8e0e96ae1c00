/// Flattened JWS envelope construction for ACME requests, targeting the
/// RFC 8555 (ACME v2) wire shape: `url` always lives in the protected header,
/// `jwk` is present only for pre-registration requests, and `kid` (the
/// account URL) replaces it for every request after registration.
use crate::crypto::encoding::Base64Encoding;
use crate::crypto::signer::sign_rs256;
use crate::error::{AcmeError, Result};
use crate::protocol::jwk::Jwk;
use rsa::RsaPrivateKey;
use serde::Serialize;
use serde_json::{json, Value};

/// A flattened JWS object as ACME expects it on the wire: `protected`,
/// `payload`, and `signature`, all base64url-without-padding.
#[derive(Debug, Serialize)]
pub struct FlattenedJws {
    pub protected: String,
    pub payload: String,
    pub signature: String,
}

impl FlattenedJws {
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).expect("FlattenedJws always serializes")
    }
}

/// Signs ACME request bodies with an RSA account key under RS256.
pub struct JwsSigner<'a> {
    key: &'a RsaPrivateKey,
}

impl<'a> JwsSigner<'a> {
    pub fn new(key: &'a RsaPrivateKey) -> Self {
        Self { key }
    }

    /// Builds a request signed with the embedded JWK rather than a `kid` —
    /// the only request an account makes before it has an account URL.
    pub fn sign_with_jwk(&self, jwk: &Jwk, url: &str, nonce: &str, payload: &Value) -> Result<FlattenedJws> {
        let protected = json!({
            "alg": "RS256",
            "jwk": jwk.to_value(),
            "nonce": nonce,
            "url": url,
        });
        self.sign_flattened(&protected, &payload.to_string())
    }

    /// Builds a request signed with `kid` (the account URL), for every
    /// request after the account is registered.
    pub fn sign_with_kid(&self, kid: &str, url: &str, nonce: &str, payload: &Value) -> Result<FlattenedJws> {
        let protected = json!({
            "alg": "RS256",
            "kid": kid,
            "nonce": nonce,
            "url": url,
        });
        self.sign_flattened(&protected, &payload.to_string())
    }

    /// Builds a POST-as-GET request: same as [`Self::sign_with_kid`] but with
    /// the empty-string payload RFC 8555 requires for read-only fetches
    /// (authorization/order/challenge polling).
    pub fn sign_post_as_get(&self, kid: &str, url: &str, nonce: &str) -> Result<FlattenedJws> {
        let protected = json!({
            "alg": "RS256",
            "kid": kid,
            "nonce": nonce,
            "url": url,
        });
        self.sign_flattened(&protected, "")
    }

    fn sign_flattened(&self, protected: &Value, payload_json: &str) -> Result<FlattenedJws> {
        if protected.get("nonce").and_then(Value::as_str).unwrap_or_default().is_empty() {
            return Err(AcmeError::protocol("no nonce available to sign request"));
        }
        let protected_b64 = Base64Encoding::encode(protected.to_string().as_bytes());
        let payload_b64 = Base64Encoding::encode(payload_json.as_bytes());
        let signing_input = format!("{protected_b64}.{payload_b64}");
        let signature = sign_rs256(self.key, signing_input.as_bytes())?;
        Ok(FlattenedJws {
            protected: protected_b64,
            payload: payload_b64,
            signature: Base64Encoding::encode(&signature),
        })
    }
}
