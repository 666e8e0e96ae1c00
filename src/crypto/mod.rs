//! Crypto primitives: RSA key generation, PEM/base64url/hex encoding, SHA-256
//! hashing, RS256 signing, and PKCS#10 CSR assembly.

pub mod csr;
pub mod encoding;
pub mod hash;
pub mod keypair;
pub mod signer;

pub use csr::build_csr;
pub use encoding::{Base64Encoding, HexEncoding, PemEncoding};
pub use hash::{HashAlgorithm, Sha256Hash};
pub use keypair::{JwkComponents, RsaKeyMaterial, MIN_KEY_BITS};
pub use signer::sign_rs256;
