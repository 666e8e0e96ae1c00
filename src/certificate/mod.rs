//! Certificate key management and chain/PEM assembly.

pub mod chain;
pub mod key;

pub use chain::CertificateChain;
pub use key::CertificateKey;
