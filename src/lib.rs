//! # AcmeX - ACME v2 Client Library
//!
//! A focused Rust library for obtaining DNS-01 validated certificates from
//! an ACME v2 (RFC 8555) authority such as Let's Encrypt.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use acmex::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> acmex::Result<()> {
//!     let provider: Arc<dyn DnsProvider> = Arc::new(MockDnsProvider::new());
//!     let config = AcmeConfig::lets_encrypt_staging()
//!         .with_contact(Contact::email("admin@example.com"))
//!         .with_tos_agreed(true);
//!
//!     let mut client = AcmeClient::new("example.com", provider, config)?;
//!     let bundle = client.issue().await?;
//!     println!("issued certificate for {}", bundle.domain);
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod certificate;
pub mod challenge;
pub mod client;
pub mod crypto;
pub mod error;
pub mod events;
pub mod order;
pub mod protocol;
pub mod types;

pub use account::{Account, AccountKey, AccountManager};
pub use certificate::{CertificateChain, CertificateKey};
pub use challenge::{ChallengeDriver, ChallengeOutcome, DnsProvider, MockDnsProvider};
pub use client::{AcmeClient, AcmeConfig, CertificateBundle};
pub use crypto::{build_csr, Base64Encoding, HexEncoding, PemEncoding, RsaKeyMaterial, Sha256Hash};
pub use error::{AcmeError, Result};
pub use events::{EventSink, TracingEventSink};
pub use order::{
    Authorization, Challenge, FinalizationRequest, NewOrderRequest, Order, OrderManager,
};
pub use protocol::{Directory, DirectoryManager, Jwk, JwsSigner, NonceManager};
pub use types::{AuthorizationStatus, ChallengeType, Contact, Identifier, OrderStatus};

/// Commonly used types, re-exported for a single glob import.
pub mod prelude {
    pub use crate::{
        AcmeClient, AcmeConfig, AcmeError, Account, AccountKey, AccountManager, CertificateBundle,
        CertificateChain, CertificateKey, ChallengeDriver, ChallengeOutcome, Contact, DnsProvider,
        EventSink, MockDnsProvider, Result, TracingEventSink,
        types::{AuthorizationStatus, ChallengeType, Identifier, OrderStatus},
    };
}
