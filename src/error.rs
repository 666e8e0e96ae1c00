/// Comprehensive error handling for the ACME client
use thiserror::Error;

/// Result type for ACME operations
pub type Result<T> = std::result::Result<T, AcmeError>;

/// Error types for ACME operations
#[derive(Error, Debug)]
pub enum AcmeError {
    /// Bad options at client construction: unreachable directory URL, non-RSA
    /// key supplied, or a key below the minimum bit length.
    #[error("configuration error: {0}")]
    Config(String),

    /// RSA key generation, PEM parsing, signing, or CSR assembly failure.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Network, TLS, or timeout failure talking to the authority.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response, missing nonce, or malformed JSON from the authority.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The authorization did not list a challenge of the requested type.
    #[error("no {0} challenge offered for this authorization")]
    NoMatchingChallenge(String),

    /// The authorization concluded with status "invalid" after `polls` polls.
    #[error("challenge failed at POLLING after {polls} polls: {detail}")]
    ChallengeFailed { polls: u32, detail: String },

    /// `max_polls` was exceeded without reaching a terminal status.
    #[error("poll timeout after {polls} polls")]
    PollTimeout { polls: u32 },

    /// The DNS provider failed to publish or retract the challenge record.
    #[error("DNS provider error: {0}")]
    Provider(String),

    /// IO error (PEM file access, account-key persistence).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PEM encoding/decoding error.
    #[error("PEM error: {0}")]
    Pem(#[from] pem::PemError),
}

impl AcmeError {
    /// Create a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AcmeError::Config(msg.into())
    }

    /// Create a crypto error.
    pub fn crypto<S: Into<String>>(msg: S) -> Self {
        AcmeError::Crypto(msg.into())
    }

    /// Create a protocol error.
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        AcmeError::Protocol(msg.into())
    }

    /// Create a provider error.
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        AcmeError::Provider(msg.into())
    }
}
