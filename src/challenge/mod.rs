/// DNS-01 challenge state machine: provisions the TXT record, notifies the
/// authority, polls for a terminal status, and always retracts the record.
use std::time::Duration;

use crate::account::AccountManager;
use crate::crypto::Sha256Hash;
use crate::error::{AcmeError, Result};
use crate::events::EventSink;
use crate::order::{Authorization, OrderManager};

pub mod dns01;

pub use dns01::{DnsProvider, MockDnsProvider};

/// Terminal outcome of polling a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    Valid,
    Invalid,
    TimedOut,
}

/// Computes the DNS-01 TXT record value from a key authorization:
/// `b64url_nopad(sha256(key_authorization))`.
pub fn dns_txt_value(key_authorization: &str) -> Result<String> {
    Sha256Hash::hash_base64(key_authorization.as_bytes())
}

/// Drives a single authorization through CHALLENGE_READY -> ... -> a terminal
/// state, per the state machine: NEW -> CHALLENGE_READY -> PROVISIONED ->
/// NOTIFIED -> POLLING -> (VALID | INVALID | TIMEOUT) -> CLEANED/FAILED.
pub struct ChallengeDriver<'a> {
    order_manager: &'a OrderManager<'a>,
    account_manager: &'a AccountManager<'a>,
    provider: &'a dyn DnsProvider,
    wait_period: Duration,
    max_polls: u32,
    event_sink: &'a dyn EventSink,
}

impl<'a> ChallengeDriver<'a> {
    pub fn new(
        order_manager: &'a OrderManager<'a>,
        account_manager: &'a AccountManager<'a>,
        provider: &'a dyn DnsProvider,
        wait_period: Duration,
        max_polls: u32,
        event_sink: &'a dyn EventSink,
    ) -> Self {
        Self {
            order_manager,
            account_manager,
            provider,
            wait_period,
            max_polls,
            event_sink,
        }
    }

    /// Solves the `dns-01` challenge in `authorization` for `domain`. The
    /// DNS record is retracted on every terminal path, including early
    /// failures such as a missing challenge or a notify error.
    pub async fn solve(&self, domain: &str, authorization: &Authorization) -> Result<()> {
        let challenge = authorization
            .get_challenge("dns-01")
            .ok_or_else(|| AcmeError::NoMatchingChallenge("dns-01".to_string()))?;

        let key_authorization = self.account_manager.compute_key_authorization(&challenge.token)?;
        let txt_value = dns_txt_value(&key_authorization)?;
        let record_domain = format!("_acme-challenge.{domain}");

        self.provider
            .create_auth_record(&record_domain, &txt_value)
            .await?;

        let outcome = self.notify_and_poll(&challenge.url).await;

        if let Err(e) = self
            .provider
            .delete_auth_record(&record_domain, &txt_value)
            .await
        {
            self.event_sink.emit(
                "dns_record_cleanup_failed",
                &[("error", &e.to_string()), ("domain", &record_domain)],
            );
        }

        let (outcome, polls) = outcome?;
        match outcome {
            ChallengeOutcome::Valid => {
                self.event_sink.emit("challenge_valid", &[("domain", domain)]);
                Ok(())
            }
            ChallengeOutcome::Invalid => Err(AcmeError::ChallengeFailed {
                polls,
                detail: format!("authorization for {domain} concluded invalid"),
            }),
            ChallengeOutcome::TimedOut => Err(AcmeError::PollTimeout { polls }),
        }
    }

    async fn notify_and_poll(&self, challenge_url: &str) -> Result<(ChallengeOutcome, u32)> {
        self.order_manager.respond_to_challenge(challenge_url).await?;

        for attempt in 1..=self.max_polls {
            tokio::time::sleep(self.wait_period).await;

            let challenge = match self.order_manager.get_challenge(challenge_url).await {
                Ok(c) => c,
                Err(e) => {
                    self.event_sink.emit(
                        "challenge_poll_retry",
                        &[("error", &e.to_string()), ("attempt", &attempt.to_string())],
                    );
                    continue;
                }
            };

            match challenge.status.as_str() {
                "valid" => return Ok((ChallengeOutcome::Valid, attempt)),
                "invalid" => return Ok((ChallengeOutcome::Invalid, attempt)),
                _ => {
                    self.event_sink.emit(
                        "challenge_poll_pending",
                        &[("attempt", &attempt.to_string()), ("status", &challenge.status)],
                    );
                }
            }
        }

        Ok((ChallengeOutcome::TimedOut, self.max_polls))
    }
}
