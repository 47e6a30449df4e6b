//! Mediated pairing challenges (§4.2 style 2: one party offline).

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

fn random_challenge_payload() -> Vec<u8> {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.to_vec()
}

/// Injected capability (§9, alongside `PairingPolicy`): verifies a party's
/// response against the challenge payload recorded at `InitiateMediatedPairing`
/// time. Real signature checking (§6) is a host concern; the core only
/// guarantees the response is checked against the actual recorded challenge,
/// not merely present.
pub trait PairingResponseVerifier {
    fn verify(&self, challenge_payload: &[u8], response: &[u8]) -> bool;
}

/// A verifier that accepts any non-empty response, useful for tests and for
/// hosts that haven't wired a real signature-checking backend yet.
pub struct AcceptAnyResponse;

impl PairingResponseVerifier for AcceptAnyResponse {
    fn verify(&self, _challenge_payload: &[u8], response: &[u8]) -> bool {
        !response.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    Pending,
    Completed,
    Expired,
}

/// A pairing-challenge record bound to the responsive party and the proxy
/// that will relay their signed response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PairingChallenge {
    pub challenge_id: String,
    pub initiator: String,
    pub target: String,
    pub proxy: String,
    pub context: String,
    pub status: ChallengeStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Recorded at initiation, per §4.2: the material each response is
    /// later checked against.
    pub challenge_payload: Vec<u8>,
    pub initiator_response: Option<Vec<u8>>,
    pub target_response: Option<Vec<u8>>,
}

impl PairingChallenge {
    pub fn new(
        challenge_id: impl Into<String>,
        initiator: impl Into<String>,
        target: impl Into<String>,
        proxy: impl Into<String>,
        context: impl Into<String>,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            challenge_id: challenge_id.into(),
            initiator: initiator.into(),
            target: target.into(),
            proxy: proxy.into(),
            context: context.into(),
            status: ChallengeStatus::Pending,
            created_at,
            expires_at,
            challenge_payload: random_challenge_payload(),
            initiator_response: None,
            target_response: None,
        }
    }

    /// `current_time == expires_at` still fails (§8: pairing expiring
    /// exactly at `expires_at` fails closed, not open).
    pub fn is_expired_at(&self, current_time: DateTime<Utc>) -> bool {
        current_time >= self.expires_at
    }

    /// Both responses are present *and* each verifies against the recorded
    /// `challenge_payload`.
    pub fn responses_verify(&self, verifier: &dyn PairingResponseVerifier) -> bool {
        match (&self.initiator_response, &self.target_response) {
            (Some(i), Some(t)) => {
                verifier.verify(&self.challenge_payload, i) && verifier.verify(&self.challenge_payload, t)
            }
            _ => false,
        }
    }
}
