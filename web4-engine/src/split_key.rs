//! Split-key custody for pairings (§3, §9 "byte-slice hygiene for split
//! keys"). Pairing produces two 32-byte halves; neither half alone reveals
//! the combined session key. Combination happens only at activation, and
//! every byte buffer is zeroed before the owning handler returns.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use web4_core::crypto::PublicKey;

use crate::error::{EngineError, Result};

fn random_half() -> [u8; 32] {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes
}

/// The split-key record backing one LCT's pairing. Halves are present
/// (non-zero) only before activation; the combined key is present iff the
/// owning LCT's status is `active` (§8 invariant 3).
#[derive(Clone, Serialize, Deserialize)]
pub struct SplitKeyRecord {
    pub lct_id: String,
    pub device_half: [u8; 32],
    pub lct_half: [u8; 32],
    pub device_public: PublicKey,
    pub lct_public: PublicKey,
    pub combined_key: Option<[u8; 32]>,
    pub created_at: DateTime<Utc>,
    pub activated_at: Option<DateTime<Utc>>,
    pub terminated_at: Option<DateTime<Utc>>,
}

impl SplitKeyRecord {
    /// Allocates fresh random halves for a new pairing.
    pub fn generate(
        lct_id: impl Into<String>,
        device_public: PublicKey,
        lct_public: PublicKey,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            lct_id: lct_id.into(),
            device_half: random_half(),
            lct_half: random_half(),
            device_public,
            lct_public,
            combined_key: None,
            created_at: now,
            activated_at: None,
            terminated_at: None,
        }
    }

    /// Combines the two halves inside this critical section and zeroes
    /// them immediately afterward; only `combined_key` survives.
    pub fn activate(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.combined_key.is_some() {
            return Err(EngineError::InvalidSplitKey(format!(
                "{} already activated",
                self.lct_id
            )));
        }
        let mut combined = [0u8; 32];
        for i in 0..32 {
            combined[i] = self.device_half[i] ^ self.lct_half[i];
        }
        self.device_half.zeroize();
        self.lct_half.zeroize();
        self.combined_key = Some(combined);
        self.activated_at = Some(now);
        Ok(())
    }

    /// Zeroes every sensitive byte field. Called on termination and on any
    /// failed activation attempt.
    pub fn release(&mut self, now: DateTime<Utc>) {
        self.device_half.zeroize();
        self.lct_half.zeroize();
        if let Some(mut combined) = self.combined_key.take() {
            combined.zeroize();
        }
        self.terminated_at = Some(now);
    }

    pub fn is_active(&self) -> bool {
        self.combined_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web4_core::crypto::KeyPair;

    fn record() -> SplitKeyRecord {
        let a = KeyPair::generate().verifying_key();
        let b = KeyPair::generate().verifying_key();
        SplitKeyRecord::generate("lct:1", a, b, Utc::now())
    }

    #[test]
    fn activation_zeroes_halves_and_sets_combined() {
        let mut record = record();
        assert!(!record.is_active());
        record.activate(Utc::now()).unwrap();
        assert!(record.is_active());
        assert_eq!(record.device_half, [0u8; 32]);
        assert_eq!(record.lct_half, [0u8; 32]);
    }

    #[test]
    fn double_activation_fails() {
        let mut record = record();
        record.activate(Utc::now()).unwrap();
        assert!(record.activate(Utc::now()).is_err());
    }

    #[test]
    fn release_clears_combined_key() {
        let mut record = record();
        record.activate(Utc::now()).unwrap();
        record.release(Utc::now());
        assert!(!record.is_active());
        assert!(record.terminated_at.is_some());
    }
}
