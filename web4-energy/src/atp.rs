//! ATP token records (charged state, §3).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtpStatus {
    Active,
    Discharged,
    Expired,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AtpToken {
    pub id: String,
    pub owning_lct: String,
    pub amount: Decimal,
    pub operation_id: Option<String>,
    pub creation_block: u64,
    pub status: AtpStatus,
    pub context: String,
    pub expiration_block: u64,
    pub trust_score: f64,
    pub efficiency_rating: f64,
    /// The `validation_proof` a producer supplied at `RechargeADP` time,
    /// kept for later audit (§4.5 step 2); empty for ATP minted via other
    /// paths (e.g. `CreateOperation`'s `charge` backing token).
    pub validation_proof: String,
}

impl AtpToken {
    /// ATP is valid through its expiration block inclusive; strictly
    /// greater expires (§8 boundary behavior).
    pub fn is_expired_at(&self, current_block: u64) -> bool {
        current_block > self.expiration_block
    }
}
