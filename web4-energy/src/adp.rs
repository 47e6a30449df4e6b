//! ADP token records (discharged state, §3).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustValidationStatus {
    Pending,
    Validated,
    Expired,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdpToken {
    pub id: String,
    /// The ATP token this ADP was discharged from, or `"pool"` for an
    /// aggregate draw against the society pool directly.
    pub original_atp_id: String,
    pub owning_lct: String,
    /// Amount of energy the discharge moved; not named in §3's field list
    /// but required to audit the pool transition that created this token.
    pub amount: Decimal,
    pub discharge_block: u64,
    pub value_score: Option<f64>,
    pub confirmation_data: String,
    pub energy_efficiency_ratio: f64,
    pub trust_validation: TrustValidationStatus,
    pub validation_deadline_block: u64,
    pub operation_context: String,
}
