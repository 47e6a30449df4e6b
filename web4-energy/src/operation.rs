//! Energy operations (§3, §4.5 `CreateOperation`/`ExecuteTransfer`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Charge,
    Discharge,
    Transfer,
    Balance,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Charge => "charge",
            OperationType::Discharge => "discharge",
            OperationType::Transfer => "transfer",
            OperationType::Balance => "balance",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Created,
    Completed,
    Validated,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnergyOperation {
    pub id: String,
    pub source_lct: String,
    pub target_lct: String,
    pub amount: Decimal,
    pub op_type: OperationType,
    pub status: OperationStatus,
    pub timestamp: DateTime<Utc>,
    pub block_height: u64,
    pub trust_score_at_creation: f64,
    pub atp_id: Option<String>,
    pub adp_id: Option<String>,
    pub efficiency: f64,
    pub validation_payload: Option<String>,
    pub version: u64,
}
