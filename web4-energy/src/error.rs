//! Errors raised by the energy cycle engine (C5). Conservation violations
//! are always hard errors (§7): there is no degraded path that could
//! corrupt pool balances.

use thiserror::Error;
use web4_core::error::ErrorKind;

#[derive(Error, Debug)]
pub enum EnergyError {
    #[error("unknown society pool: {0}")]
    UnknownPool(String),

    #[error("unknown ATP token: {0}")]
    UnknownAtp(String),

    #[error("unknown ADP token: {0}")]
    UnknownAdp(String),

    #[error("unknown energy operation: {0}")]
    UnknownOperation(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: String, available: String },

    #[error("insufficient trust: composite {composite:.4} below threshold {threshold:.4}")]
    InsufficientTrust { composite: f64, threshold: f64 },

    #[error("recharge requires a non-empty validation proof")]
    ProofMissing,

    #[error("unrecognized energy source: {0}")]
    UnrecognizedEnergySource(String),

    #[error("ATP token expired at block {expiration_block}, current block {current_block}")]
    ExpiredToken {
        expiration_block: u64,
        current_block: u64,
    },

    #[error("operation {0} is not in 'created' status")]
    InvalidOperationStatus(String),

    #[error("unknown energy operation type: {0}")]
    UnknownOperationType(String),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(String),

    #[error("stale write: pool version conflict on {0}")]
    VersionConflict(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EnergyError {
    pub fn kind(&self) -> ErrorKind {
        use EnergyError::*;
        match self {
            UnknownPool(_) | UnknownAtp(_) | UnknownAdp(_) | UnknownOperation(_) => {
                ErrorKind::NotFound
            }
            InsufficientBalance { .. } | InsufficientTrust { .. } => ErrorKind::InsufficientResource,
            ProofMissing | UnrecognizedEnergySource(_) | NonPositiveAmount(_)
            | UnknownOperationType(_) => ErrorKind::InvalidArgument,
            ExpiredToken { .. } => ErrorKind::Expired,
            InvalidOperationStatus(_) | VersionConflict(_) => ErrorKind::StateConflict,
            Storage(_) => ErrorKind::Integrity,
            Serialization(_) => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T> = std::result::Result<T, EnergyError>;
