//! Errors raised by the LCT & Relationship Manager (C2) and the top-level
//! facade. Wraps the subordinate crates' error types with `#[from]` so a
//! caller driving the whole engine sees one error type, tagged with the
//! shared taxonomy from `web4_core::error::ErrorKind`.

use thiserror::Error;
use web4_core::error::ErrorKind;

use crate::lct::LctStatus;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unknown LCT: {0}")]
    UnknownLct(String),

    #[error("incompatible pair: {0}")]
    IncompatiblePair(String),

    #[error("pairing challenge expired: {0}")]
    ExpiredChallenge(String),

    #[error("pairing response did not verify against recorded challenge: {0}")]
    PairingNotVerified(String),

    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition { from: LctStatus, to: LctStatus },

    #[error("invalid split key: {0}")]
    InvalidSplitKey(String),

    #[error("unknown pairing challenge: {0}")]
    UnknownChallenge(String),

    #[error("unknown split key record: {0}")]
    UnknownSplitKey(String),

    #[error("unknown offline request: {0}")]
    UnknownRequest(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error(transparent)]
    Identity(#[from] web4_core::error::Web4Error),

    #[error(transparent)]
    Mrh(#[from] web4_mrh::MrhError),

    #[error(transparent)]
    Trust(#[from] web4_trust_core::TrustError),

    #[error(transparent)]
    Energy(#[from] web4_energy::EnergyError),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        use EngineError::*;
        match self {
            UnknownLct(_) | UnknownChallenge(_) | UnknownSplitKey(_) | UnknownRequest(_) => {
                ErrorKind::NotFound
            }
            IncompatiblePair(_) => ErrorKind::PolicyDenied,
            ExpiredChallenge(_) => ErrorKind::Expired,
            PairingNotVerified(_) => ErrorKind::PolicyDenied,
            InvalidStatusTransition { .. } => ErrorKind::StateConflict,
            InvalidSplitKey(_) => ErrorKind::Integrity,
            AccessDenied(_) => ErrorKind::PolicyDenied,
            Identity(e) => e.kind(),
            Mrh(e) => e.kind(),
            Trust(e) => e.kind(),
            Energy(e) => e.kind(),
            Storage(_) => ErrorKind::Integrity,
            Serialization(_) => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
