//! Errors raised by the trust tensor engine (C4).

use thiserror::Error;
use web4_core::error::ErrorKind;

#[derive(Error, Debug)]
pub enum TrustError {
    /// No T3/V3 tensor is stored under this identifier
    #[error("unknown tensor: {0}")]
    UnknownTensor(String),

    /// `UpdateTensorScore` named a dimension the tensor kind doesn't have
    #[error("invalid dimension '{0}' for {1}")]
    InvalidDimension(String, &'static str),

    /// A score argument fell outside `[0, 1]`
    #[error("score out of range: {0}")]
    ScoreOutOfRange(f64),

    /// `CreateBirthCertificate` with fewer than the minimum witness count
    #[error("birth certificate requires at least {required} witnesses, got {got}")]
    InsufficientWitnesses { required: usize, got: usize },

    /// Storage-layer failure (lock poisoned, IO, etc.)
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO failure (file-backed store)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Propagated from the MRH graph store while recording a witness triple
    #[error(transparent)]
    Mrh(#[from] web4_mrh::MrhError),
}

impl TrustError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrustError::UnknownTensor(_) => ErrorKind::NotFound,
            TrustError::InvalidDimension(_, _) => ErrorKind::InvalidArgument,
            TrustError::ScoreOutOfRange(_) => ErrorKind::InvalidArgument,
            TrustError::InsufficientWitnesses { .. } => ErrorKind::InvalidArgument,
            TrustError::Storage(_) => ErrorKind::Integrity,
            TrustError::Serialization(_) => ErrorKind::InvalidArgument,
            TrustError::Io(_) => ErrorKind::Integrity,
            TrustError::Mrh(e) => e.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrustError>;
