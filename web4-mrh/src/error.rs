//! Errors raised by the MRH graph store.

use thiserror::Error;
use web4_core::error::ErrorKind;

#[derive(Error, Debug)]
pub enum MrhError {
    /// No graph is stored under this content hash
    #[error("unknown graph hash: {0}")]
    UnknownHash(String),

    /// `lct_mrh[lct_id]` pointer is unset and no default graph could be created
    #[error("no graph for LCT: {0}")]
    UnknownLct(String),

    /// `Path` found no route within `max_depth` hops
    #[error("no path from {from} to {to} within {max_depth} hops")]
    PathNotFound {
        from: String,
        to: String,
        max_depth: u32,
    },

    /// `radius`/`max_depth` exceeded the hard cap of 10
    #[error("depth {0} exceeds the maximum of 10")]
    DepthExceeded(u32),

    /// Graph serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MrhError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MrhError::UnknownHash(_) => ErrorKind::NotFound,
            MrhError::UnknownLct(_) => ErrorKind::NotFound,
            MrhError::PathNotFound { .. } => ErrorKind::NotFound,
            MrhError::DepthExceeded(_) => ErrorKind::InvalidArgument,
            MrhError::Serialization(_) => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T> = std::result::Result<T, MrhError>;
