// Copyright (c) 2026 MetaLINXX Inc.
// SPDX-License-Identifier: MIT
//
// This software is covered by US Patents 11,477,027 and 12,278,913,
// and pending application 19/178,619. See PATENTS.md for details.

//! Error taxonomy shared across the Web4 engine.
//!
//! Every crate in the workspace defines its own `thiserror` enum but tags
//! each variant with one of these kinds so callers can match on taxonomy
//! (NotFound/InvalidArgument/StateConflict/...) without depending on a
//! concrete error type from another crate.

use thiserror::Error;

/// Coarse error category, independent of which crate raised it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    StateConflict,
    PolicyDenied,
    InsufficientResource,
    Expired,
    Integrity,
}

/// Errors raised by `web4-core`: identity registration, revocation, and
/// the shared cryptographic primitives.
#[derive(Error, Debug)]
pub enum Web4Error {
    /// No component is registered under this hash (`ErrUnknownComponent`)
    #[error("unknown component: {0}")]
    UnknownComponent(String),

    /// The component, or its category/manufacturer, is on the revocation list (`ErrRevoked`)
    #[error("component revoked: {0}")]
    Revoked(String),

    /// The pairing-policy collaborator rejected the pair (`ErrPolicyDenied`)
    #[error("pairing policy denied: {0}")]
    PolicyDenied(String),

    /// A hash argument was not a well-formed 32-byte digest (`ErrInvalidHash`)
    #[error("invalid hash: {0}")]
    InvalidHash(String),

    /// Cryptographic operation failed
    #[error("cryptographic error: {0}")]
    Crypto(String),

    /// Signature verification failed
    #[error("signature verification failed: {0}")]
    SignatureInvalid(String),

    /// Invalid input provided
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Web4Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Web4Error::UnknownComponent(_) => ErrorKind::NotFound,
            Web4Error::Revoked(_) => ErrorKind::PolicyDenied,
            Web4Error::PolicyDenied(_) => ErrorKind::PolicyDenied,
            Web4Error::InvalidHash(_) => ErrorKind::Integrity,
            Web4Error::Crypto(_) => ErrorKind::Integrity,
            Web4Error::SignatureInvalid(_) => ErrorKind::Integrity,
            Web4Error::InvalidInput(_) => ErrorKind::InvalidArgument,
            Web4Error::Serialization(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type alias for web4-core operations
pub type Result<T> = std::result::Result<T, Web4Error>;
