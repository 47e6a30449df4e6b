// Copyright (c) 2026 MetaLINXX Inc.
// SPDX-License-Identifier: AGPL-3.0-only
//
// This software is covered by US Patents 11,477,027 and 12,278,913,
// and pending application 19/178,619. A royalty-free license is granted
// under AGPL-3.0 terms for non-commercial and research use.
// For commercial licensing: dp@metalinxx.io
// See PATENTS.md for details.

//! # Web4 Core Library
//!
//! Trust-native distributed intelligence infrastructure implemented in Rust.
//!
//! This crate provides the foundational primitives shared across the Web4
//! engine workspace:
//!
//! - **Identity Registry (C1)**: anonymous component identities, pairing
//!   compatibility checks, and revocation.
//! - **Crypto**: Ed25519 signing/verification and X25519 DH primitives.
//! - **Error taxonomy**: the shared `ErrorKind` categories every crate in
//!   the workspace tags its errors with.
//!
//! ## Quick Start
//!
//! ```rust
//! use web4_core::identity::{IdentityRegistry, InMemoryIdentityStore, PermissivePairingPolicy};
//!
//! let registry = IdentityRegistry::new(InMemoryIdentityStore::new());
//! let (alice, _, _) = registry.register_anonymous("alice", "acme", "human").unwrap();
//! let (bob, _, _) = registry.register_anonymous("bob", "acme", "human").unwrap();
//!
//! let verdict = registry.verify_pairing(&alice, &bob, &PermissivePairingPolicy).unwrap();
//! assert!(verdict.allowed);
//! ```

pub mod crypto;
pub mod error;
pub mod identity;

pub use crypto::{sha256, sha256_hex, DhKeyPair, KeyPair, PublicKey, SignatureBytes};
pub use error::{ErrorKind, Result, Web4Error};
pub use identity::{
    AnonymousMetadata, ComponentIdentity, ComponentStatus, IdentityRegistry, IdentityStore,
    InMemoryIdentityStore, PairingPolicy, PairingVerification, PermissivePairingPolicy,
    RevocationUrgency,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::crypto::{DhKeyPair, KeyPair, PublicKey, SignatureBytes};
    pub use crate::error::{ErrorKind, Result, Web4Error};
    pub use crate::identity::{IdentityRegistry, IdentityStore, PairingPolicy};
}

#[cfg(test)]
mod tests {
    use super::*;
    use identity::{InMemoryIdentityStore, PermissivePairingPolicy};

    #[test]
    fn test_full_registration_and_pairing_workflow() {
        let registry = IdentityRegistry::new(InMemoryIdentityStore::new());

        let (alice, _, _) = registry
            .register_anonymous("alice", "acme", "human")
            .unwrap();
        let (bob, _, _) = registry
            .register_anonymous("bob", "acme", "human")
            .unwrap();

        let verdict = registry
            .verify_pairing(&alice, &bob, &PermissivePairingPolicy)
            .unwrap();
        assert!(verdict.allowed);

        let meta = registry.anonymous_metadata(&alice).unwrap();
        assert_eq!(meta.status, ComponentStatus::Active);
    }

    #[test]
    fn test_revoked_identity_fails_pairing() {
        let registry = IdentityRegistry::new(InMemoryIdentityStore::new());

        let (alice, _, _) = registry
            .register_anonymous("alice", "acme", "human")
            .unwrap();
        let (bob, _, _) = registry
            .register_anonymous("bob", "acme", "human")
            .unwrap();

        registry
            .revoke(&alice, RevocationUrgency::Immediate, "compromised")
            .unwrap();

        assert!(registry
            .verify_pairing(&alice, &bob, &PermissivePairingPolicy)
            .is_err());
    }

    #[test]
    fn test_signature_round_trip() {
        let kp = KeyPair::generate();
        let message = b"Task completed successfully";
        let signature = kp.sign(message);

        assert!(kp.verifying_key().verify(message, &signature).is_ok());
    }
}
