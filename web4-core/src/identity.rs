// Copyright (c) 2026 MetaLINXX Inc.
// SPDX-License-Identifier: MIT
//
// This software is covered by US Patents 11,477,027 and 12,278,913,
// and pending application 19/178,619. See PATENTS.md for details.

//! Identity Registry (C1)
//!
//! Component identities are opaque, content-hashed references to off-engine
//! real identities. The engine never stores commercial names: only a SHA-256
//! hash of the off-engine canonical identifier, plus category/manufacturer
//! hashes and an opaque trust-anchor byte string.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::crypto::sha256_hex;
use crate::error::{Result, Web4Error};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a registered component identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Active,
    Suspended,
    Revoked,
}

/// How urgently a revocation should propagate. The engine always applies a
/// revocation immediately on commit; urgency is carried through to the
/// `component_revoked` event for downstream consumers only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationUrgency {
    Immediate,
    Routine,
}

/// A registered component identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComponentIdentity {
    /// SHA-256 hash of the off-engine canonical identifier.
    pub component_hash: String,
    pub category_hash: String,
    pub manufacturer_hash: String,
    pub authorization_rules_hash: String,
    pub status: ComponentStatus,
    pub registered_at: DateTime<Utc>,
    /// Opaque byte string used for cryptographic root-of-trust references.
    pub trust_anchor: Vec<u8>,
}

impl ComponentIdentity {
    pub fn is_active(&self) -> bool {
        self.status == ComponentStatus::Active
    }
}

/// Metadata returned by `AnonymousMetadata`. Note `category` is the category
/// *hash*, not a resolved name — resolution is an external-only operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnonymousMetadata {
    pub category: String,
    pub status: ComponentStatus,
    pub trust_anchor: Vec<u8>,
}

/// Result of `VerifyPairing`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PairingVerification {
    pub allowed: bool,
    pub reason: String,
    pub trust_hint: f64,
}

/// External pairing-policy collaborator (§6): a synchronous pure oracle.
/// The core treats this as opaque; privacy guarantees are the backend's
/// responsibility.
pub trait PairingPolicy {
    fn verify(&self, hash_a: &str, hash_b: &str) -> (bool, String, f64);
}

/// A pairing policy that allows everything, useful for tests and for hosts
/// that haven't wired a real policy backend yet.
pub struct PermissivePairingPolicy;

impl PairingPolicy for PermissivePairingPolicy {
    fn verify(&self, _hash_a: &str, _hash_b: &str) -> (bool, String, f64) {
        (true, "default_allow".into(), 0.5)
    }
}

/// Storage backend for the identity registry.
///
/// Keys follow the module-prefix layout of §6: `component/<hash>` for
/// identities, `revocation/<hash>` for the flat revocation list (which holds
/// component, category, *and* manufacturer hashes uniformly).
pub trait IdentityStore {
    fn get_component(&self, hash: &str) -> Result<Option<ComponentIdentity>>;
    fn put_component(&self, identity: ComponentIdentity) -> Result<()>;
    fn is_revoked(&self, hash: &str) -> Result<bool>;
    fn add_revocation(&self, hash: &str) -> Result<()>;
}

/// In-memory identity store backed by a `RwLock<HashMap<..>>`.
pub struct InMemoryIdentityStore {
    components: RwLock<HashMap<String, ComponentIdentity>>,
    revocations: RwLock<HashSet<String>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            components: RwLock::new(HashMap::new()),
            revocations: RwLock::new(HashSet::new()),
        }
    }
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn get_component(&self, hash: &str) -> Result<Option<ComponentIdentity>> {
        let components = self
            .components
            .read()
            .map_err(|e| Web4Error::Crypto(e.to_string()))?;
        Ok(components.get(hash).cloned())
    }

    fn put_component(&self, identity: ComponentIdentity) -> Result<()> {
        let mut components = self
            .components
            .write()
            .map_err(|e| Web4Error::Crypto(e.to_string()))?;
        components.insert(identity.component_hash.clone(), identity);
        Ok(())
    }

    fn is_revoked(&self, hash: &str) -> Result<bool> {
        let revocations = self
            .revocations
            .read()
            .map_err(|e| Web4Error::Crypto(e.to_string()))?;
        Ok(revocations.contains(hash))
    }

    fn add_revocation(&self, hash: &str) -> Result<()> {
        let mut revocations = self
            .revocations
            .write()
            .map_err(|e| Web4Error::Crypto(e.to_string()))?;
        revocations.insert(hash.to_string());
        Ok(())
    }
}

/// The identity registry (C1): issues component identities, enforces
/// pairing-compatibility rules, and publishes revocations.
pub struct IdentityRegistry<S: IdentityStore> {
    store: S,
}

impl<S: IdentityStore> IdentityRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// `RegisterAnonymous(real_id, manufacturer_id, type_id) →
    /// (component_hash, mfg_hash, cat_hash)`
    ///
    /// Hashes are SHA-256 of the off-engine canonical identifier; they are
    /// pure one-way identifiers on-engine.
    pub fn register_anonymous(
        &self,
        real_id: &str,
        manufacturer_id: &str,
        type_id: &str,
    ) -> Result<(String, String, String)> {
        let component_hash = sha256_hex(real_id.as_bytes());
        let manufacturer_hash = sha256_hex(manufacturer_id.as_bytes());
        let category_hash = sha256_hex(type_id.as_bytes());

        let identity = ComponentIdentity {
            component_hash: component_hash.clone(),
            category_hash: category_hash.clone(),
            manufacturer_hash: manufacturer_hash.clone(),
            authorization_rules_hash: sha256_hex(format!("{real_id}:{type_id}").as_bytes()),
            status: ComponentStatus::Active,
            registered_at: Utc::now(),
            trust_anchor: sha256_hex(format!("anchor:{real_id}").as_bytes()).into_bytes(),
        };
        self.store.put_component(identity)?;

        Ok((component_hash, manufacturer_hash, category_hash))
    }

    /// `Revoke(target_hash, urgency, reason_category)`
    ///
    /// Revocation is effective immediately on commit. `target_hash` may be a
    /// component, category, or manufacturer hash; it is always added to the
    /// flat revocation list, and if it happens to name a known component that
    /// component's status also flips to `Revoked` (terminal).
    pub fn revoke(
        &self,
        target_hash: &str,
        _urgency: RevocationUrgency,
        _reason_category: &str,
    ) -> Result<()> {
        self.store.add_revocation(target_hash)?;

        if let Some(mut identity) = self.store.get_component(target_hash)? {
            identity.status = ComponentStatus::Revoked;
            self.store.put_component(identity)?;
        }
        Ok(())
    }

    /// `VerifyPairing(hash_a, hash_b) → (allowed, reason, trust_hint)`
    pub fn verify_pairing(
        &self,
        hash_a: &str,
        hash_b: &str,
        policy: &dyn PairingPolicy,
    ) -> Result<PairingVerification> {
        for hash in [hash_a, hash_b] {
            let identity = self
                .store
                .get_component(hash)?
                .ok_or_else(|| Web4Error::UnknownComponent(hash.to_string()))?;

            if identity.status == ComponentStatus::Revoked
                || self.store.is_revoked(&identity.component_hash)?
                || self.store.is_revoked(&identity.category_hash)?
                || self.store.is_revoked(&identity.manufacturer_hash)?
            {
                return Err(Web4Error::Revoked(hash.to_string()));
            }
        }

        let (allowed, reason, trust_hint) = policy.verify(hash_a, hash_b);
        if !allowed {
            return Err(Web4Error::PolicyDenied(reason));
        }

        Ok(PairingVerification {
            allowed,
            reason,
            trust_hint,
        })
    }

    /// `AnonymousMetadata(hash) → { category, status, trust_anchor }`
    pub fn anonymous_metadata(&self, hash: &str) -> Result<AnonymousMetadata> {
        let identity = self
            .store
            .get_component(hash)?
            .ok_or_else(|| Web4Error::UnknownComponent(hash.to_string()))?;

        Ok(AnonymousMetadata {
            category: identity.category_hash,
            status: identity.status,
            trust_anchor: identity.trust_anchor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> IdentityRegistry<InMemoryIdentityStore> {
        IdentityRegistry::new(InMemoryIdentityStore::new())
    }

    #[test]
    fn register_anonymous_hashes_inputs() {
        let reg = registry();
        let (hash, mfg, cat) = reg
            .register_anonymous("real-id-1", "acme", "sensor")
            .unwrap();

        assert_eq!(hash, sha256_hex(b"real-id-1"));
        assert_eq!(mfg, sha256_hex(b"acme"));
        assert_eq!(cat, sha256_hex(b"sensor"));
    }

    #[test]
    fn unknown_component_fails_lookup() {
        let reg = registry();
        assert!(matches!(
            reg.anonymous_metadata("nope"),
            Err(Web4Error::UnknownComponent(_))
        ));
    }

    #[test]
    fn verify_pairing_allows_two_active_components() {
        let reg = registry();
        let (a, _, _) = reg.register_anonymous("alice", "acme", "human").unwrap();
        let (b, _, _) = reg.register_anonymous("bob", "acme", "human").unwrap();

        let result = reg
            .verify_pairing(&a, &b, &PermissivePairingPolicy)
            .unwrap();
        assert!(result.allowed);
    }

    #[test]
    fn revoked_component_fails_closed() {
        let reg = registry();
        let (a, _, _) = reg.register_anonymous("alice", "acme", "human").unwrap();
        let (b, _, _) = reg.register_anonymous("bob", "acme", "human").unwrap();

        reg.revoke(&a, RevocationUrgency::Immediate, "compromised")
            .unwrap();

        assert!(matches!(
            reg.verify_pairing(&a, &b, &PermissivePairingPolicy),
            Err(Web4Error::Revoked(_))
        ));

        let meta = reg.anonymous_metadata(&a).unwrap();
        assert_eq!(meta.status, ComponentStatus::Revoked);
    }

    #[test]
    fn revoked_category_blocks_new_pairings_without_flipping_status() {
        let reg = registry();
        let (a, _, cat) = reg.register_anonymous("alice", "acme", "human").unwrap();
        let (b, _, _) = reg.register_anonymous("bob", "acme", "human").unwrap();

        reg.revoke(&cat, RevocationUrgency::Routine, "category_recall")
            .unwrap();

        assert!(matches!(
            reg.verify_pairing(&a, &b, &PermissivePairingPolicy),
            Err(Web4Error::Revoked(_))
        ));
    }

    #[test]
    fn policy_denial_is_surfaced() {
        struct DenyAll;
        impl PairingPolicy for DenyAll {
            fn verify(&self, _a: &str, _b: &str) -> (bool, String, f64) {
                (false, "blocked_by_policy".into(), 0.0)
            }
        }

        let reg = registry();
        let (a, _, _) = reg.register_anonymous("alice", "acme", "human").unwrap();
        let (b, _, _) = reg.register_anonymous("bob", "acme", "human").unwrap();

        assert!(matches!(
            reg.verify_pairing(&a, &b, &DenyAll),
            Err(Web4Error::PolicyDenied(_))
        ));
    }
}
