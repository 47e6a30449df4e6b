//! LCT & Relationship Manager (C2), with the offline queue (§4.6) folded
//! in as subsidiary operations on the same handle, matching how the spec
//! itself groups them.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use web4_core::crypto::KeyPair;
use web4_core::identity::{IdentityRegistry, IdentityStore, PairingPolicy};
use web4_mrh::{MrhGraphStore, MrhStore, Predicate};

use crate::error::{EngineError, Result};
use crate::lct::{EntityType, Lct, LctStatus};
use crate::pairing::{ChallengeStatus, PairingChallenge, PairingResponseVerifier};
use crate::queue::{QueuedRequest, RequestStatus};
use crate::split_key::SplitKeyRecord;
use crate::store::EngineStore;

/// Access granted by `ValidateAccess`: a coarse role plus the specific
/// permissions it carries. The core doesn't define a permission catalog of
/// its own (that's a host concern); `active` membership is sufficient to
/// grant the `participant` role with full access.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessGrant {
    pub granted: bool,
    pub role: String,
    pub permissions: Vec<String>,
}

pub struct RelationshipManager<S: EngineStore> {
    store: S,
}

impl<S: EngineStore> RelationshipManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn require_lct(&self, lct_id: &str) -> Result<Lct> {
        self.store
            .get_lct(lct_id)?
            .ok_or_else(|| EngineError::UnknownLct(lct_id.to_string()))
    }

    fn require_split_key(&self, lct_id: &str) -> Result<SplitKeyRecord> {
        self.store
            .get_split_key(lct_id)?
            .ok_or_else(|| EngineError::UnknownSplitKey(lct_id.to_string()))
    }

    /// `CreateRelationship(a, b, context, proxy) -> lct_id`
    ///
    /// Direct (both-online) pairing style. Verifies compatibility via the
    /// identity registry (§4.1), derives a deterministic LCT identifier,
    /// allocates split-key halves, and persists a `pending` pairing record.
    /// Recreating the same `(a, b, context)` triple is idempotent.
    pub fn create_relationship<IS: IdentityStore>(
        &self,
        a: &str,
        b: &str,
        context: &str,
        proxy: Option<&str>,
        identity: &IdentityRegistry<IS>,
        policy: &dyn PairingPolicy,
    ) -> Result<String> {
        identity.verify_pairing(a, b, policy)?;

        let participants = vec![a.to_string(), b.to_string()];
        let id = Lct::derive_id(&participants, context);
        if let Some(existing) = self.store.get_lct(&id)? {
            return Ok(existing.id);
        }

        let now = Utc::now();
        let lct = Lct::new(
            EntityType::Agent,
            participants,
            context,
            proxy.map(str::to_string),
            now,
        );

        let device_public = KeyPair::generate().verifying_key();
        let lct_public = KeyPair::generate().verifying_key();
        let split_key = SplitKeyRecord::generate(lct.id.clone(), device_public, lct_public, now);

        self.store.put_lct(lct.clone())?;
        self.store.put_split_key(split_key)?;
        self.store.index_relationship(a, &lct.id)?;
        self.store.index_relationship(b, &lct.id)?;

        tracing::debug!(
            event = "pairing_initiated",
            lct_id = %lct.id,
            initiator = a,
            target = b,
            proxy,
            "pairing initiated"
        );

        Ok(lct.id)
    }

    /// Promotes a `pending` LCT to `active`: combines the split-key halves
    /// and initializes the LCT's MRH graph with self-rooted triples.
    pub fn activate<M: MrhStore>(&self, lct_id: &str, mrh: &MrhGraphStore<M>) -> Result<()> {
        let mut lct = self.require_lct(lct_id)?;
        if !lct.status.can_transition_to(LctStatus::Active) {
            return Err(EngineError::InvalidStatusTransition {
                from: lct.status,
                to: LctStatus::Active,
            });
        }

        let mut split_key = self.require_split_key(lct_id)?;
        let now = Utc::now();
        split_key.activate(now)?;

        lct.status = LctStatus::Active;
        lct.updated_at = now;

        self.store.put_split_key(split_key)?;
        self.store.put_lct(lct.clone())?;

        mrh.add_triple(lct_id, Predicate::Type, "relationship", 1.0)?;
        mrh.add_triple(lct_id, Predicate::HasContext, &lct.context, 1.0)?;

        tracing::debug!(event = "pairing_completed", lct_id, "pairing activated");
        Ok(())
    }

    /// `InitiateMediatedPairing(initiator, target, context, proxy,
    /// expires_at) -> pairing_id`
    ///
    /// Enqueues a pairing-challenge record (§4.4/§4.6); duplicate calls for
    /// the same `(initiator, target, context)` triple return the existing
    /// in-flight identifier.
    pub fn initiate_mediated_pairing(
        &self,
        initiator: &str,
        target: &str,
        context: &str,
        proxy: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<String> {
        if let Some(existing) = self
            .store
            .find_in_flight_request(initiator, target, context)?
        {
            return Ok(existing);
        }

        let now = Utc::now();
        let challenge_id = format!("challenge-{}", Uuid::new_v4());

        let challenge = PairingChallenge::new(
            challenge_id.clone(),
            initiator,
            target,
            proxy,
            context,
            now,
            expires_at,
        );
        self.store.put_challenge(challenge)?;

        let request = QueuedRequest {
            request_id: challenge_id.clone(),
            operation_type: "mediated_pairing".to_string(),
            initiator: initiator.to_string(),
            target: target.to_string(),
            context: context.to_string(),
            challenge_payload: Vec::new(),
            created_at: now,
            expires_at,
            status: RequestStatus::Queued,
        };
        self.store.put_request(request)?;

        tracing::debug!(
            event = "pairing_initiated",
            challenge_id = %challenge_id,
            initiator,
            target,
            proxy,
            "mediated pairing initiated"
        );

        Ok(challenge_id)
    }

    /// `CompleteMediatedPairing(pairing_id, initiator_response,
    /// target_response, session_material) -> lct_id`
    ///
    /// Verifies both responses against the challenge payload recorded at
    /// `InitiateMediatedPairing` time, combines session-key material, and
    /// promotes the resulting LCT to `active`. Absence of a response by
    /// `expires_at` fails with `ExpiredChallenge` and releases both halves;
    /// a response that fails verification fails with `PairingNotVerified`.
    pub fn complete_mediated_pairing<M: MrhStore>(
        &self,
        pairing_id: &str,
        initiator_response: Vec<u8>,
        target_response: Vec<u8>,
        verifier: &dyn PairingResponseVerifier,
        mrh: &MrhGraphStore<M>,
    ) -> Result<String> {
        let mut challenge = self
            .store
            .get_challenge(pairing_id)?
            .ok_or_else(|| EngineError::UnknownChallenge(pairing_id.to_string()))?;

        let now = Utc::now();
        if challenge.is_expired_at(now) {
            challenge.status = ChallengeStatus::Expired;
            self.store.put_challenge(challenge.clone())?;
            if let Some(mut request) = self.store.get_request(pairing_id)? {
                request.status = RequestStatus::Expired;
                self.store.put_request(request)?;
            }
            return Err(EngineError::ExpiredChallenge(pairing_id.to_string()));
        }

        challenge.initiator_response = Some(initiator_response);
        challenge.target_response = Some(target_response);

        if !challenge.responses_verify(verifier) {
            self.store.put_challenge(challenge)?;
            return Err(EngineError::PairingNotVerified(pairing_id.to_string()));
        }

        let participants = vec![challenge.initiator.clone(), challenge.target.clone()];
        let lct = Lct::new(
            EntityType::Agent,
            participants,
            challenge.context.clone(),
            Some(challenge.proxy.clone()),
            now,
        );

        let device_public = KeyPair::generate().verifying_key();
        let lct_public = KeyPair::generate().verifying_key();
        let split_key = SplitKeyRecord::generate(lct.id.clone(), device_public, lct_public, now);
        self.store.put_lct(lct.clone())?;
        self.store.put_split_key(split_key)?;
        self.store
            .index_relationship(&challenge.initiator, &lct.id)?;
        self.store.index_relationship(&challenge.target, &lct.id)?;

        challenge.status = ChallengeStatus::Completed;
        self.store.put_challenge(challenge)?;
        if let Some(mut request) = self.store.get_request(pairing_id)? {
            request.status = RequestStatus::Satisfied;
            self.store.put_request(request)?;
        }

        self.activate(&lct.id, mrh)?;

        tracing::debug!(event = "pairing_completed", lct_id = %lct.id, "mediated pairing completed");
        Ok(lct.id)
    }

    /// `UpdateStatus(lct_id, new_status, reason)`
    pub fn update_status(&self, lct_id: &str, new_status: LctStatus, reason: &str) -> Result<()> {
        let mut lct = self.require_lct(lct_id)?;
        if !lct.status.can_transition_to(new_status) {
            return Err(EngineError::InvalidStatusTransition {
                from: lct.status,
                to: new_status,
            });
        }
        lct.status = new_status;
        lct.updated_at = Utc::now();
        self.store.put_lct(lct)?;

        tracing::debug!(event = "lct_status_updated", lct_id, ?new_status, reason);
        Ok(())
    }

    /// `Terminate(lct_id, reason, notify_offline)`
    ///
    /// One-way transition to `terminated`: zeroes the split-key record and
    /// removes the LCT from every participant's relationship index.
    pub fn terminate(&self, lct_id: &str, reason: &str, notify_offline: bool) -> Result<()> {
        let mut lct = self.require_lct(lct_id)?;
        if !lct.status.can_transition_to(LctStatus::Terminated) {
            return Err(EngineError::InvalidStatusTransition {
                from: lct.status,
                to: LctStatus::Terminated,
            });
        }

        let now = Utc::now();
        if let Some(mut split_key) = self.store.get_split_key(lct_id)? {
            split_key.release(now);
            self.store.put_split_key(split_key)?;
        }

        for participant in lct.participants.clone() {
            self.store.deindex_relationship(&participant, lct_id)?;
        }

        lct.status = LctStatus::Terminated;
        lct.updated_at = now;
        self.store.put_lct(lct)?;

        tracing::debug!(event = "lct_terminated", lct_id, reason, notify_offline);
        Ok(())
    }

    /// `ValidateAccess(lct_id, requestor, required_permission) -> (granted,
    /// role, permissions)`
    ///
    /// Terminated LCTs fail every access check; an active LCT grants the
    /// `participant` role to any listed participant.
    pub fn validate_access(
        &self,
        lct_id: &str,
        requestor: &str,
        required_permission: &str,
    ) -> Result<AccessGrant> {
        let lct = self.require_lct(lct_id)?;

        if lct.status != LctStatus::Active || !lct.participants.iter().any(|p| p == requestor) {
            return Ok(AccessGrant {
                granted: false,
                role: "none".to_string(),
                permissions: Vec::new(),
            });
        }

        let permissions = vec![required_permission.to_string()];
        Ok(AccessGrant {
            granted: true,
            role: "participant".to_string(),
            permissions,
        })
    }

    /// `GetRelationships(component_id) -> [lct]`
    pub fn get_relationships(&self, component_id: &str) -> Result<Vec<Lct>> {
        let ids = self.store.relationships_of(component_id)?;
        let mut lcts = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(lct) = self.store.get_lct(&id)? {
                lcts.push(lct);
            }
        }
        Ok(lcts)
    }

    // --- §4.6 Offline Queue, subsidiary to this component ---

    /// `Queue(operation) -> request_id`
    ///
    /// Duplicate calls for the same `(initiator, target, context)` triple
    /// return the existing in-flight identifier.
    pub fn queue(
        &self,
        operation_type: &str,
        initiator: &str,
        target: &str,
        context: &str,
        challenge_payload: Vec<u8>,
        expires_at: DateTime<Utc>,
    ) -> Result<String> {
        if let Some(existing) = self
            .store
            .find_in_flight_request(initiator, target, context)?
        {
            return Ok(existing);
        }

        let request_id = format!("request-{}", Uuid::new_v4());
        let request = QueuedRequest {
            request_id: request_id.clone(),
            operation_type: operation_type.to_string(),
            initiator: initiator.to_string(),
            target: target.to_string(),
            context: context.to_string(),
            challenge_payload,
            created_at: Utc::now(),
            expires_at,
            status: RequestStatus::Queued,
        };
        self.store.put_request(request)?;
        Ok(request_id)
    }

    /// `ProcessDueRequests(current_time)`: lazily expires every in-flight
    /// request whose `expires_at` has passed, returning the ids touched.
    pub fn process_due_requests(&self, current_time: DateTime<Utc>) -> Result<Vec<String>> {
        let mut expired = Vec::new();
        for mut request in self.store.all_requests()? {
            if request.is_in_flight() && request.is_expired_at(current_time) {
                request.status = RequestStatus::Expired;
                let id = request.request_id.clone();
                self.store.put_request(request)?;
                expired.push(id);
            }
        }
        Ok(expired)
    }

    /// `Cancel(request_id, reason)`
    pub fn cancel(&self, request_id: &str, reason: &str) -> Result<()> {
        let mut request = self
            .store
            .get_request(request_id)?
            .ok_or_else(|| EngineError::UnknownRequest(request_id.to_string()))?;
        request.status = RequestStatus::Cancelled;
        self.store.put_request(request)?;
        tracing::debug!(event = "offline_request_cancelled", request_id, reason);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use web4_core::identity::{InMemoryIdentityStore, PermissivePairingPolicy};
    use web4_core::IdentityRegistry;
    use web4_mrh::InMemoryMrhStore;

    fn registry() -> IdentityRegistry<InMemoryIdentityStore> {
        IdentityRegistry::new(InMemoryIdentityStore::new())
    }

    fn manager() -> RelationshipManager<crate::store::InMemoryEngineStore> {
        RelationshipManager::new(crate::store::InMemoryEngineStore::new())
    }

    #[test]
    fn create_relationship_then_activate_matches_spec_scenario() {
        let identity = registry();
        let (a, _, _) = identity.register_anonymous("alice", "acme", "human").unwrap();
        let (b, _, _) = identity.register_anonymous("bob", "acme", "human").unwrap();
        let manager = manager();
        let mrh = MrhGraphStore::new(InMemoryMrhStore::new());

        let lct_id = manager
            .create_relationship(&a, &b, "energy_transfer", None, &identity, &PermissivePairingPolicy)
            .unwrap();
        let lct = manager.require_lct(&lct_id).unwrap();
        assert_eq!(lct.status, LctStatus::Pending);

        manager.activate(&lct_id, &mrh).unwrap();
        let lct = manager.require_lct(&lct_id).unwrap();
        assert_eq!(lct.status, LctStatus::Active);

        let split_key = manager.require_split_key(&lct_id).unwrap();
        assert!(split_key.is_active());

        let graph = mrh.graph_for(&lct_id).unwrap();
        assert!(!graph.triples.is_empty());
    }

    #[test]
    fn create_relationship_is_idempotent() {
        let identity = registry();
        let (a, _, _) = identity.register_anonymous("alice", "acme", "human").unwrap();
        let (b, _, _) = identity.register_anonymous("bob", "acme", "human").unwrap();
        let manager = manager();

        let first = manager
            .create_relationship(&a, &b, "ctx", None, &identity, &PermissivePairingPolicy)
            .unwrap();
        let second = manager
            .create_relationship(&a, &b, "ctx", None, &identity, &PermissivePairingPolicy)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mediated_pairing_timeout_fails_closed_and_creates_no_lct() {
        let manager = manager();
        // Already expired by the time completion is attempted (§8 boundary:
        // fails closed, not open).
        let expires_at = Utc::now() - Duration::seconds(1);
        let challenge_id = manager
            .initiate_mediated_pairing("lct:a", "lct:b", "offline", "proxy:1", expires_at)
            .unwrap();

        let mrh = MrhGraphStore::new(InMemoryMrhStore::new());
        let result = manager.complete_mediated_pairing(
            &challenge_id,
            b"resp-a".to_vec(),
            b"resp-b".to_vec(),
            &AcceptAnyResponse,
            &mrh,
        );

        assert!(matches!(result, Err(EngineError::ExpiredChallenge(_))));
        assert!(manager.require_lct(&challenge_id).is_err());
    }

    #[test]
    fn mediated_pairing_completes_when_not_expired() {
        let manager = manager();
        let expires_at = Utc::now() + Duration::minutes(5);
        let challenge_id = manager
            .initiate_mediated_pairing("lct:a", "lct:b", "offline", "proxy:1", expires_at)
            .unwrap();

        let mrh = MrhGraphStore::new(InMemoryMrhStore::new());
        let lct_id = manager
            .complete_mediated_pairing(
                &challenge_id,
                b"resp-a".to_vec(),
                b"resp-b".to_vec(),
                &AcceptAnyResponse,
                &mrh,
            )
            .unwrap();

        let lct = manager.require_lct(&lct_id).unwrap();
        assert_eq!(lct.status, LctStatus::Active);
    }

    #[test]
    fn mediated_pairing_rejects_unverified_response() {
        let manager = manager();
        let expires_at = Utc::now() + Duration::minutes(5);
        let challenge_id = manager
            .initiate_mediated_pairing("lct:a", "lct:b", "offline", "proxy:1", expires_at)
            .unwrap();

        struct RejectAll;
        impl PairingResponseVerifier for RejectAll {
            fn verify(&self, _challenge_payload: &[u8], _response: &[u8]) -> bool {
                false
            }
        }

        let mrh = MrhGraphStore::new(InMemoryMrhStore::new());
        let result = manager.complete_mediated_pairing(
            &challenge_id,
            b"resp-a".to_vec(),
            b"resp-b".to_vec(),
            &RejectAll,
            &mrh,
        );

        assert!(matches!(result, Err(EngineError::PairingNotVerified(_))));
        assert!(manager.require_lct(&challenge_id).is_err());
    }

    #[test]
    fn mediated_pairing_dedups_in_flight_requests() {
        let manager = manager();
        let expires_at = Utc::now() + Duration::minutes(5);
        let first = manager
            .initiate_mediated_pairing("lct:a", "lct:b", "offline", "proxy:1", expires_at)
            .unwrap();
        let second = manager
            .initiate_mediated_pairing("lct:a", "lct:b", "offline", "proxy:1", expires_at)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn terminated_lct_fails_validate_access_and_never_reactivates() {
        let identity = registry();
        let (a, _, _) = identity.register_anonymous("alice", "acme", "human").unwrap();
        let (b, _, _) = identity.register_anonymous("bob", "acme", "human").unwrap();
        let manager = manager();
        let mrh = MrhGraphStore::new(InMemoryMrhStore::new());

        let lct_id = manager
            .create_relationship(&a, &b, "ctx", None, &identity, &PermissivePairingPolicy)
            .unwrap();
        manager.activate(&lct_id, &mrh).unwrap();
        manager.terminate(&lct_id, "done", false).unwrap();

        let access = manager.validate_access(&lct_id, &a, "read").unwrap();
        assert!(!access.granted);

        assert!(matches!(
            manager.update_status(&lct_id, LctStatus::Active, "resurrect"),
            Err(EngineError::InvalidStatusTransition { .. })
        ));

        assert!(manager.get_relationships(&a).unwrap().is_empty());
    }

    #[test]
    fn process_due_requests_expires_lazily() {
        let manager = manager();
        let expires_at = Utc::now() - Duration::seconds(1);
        let request_id = manager
            .queue("mediated_pairing", "lct:a", "lct:b", "ctx", Vec::new(), expires_at)
            .unwrap();

        let touched = manager.process_due_requests(Utc::now()).unwrap();
        assert!(touched.contains(&request_id));
    }

    #[test]
    fn cancel_marks_request_cancelled() {
        let manager = manager();
        let expires_at = Utc::now() + Duration::minutes(5);
        let request_id = manager
            .queue("mediated_pairing", "lct:a", "lct:b", "ctx", Vec::new(), expires_at)
            .unwrap();
        manager.cancel(&request_id, "no longer needed").unwrap();
        let request = manager.store().get_request(&request_id).unwrap().unwrap();
        assert_eq!(request.status, RequestStatus::Cancelled);
    }
}
