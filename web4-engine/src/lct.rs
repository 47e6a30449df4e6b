//! Linked Context Tokens (C2, §3): durable relationship records between
//! two or more component identities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use web4_core::crypto::sha256_hex;

/// What kind of entity an LCT's relationship represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Human,
    Agent,
    Dictionary,
    Society,
}

/// LCT pairing status. Transitions: `Pending -> Active`, `Active <-> Suspended`,
/// and `{Pending|Active|Suspended} -> Terminated` (one-way, never backwards).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LctStatus {
    Pending,
    Active,
    Suspended,
    Terminated,
}

impl LctStatus {
    /// Whether `self -> next` is a legal transition per §4.2's status machine.
    pub fn can_transition_to(&self, next: LctStatus) -> bool {
        use LctStatus::*;
        match (self, next) {
            (Terminated, _) => false,
            (Pending, Active) => true,
            (Active, Suspended) | (Suspended, Active) => true,
            (_, Terminated) => true,
            _ => false,
        }
    }
}

/// A Linked Context Token: a durable, possibly multi-party relationship
/// record. The identifier is content-derived from the sorted participant
/// set plus operational context, so recreating the same relationship is
/// idempotent (§9 open question: content-derived, not timestamp-based).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lct {
    pub id: String,
    pub entity_type: EntityType,
    pub participants: Vec<String>,
    pub status: LctStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub context: String,
    /// Proxy identity used for offline-mediated pairings, if any.
    pub proxy: Option<String>,
    /// Handle to the split-key record; never the key material itself.
    pub split_key_ref: String,
}

impl Lct {
    /// Deterministic LCT identifier: a content hash of the sorted
    /// participant set and operational context.
    pub fn derive_id(participants: &[String], context: &str) -> String {
        let mut sorted = participants.to_vec();
        sorted.sort();
        format!("lct:{}", sha256_hex(format!("{}:{context}", sorted.join("|")).as_bytes()))
    }

    pub fn new(
        entity_type: EntityType,
        participants: Vec<String>,
        context: impl Into<String>,
        proxy: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let context = context.into();
        let id = Self::derive_id(&participants, &context);
        let split_key_ref = format!("split_key/{id}");
        Self {
            id,
            entity_type,
            participants,
            status: LctStatus::Pending,
            created_at: now,
            updated_at: now,
            context,
            proxy,
            split_key_ref,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LctStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_id_is_order_independent() {
        let a = Lct::derive_id(&["b".to_string(), "a".to_string()], "ctx");
        let b = Lct::derive_id(&["a".to_string(), "b".to_string()], "ctx");
        assert_eq!(a, b);
    }

    #[test]
    fn status_machine_never_leaves_terminated() {
        assert!(!LctStatus::Terminated.can_transition_to(LctStatus::Active));
        assert!(LctStatus::Pending.can_transition_to(LctStatus::Active));
        assert!(LctStatus::Active.can_transition_to(LctStatus::Suspended));
        assert!(LctStatus::Suspended.can_transition_to(LctStatus::Active));
        assert!(!LctStatus::Pending.can_transition_to(LctStatus::Suspended));
    }
}
