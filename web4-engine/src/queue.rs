//! Offline request queue (§4.6, subsidiary to §4.2). Models any
//! offline-tolerant handshake as a queued request; mediated pairing is the
//! motivating case but the queue itself is operation-agnostic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Queued,
    Processing,
    Satisfied,
    Expired,
    Cancelled,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueuedRequest {
    pub request_id: String,
    pub operation_type: String,
    pub initiator: String,
    pub target: String,
    pub context: String,
    pub challenge_payload: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: RequestStatus,
}

impl QueuedRequest {
    /// The triple a `Queue` call dedups on: at most one in-flight
    /// handshake per `(initiator, target, context)`.
    pub fn dedup_key(&self) -> (String, String, String) {
        (self.initiator.clone(), self.target.clone(), self.context.clone())
    }

    pub fn is_expired_at(&self, current_time: DateTime<Utc>) -> bool {
        current_time >= self.expires_at
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.status, RequestStatus::Queued | RequestStatus::Processing)
    }
}
