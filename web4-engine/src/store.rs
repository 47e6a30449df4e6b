//! Storage backend for the LCT & Relationship Manager. Keys follow §6's
//! layout: `lct/<lct_id>`, `relationship/<component_id>/index`,
//! `pairing_challenge/<challenge_id>`, `split_key/<lct_id>`.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::error::{EngineError, Result};
use crate::lct::Lct;
use crate::pairing::PairingChallenge;
use crate::queue::QueuedRequest;
use crate::split_key::SplitKeyRecord;

pub trait EngineStore {
    fn get_lct(&self, lct_id: &str) -> Result<Option<Lct>>;
    fn put_lct(&self, lct: Lct) -> Result<()>;

    fn relationships_of(&self, component_id: &str) -> Result<Vec<String>>;
    fn index_relationship(&self, component_id: &str, lct_id: &str) -> Result<()>;
    fn deindex_relationship(&self, component_id: &str, lct_id: &str) -> Result<()>;

    fn get_split_key(&self, lct_id: &str) -> Result<Option<SplitKeyRecord>>;
    fn put_split_key(&self, record: SplitKeyRecord) -> Result<()>;

    fn get_challenge(&self, challenge_id: &str) -> Result<Option<PairingChallenge>>;
    fn put_challenge(&self, challenge: PairingChallenge) -> Result<()>;

    fn get_request(&self, request_id: &str) -> Result<Option<QueuedRequest>>;
    fn put_request(&self, request: QueuedRequest) -> Result<()>;
    fn find_in_flight_request(
        &self,
        initiator: &str,
        target: &str,
        context: &str,
    ) -> Result<Option<String>>;
    fn all_requests(&self) -> Result<Vec<QueuedRequest>>;
}

/// In-memory engine store backed by `RwLock<HashMap<..>>`.
#[derive(Default)]
pub struct InMemoryEngineStore {
    lcts: RwLock<HashMap<String, Lct>>,
    relationship_index: RwLock<HashMap<String, HashSet<String>>>,
    split_keys: RwLock<HashMap<String, SplitKeyRecord>>,
    challenges: RwLock<HashMap<String, PairingChallenge>>,
    requests: RwLock<HashMap<String, QueuedRequest>>,
}

impl InMemoryEngineStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EngineStore for InMemoryEngineStore {
    fn get_lct(&self, lct_id: &str) -> Result<Option<Lct>> {
        Ok(self
            .lcts
            .read()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .get(lct_id)
            .cloned())
    }

    fn put_lct(&self, lct: Lct) -> Result<()> {
        self.lcts
            .write()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .insert(lct.id.clone(), lct);
        Ok(())
    }

    fn relationships_of(&self, component_id: &str) -> Result<Vec<String>> {
        Ok(self
            .relationship_index
            .read()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .get(component_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn index_relationship(&self, component_id: &str, lct_id: &str) -> Result<()> {
        self.relationship_index
            .write()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .entry(component_id.to_string())
            .or_default()
            .insert(lct_id.to_string());
        Ok(())
    }

    fn deindex_relationship(&self, component_id: &str, lct_id: &str) -> Result<()> {
        if let Some(set) = self
            .relationship_index
            .write()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .get_mut(component_id)
        {
            set.remove(lct_id);
        }
        Ok(())
    }

    fn get_split_key(&self, lct_id: &str) -> Result<Option<SplitKeyRecord>> {
        Ok(self
            .split_keys
            .read()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .get(lct_id)
            .cloned())
    }

    fn put_split_key(&self, record: SplitKeyRecord) -> Result<()> {
        self.split_keys
            .write()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .insert(record.lct_id.clone(), record);
        Ok(())
    }

    fn get_challenge(&self, challenge_id: &str) -> Result<Option<PairingChallenge>> {
        Ok(self
            .challenges
            .read()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .get(challenge_id)
            .cloned())
    }

    fn put_challenge(&self, challenge: PairingChallenge) -> Result<()> {
        self.challenges
            .write()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .insert(challenge.challenge_id.clone(), challenge);
        Ok(())
    }

    fn get_request(&self, request_id: &str) -> Result<Option<QueuedRequest>> {
        Ok(self
            .requests
            .read()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .get(request_id)
            .cloned())
    }

    fn put_request(&self, request: QueuedRequest) -> Result<()> {
        self.requests
            .write()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .insert(request.request_id.clone(), request);
        Ok(())
    }

    fn find_in_flight_request(
        &self,
        initiator: &str,
        target: &str,
        context: &str,
    ) -> Result<Option<String>> {
        let requests = self
            .requests
            .read()
            .map_err(|e| EngineError::Storage(e.to_string()))?;
        Ok(requests
            .values()
            .find(|r| {
                r.is_in_flight()
                    && r.initiator == initiator
                    && r.target == target
                    && r.context == context
            })
            .map(|r| r.request_id.clone()))
    }

    fn all_requests(&self) -> Result<Vec<QueuedRequest>> {
        Ok(self
            .requests
            .read()
            .map_err(|e| EngineError::Storage(e.to_string()))?
            .values()
            .cloned()
            .collect())
    }
}
