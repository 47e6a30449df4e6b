//! In-memory tensor store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Result, TrustError};
use crate::tensor::{T3Record, V3Record};
use crate::witnessing::{BirthCertificate, WitnessRelationship};

use super::TensorStore;

/// In-memory tensor store backed by `RwLock<HashMap<..>>`, matching the
/// teacher's `InMemoryStore` idiom.
pub struct InMemoryTensorStore {
    t3: RwLock<HashMap<String, T3Record>>,
    v3: RwLock<HashMap<String, V3Record>>,
    witnesses: RwLock<Vec<WitnessRelationship>>,
    birth_certs: RwLock<HashMap<String, BirthCertificate>>,
}

impl InMemoryTensorStore {
    pub fn new() -> Self {
        Self {
            t3: RwLock::new(HashMap::new()),
            v3: RwLock::new(HashMap::new()),
            witnesses: RwLock::new(Vec::new()),
            birth_certs: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTensorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TensorStore for InMemoryTensorStore {
    fn get_t3(&self, lct_id: &str) -> Result<Option<T3Record>> {
        let t3 = self.t3.read().map_err(|e| TrustError::Storage(e.to_string()))?;
        Ok(t3.get(lct_id).cloned())
    }

    fn put_t3(&self, record: T3Record) -> Result<()> {
        let mut t3 = self.t3.write().map_err(|e| TrustError::Storage(e.to_string()))?;
        t3.insert(record.id.clone(), record);
        Ok(())
    }

    fn get_v3(&self, operation_id: &str) -> Result<Option<V3Record>> {
        let v3 = self.v3.read().map_err(|e| TrustError::Storage(e.to_string()))?;
        Ok(v3.get(operation_id).cloned())
    }

    fn put_v3(&self, record: V3Record) -> Result<()> {
        let mut v3 = self.v3.write().map_err(|e| TrustError::Storage(e.to_string()))?;
        v3.insert(record.id.clone(), record);
        Ok(())
    }

    fn add_witness(&self, witness: WitnessRelationship) -> Result<()> {
        let mut witnesses = self
            .witnesses
            .write()
            .map_err(|e| TrustError::Storage(e.to_string()))?;
        witnesses.push(witness);
        Ok(())
    }

    fn witnesses_of(&self, subject_lct: &str) -> Result<Vec<WitnessRelationship>> {
        let witnesses = self
            .witnesses
            .read()
            .map_err(|e| TrustError::Storage(e.to_string()))?;
        Ok(witnesses
            .iter()
            .filter(|w| w.subject_lct == subject_lct)
            .cloned()
            .collect())
    }

    fn put_birth_certificate(&self, cert: BirthCertificate) -> Result<()> {
        let mut certs = self
            .birth_certs
            .write()
            .map_err(|e| TrustError::Storage(e.to_string()))?;
        certs.insert(cert.cert_id.clone(), cert);
        Ok(())
    }

    fn get_birth_certificate(&self, cert_id: &str) -> Result<Option<BirthCertificate>> {
        let certs = self
            .birth_certs
            .read()
            .map_err(|e| TrustError::Storage(e.to_string()))?;
        Ok(certs.get(cert_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::T3Tensor;
    use chrono::Utc;
    use web4_mrh::EventType;

    #[test]
    fn round_trips_t3_record() {
        let store = InMemoryTensorStore::new();
        let record = T3Record::new("lct:1", T3Tensor::neutral(), Utc::now());
        store.put_t3(record.clone()).unwrap();
        assert_eq!(store.get_t3("lct:1").unwrap().unwrap().id, "lct:1");
        assert!(store.get_t3("lct:missing").unwrap().is_none());
    }

    #[test]
    fn witnesses_filtered_by_subject() {
        let store = InMemoryTensorStore::new();
        let now = Utc::now();
        store
            .add_witness(WitnessRelationship::new(
                "lct:w1",
                "lct:a",
                EventType::Pairing,
                Vec::new(),
                now,
            ))
            .unwrap();
        store
            .add_witness(WitnessRelationship::new(
                "lct:w2",
                "lct:b",
                EventType::Transaction,
                Vec::new(),
                now,
            ))
            .unwrap();

        let of_a = store.witnesses_of("lct:a").unwrap();
        assert_eq!(of_a.len(), 1);
        assert_eq!(of_a[0].witness_lct, "lct:w1");
    }
}
