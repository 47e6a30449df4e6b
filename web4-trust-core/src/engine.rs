//! Trust Tensor Engine (C4): §4.4's public operations composed over a
//! `TensorStore` and an injected `LctLookup` capability. Per §9's
//! "polymorphic keepers" design note, this engine takes the *minimal*
//! capability it needs from C2 (just "is this LCT active?") rather than a
//! full LCT manager dependency — avoiding a circular crate dependency on
//! `web4-engine`.

use chrono::Utc;
use web4_mrh::{EventType, MrhGraphStore, MrhStore, Predicate};

use crate::error::Result;
use crate::params::TrustParams;
use crate::storage::TensorStore;
use crate::tensor::{T3Record, T3Tensor, V3Record, V3Tensor};
use crate::witnessing::{create_birth_certificate, BirthCertificate, WitnessRelationship};

/// Injected capability (§9): whether an LCT is known and active. `None` =
/// LCT not found; `Some(false)` = found but not `active`.
pub trait LctLookup {
    fn is_active(&self, lct_id: &str) -> Option<bool>;
}

/// A lookup that treats every LCT as active; useful for tests and for
/// hosts exercising the trust engine in isolation.
pub struct AlwaysActive;

impl LctLookup for AlwaysActive {
    fn is_active(&self, _lct_id: &str) -> Option<bool> {
        Some(true)
    }
}

/// Result of `CalculateRelationshipTrust`.
#[derive(Clone, Debug, PartialEq)]
pub struct RelationshipTrust {
    pub score: f64,
    pub factors: String,
}

pub struct TrustTensorEngine<S: TensorStore> {
    store: S,
    params: TrustParams,
}

impl<S: TensorStore> TrustTensorEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_params(store, TrustParams::default())
    }

    pub fn with_params(store: S, params: TrustParams) -> Self {
        Self { store, params }
    }

    pub fn params(&self) -> &TrustParams {
        &self.params
    }

    fn t3_or_neutral(&self, lct_id: &str) -> Result<T3Record> {
        Ok(self
            .store
            .get_t3(lct_id)?
            .unwrap_or_else(|| T3Record::new(lct_id, T3Tensor::neutral(), Utc::now())))
    }

    /// `CalculateT3Composite(lct_id) -> score`
    pub fn calculate_t3_composite(&self, lct_id: &str) -> Result<f64> {
        let record = self.t3_or_neutral(lct_id)?;
        Ok(record.composite_with_own_modifier(&self.params))
    }

    /// `CalculateV3Composite(operation_id) -> score`
    pub fn calculate_v3_composite(&self, operation_id: &str) -> Result<f64> {
        let record = self
            .store
            .get_v3(operation_id)?
            .unwrap_or_else(|| V3Record::new(operation_id, V3Tensor::neutral(), Utc::now()));
        Ok(record.tensor.composite(&self.params))
    }

    /// `GetContextModifier(context) -> modifier`
    pub fn get_context_modifier(&self, context: &str) -> f64 {
        self.params.context_modifier(context)
    }

    /// `CalculateRelationshipTrust(lct_id, context) -> (score, factors)`
    ///
    /// (1) Resolve LCT; absent -> default `(0.5, "default_trust_no_lct_found")`.
    /// (2) Inactive -> `(0.3, "low_trust_inactive_lct")`.
    /// (3)-(5) T3 composite * context modifier, clamped.
    pub fn calculate_relationship_trust(
        &self,
        lct_id: &str,
        context: &str,
        lct_lookup: &dyn LctLookup,
    ) -> Result<RelationshipTrust> {
        let active = match lct_lookup.is_active(lct_id) {
            None => {
                return Ok(RelationshipTrust {
                    score: 0.5,
                    factors: "default_trust_no_lct_found".to_string(),
                })
            }
            Some(active) => active,
        };

        if !active {
            return Ok(RelationshipTrust {
                score: 0.3,
                factors: "low_trust_inactive_lct".to_string(),
            });
        }

        let record = self.t3_or_neutral(lct_id)?;
        let t3 = record.composite_with_own_modifier(&self.params);
        let modifier = self.get_context_modifier(context);
        let score = (t3 * modifier).clamp(0.0, 1.0);

        Ok(RelationshipTrust {
            score,
            factors: format!("t3={t3:.4},context={context},modifier={modifier:.2}"),
        })
    }

    /// `UpdateTensorScore(tensor_id, dimension, new_score, evidence)` on a
    /// T3 tensor, keyed by LCT identifier.
    pub fn update_t3_score(
        &self,
        lct_id: &str,
        dimension: &str,
        new_score: f64,
        evidence: impl Into<String>,
    ) -> Result<f64> {
        let mut record = self.t3_or_neutral(lct_id)?;
        let now = Utc::now();
        let updated = record.update_dimension(dimension, new_score, evidence, &self.params, now)?;
        self.store.put_t3(record)?;
        Ok(updated)
    }

    /// `UpdateTensorScore(tensor_id, dimension, new_score, evidence)` on a
    /// V3 tensor, keyed by operation identifier.
    pub fn update_v3_score(
        &self,
        operation_id: &str,
        dimension: &str,
        new_score: f64,
        evidence: impl Into<String>,
    ) -> Result<f64> {
        let mut record = self
            .store
            .get_v3(operation_id)?
            .unwrap_or_else(|| V3Record::new(operation_id, V3Tensor::neutral(), Utc::now()));
        let now = Utc::now();
        let updated = record.update_dimension(dimension, new_score, evidence, &self.params, now)?;
        self.store.put_v3(record)?;
        Ok(updated)
    }

    /// `AddWitness(tensor_id, dimension, witness_lct, confidence)`: records
    /// a witness relationship for the subject, nudges the named T3
    /// dimension by `confidence`, and records the `witnessedBy`/`witnessed`
    /// triple pair (weight = event-type boost) in both the subject's and
    /// the witness's MRH graphs (§4.4), so `witnessed_trust` can later find
    /// a path to this witness.
    pub fn add_witness<M: MrhStore>(
        &self,
        subject_lct: &str,
        dimension: &str,
        witness_lct: &str,
        event_type: EventType,
        confidence: f64,
        signature: Vec<u8>,
        mrh: &MrhGraphStore<M>,
    ) -> Result<WitnessRelationship> {
        let now = Utc::now();
        let witness = WitnessRelationship::new(witness_lct, subject_lct, event_type, signature, now);
        self.store.add_witness(witness.clone())?;
        self.update_t3_score(
            subject_lct,
            dimension,
            confidence,
            format!("witness:{witness_lct}"),
        )?;

        let boost = event_type.default_weight();
        mrh.add_triple(subject_lct, Predicate::WitnessedBy, witness_lct, boost)?;
        mrh.add_triple(witness_lct, Predicate::Witnessed, subject_lct, boost)?;

        Ok(witness)
    }

    /// Witness relationships recorded against `subject_lct`, for hosts that
    /// need to feed them into an MRH `WitnessSource`.
    pub fn witnesses_of(&self, subject_lct: &str) -> Result<Vec<WitnessRelationship>> {
        self.store.witnesses_of(subject_lct)
    }

    /// `CreateBirthCertificate`: requires the configured minimum distinct
    /// witnesses of `subject_lct`.
    pub fn create_birth_certificate(
        &self,
        cert_id: &str,
        subject_lct: &str,
    ) -> Result<BirthCertificate> {
        let witnesses: Vec<String> = self
            .store
            .witnesses_of(subject_lct)?
            .into_iter()
            .map(|w| w.witness_lct)
            .collect();

        let cert = create_birth_certificate(cert_id, subject_lct, witnesses, &self.params, Utc::now())?;
        self.store.put_birth_certificate(cert.clone())?;
        Ok(cert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryTensorStore;
    use web4_mrh::InMemoryMrhStore;

    struct InactiveFor(String);
    impl LctLookup for InactiveFor {
        fn is_active(&self, lct_id: &str) -> Option<bool> {
            if lct_id == self.0 {
                Some(false)
            } else {
                Some(true)
            }
        }
    }
    struct NeverFound;
    impl LctLookup for NeverFound {
        fn is_active(&self, _lct_id: &str) -> Option<bool> {
            None
        }
    }

    #[test]
    fn missing_lct_degrades_to_default_trust() {
        let engine = TrustTensorEngine::new(InMemoryTensorStore::new());
        let result = engine
            .calculate_relationship_trust("lct:ghost", "default", &NeverFound)
            .unwrap();
        assert_eq!(result.score, 0.5);
        assert_eq!(result.factors, "default_trust_no_lct_found");
    }

    #[test]
    fn inactive_lct_degrades_to_low_trust() {
        let engine = TrustTensorEngine::new(InMemoryTensorStore::new());
        let lookup = InactiveFor("lct:suspended".to_string());
        let result = engine
            .calculate_relationship_trust("lct:suspended", "default", &lookup)
            .unwrap();
        assert_eq!(result.score, 0.3);
        assert_eq!(result.factors, "low_trust_inactive_lct");
    }

    #[test]
    fn active_lct_applies_context_modifier() {
        let engine = TrustTensorEngine::new(InMemoryTensorStore::new());
        let result = engine
            .calculate_relationship_trust("lct:fresh", "critical_safety", &AlwaysActive)
            .unwrap();
        // neutral T3 composite is 0.5, times 1.20 modifier
        assert!((result.score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn birth_certificate_requires_three_witnesses() {
        let engine = TrustTensorEngine::new(InMemoryTensorStore::new());
        let mrh = MrhGraphStore::new(InMemoryMrhStore::new());
        engine
            .add_witness("lct:baby", "temperament", "lct:w1", EventType::BirthCertificate, 0.6, vec![], &mrh)
            .unwrap();
        engine
            .add_witness("lct:baby", "temperament", "lct:w2", EventType::BirthCertificate, 0.6, vec![], &mrh)
            .unwrap();

        assert!(engine.create_birth_certificate("cert:1", "lct:baby").is_err());

        engine
            .add_witness("lct:baby", "temperament", "lct:w3", EventType::BirthCertificate, 0.6, vec![], &mrh)
            .unwrap();

        let cert = engine.create_birth_certificate("cert:1", "lct:baby").unwrap();
        assert_eq!(cert.witnesses.len(), 3);
    }

    #[test]
    fn add_witness_records_triples_in_both_graphs() {
        let engine = TrustTensorEngine::new(InMemoryTensorStore::new());
        let mrh = MrhGraphStore::new(InMemoryMrhStore::new());
        engine
            .add_witness("lct:baby", "temperament", "lct:w1", EventType::Pairing, 0.6, vec![], &mrh)
            .unwrap();

        let subject_graph = mrh.graph_for("lct:baby").unwrap();
        assert!(subject_graph.triples.iter().any(|t| t.predicate
            == Predicate::WitnessedBy
            && t.object == "lct:w1"
            && (t.weight - EventType::Pairing.default_weight()).abs() < 1e-9));

        let witness_graph = mrh.graph_for("lct:w1").unwrap();
        assert!(witness_graph
            .triples
            .iter()
            .any(|t| t.predicate == Predicate::Witnessed && t.object == "lct:baby"));

        // The path the new triple opens up is exactly what `witnessed_trust`
        // needs to find a boost for a live witness.
        let path = mrh.path("lct:baby", "lct:w1", 1).unwrap();
        assert_eq!(path.path, vec!["lct:baby".to_string(), "lct:w1".to_string()]);
    }
}
