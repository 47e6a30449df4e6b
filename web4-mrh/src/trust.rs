//! Witnessed trust (§4.3): base path trust plus witness boosts.
//!
//! Event-type weights live here as policy defaults (`MrhParams`'s sibling,
//! `EventType::weight`), per §9's instruction not to bake undocumented
//! constants into the algorithm. Witness records themselves are owned by
//! the trust tensor engine (C4); this module only needs to know, for a
//! given subject, which LCTs witnessed it and under what event type — that
//! capability is injected via `WitnessSource` so `web4-mrh` never depends
//! on `web4-trust-core`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::{MrhGraphStore, MrhStore};

/// Category of an attested event, used to weight a witness's contribution
/// to `WitnessedTrust`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    BirthCertificate,
    Pairing,
    Transaction,
    Other,
}

impl EventType {
    /// Default event-type weight table (§4.3). Configurable at genesis via
    /// a caller-supplied lookup; these are the spec's literal defaults.
    pub fn default_weight(&self) -> f64 {
        match self {
            EventType::BirthCertificate => 0.5,
            EventType::Pairing => 0.3,
            EventType::Transaction => 0.1,
            EventType::Other => 0.05,
        }
    }
}

/// Injected capability: for a given subject LCT, the witnesses that have
/// attested it and under which event type.
pub trait WitnessSource {
    fn witnesses_of(&self, subject: &str) -> Vec<(String, EventType)>;
}

/// A no-op witness source for callers that only need bare path trust.
pub struct NoWitnesses;

impl WitnessSource for NoWitnesses {
    fn witnesses_of(&self, _subject: &str) -> Vec<(String, EventType)> {
        Vec::new()
    }
}

/// Computed witnessed trust between two LCTs.
#[derive(Clone, Debug, PartialEq)]
pub struct WitnessedTrust {
    pub base_path_trust: f64,
    pub boosted_trust: f64,
    pub contributing_witnesses: Vec<String>,
}

impl<S: MrhStore> MrhGraphStore<S> {
    /// `WitnessedTrust(from, to) -> trust`
    ///
    /// Base path trust plus, for each witness `W` of `to` whose
    /// `pathTrust(from, W) > threshold`: `boost_W = weight(W) *
    /// pathTrust(from, W)`. Final = `base + (1 - base) * sum(boost) *
    /// scale`, capped at 1.0.
    pub fn witnessed_trust(
        &self,
        from: &str,
        to: &str,
        max_depth: u32,
        witnesses: &dyn WitnessSource,
    ) -> Result<WitnessedTrust> {
        let params = self.params().clone();
        let base = match self.path(from, to, max_depth) {
            Ok(result) => result.trust,
            Err(_) => 0.0,
        };

        let mut sum_boost = 0.0;
        let mut contributing = Vec::new();
        for (witness, event_type) in witnesses.witnesses_of(to) {
            let witness_path_trust = match self.path(from, &witness, max_depth) {
                Ok(result) => result.trust,
                Err(_) => continue,
            };
            if witness_path_trust <= params.witness_contribution_threshold {
                continue;
            }
            sum_boost += event_type.default_weight() * witness_path_trust;
            contributing.push(witness);
        }

        let boosted = (base + (1.0 - base) * sum_boost * params.witness_boost_scale).min(1.0);

        Ok(WitnessedTrust {
            base_path_trust: base,
            boosted_trust: boosted,
            contributing_witnesses: contributing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Predicate;
    use crate::store::InMemoryMrhStore;

    struct FixedWitness(Vec<(String, EventType)>);
    impl WitnessSource for FixedWitness {
        fn witnesses_of(&self, _subject: &str) -> Vec<(String, EventType)> {
            self.0.clone()
        }
    }

    #[test]
    fn witnessed_trust_matches_spec_worked_example() {
        let store = MrhGraphStore::new(InMemoryMrhStore::new());
        store.add_triple("lct:1", Predicate::Witnessed, "lct:2", 1.0).unwrap();
        store.add_triple("lct:2", Predicate::Witnessed, "lct:3", 1.0).unwrap();
        store.add_triple("lct:3", Predicate::Witnessed, "lct:4", 1.0).unwrap();
        store.add_triple("lct:1", Predicate::Witnessed, "lct:5", 1.0).unwrap();

        let witnesses = FixedWitness(vec![("lct:5".to_string(), EventType::Pairing)]);
        let result = store
            .witnessed_trust("lct:1", "lct:4", 6, &witnesses)
            .unwrap();

        assert!((result.base_path_trust - 0.512).abs() < 1e-9);
        // pathTrust(lct:1, lct:5) = 0.8 (1 hop), boost = 0.3 * 0.8 = 0.24
        // final = 0.512 + (1 - 0.512) * 0.24 * 0.1 = 0.5237...
        assert!((result.boosted_trust - 0.52371).abs() < 1e-4);
    }

    #[test]
    fn witness_below_threshold_does_not_contribute() {
        let store = MrhGraphStore::new(InMemoryMrhStore::new());
        store.add_triple("lct:1", Predicate::Witnessed, "lct:2", 1.0).unwrap();
        for hop in 2..6 {
            store
                .add_triple(
                    &format!("lct:{hop}"),
                    Predicate::Witnessed,
                    &format!("lct:{}", hop + 1),
                    1.0,
                )
                .unwrap();
        }
        let witnesses = FixedWitness(vec![("lct:6".to_string(), EventType::BirthCertificate)]);
        let result = store
            .witnessed_trust("lct:1", "lct:6", 6, &witnesses)
            .unwrap();
        assert!(result.contributing_witnesses.is_empty());
        assert_eq!(result.boosted_trust, result.base_path_trust);
    }
}
