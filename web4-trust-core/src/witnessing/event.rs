//! Witness relationships (§3 "Witness relationship", §4.4 `AddWitness`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use web4_mrh::EventType;

/// `(witness_lct, subject_lct, event_type, timestamp, signature,
/// trust_boost)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WitnessRelationship {
    pub witness_lct: String,
    pub subject_lct: String,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    /// Opaque signature bytes; never logged or otherwise exposed raw.
    pub signature: Vec<u8>,
    pub trust_boost: f64,
}

impl WitnessRelationship {
    pub fn new(
        witness_lct: impl Into<String>,
        subject_lct: impl Into<String>,
        event_type: EventType,
        signature: Vec<u8>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            witness_lct: witness_lct.into(),
            subject_lct: subject_lct.into(),
            event_type,
            timestamp: now,
            signature,
            trust_boost: event_type.default_weight(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn trust_boost_defaults_to_event_type_weight() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let w = WitnessRelationship::new(
            "lct:w",
            "lct:s",
            EventType::BirthCertificate,
            Vec::new(),
            now,
        );
        assert_eq!(w.trust_boost, 0.5);
    }
}
