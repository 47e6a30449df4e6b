//! Genesis-overridable trust policy (§9: context-modifier table and
//! event-type boosts are "hard-coded in the source but undocumented as
//! policy. Treat as defaults configurable at genesis; do not bake in.").
//! Generalizes the teacher's `DecayConfig` pattern
//! (`web4-trust-core/src/decay/temporal.rs`) to the wider set of tunables
//! the spec calls out.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Weighted-dimension composite weights and update bounds (§4.4).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrustParams {
    /// T3 composite weights, in (talent, training, temperament) order.
    pub t3_weights: (f64, f64, f64),
    /// V3 composite weights, in (valuation, veracity, validity) order.
    pub v3_weights: (f64, f64, f64),
    /// Context-modifier multiplier table, keyed by context label.
    pub context_modifiers: HashMap<String, f64>,
    /// Modifier applied when a context has no entry in `context_modifiers`.
    pub default_context_modifier: f64,
    /// Lower bound on the per-update learning rate `alpha`.
    pub min_learning_rate: f64,
    /// Upper bound on the per-update learning rate `alpha`.
    pub max_learning_rate: f64,
    /// Divisor in `alpha = 1 / (1 + evidence_count / k)`.
    pub learning_rate_k: f64,
    /// Minimum witnesses required for `CreateBirthCertificate`.
    pub min_birth_certificate_witnesses: usize,
}

impl Default for TrustParams {
    fn default() -> Self {
        let mut context_modifiers = HashMap::new();
        context_modifiers.insert("energy_operation".to_string(), 1.10);
        context_modifiers.insert("energy_balance".to_string(), 1.05);
        context_modifiers.insert("critical_safety".to_string(), 1.20);
        context_modifiers.insert("diagnostic".to_string(), 0.95);

        Self {
            t3_weights: (0.30, 0.40, 0.30),
            v3_weights: (0.40, 0.30, 0.30),
            context_modifiers,
            default_context_modifier: 1.00,
            min_learning_rate: 0.01,
            max_learning_rate: 0.50,
            learning_rate_k: 10.0,
            min_birth_certificate_witnesses: 3,
        }
    }
}

impl TrustParams {
    /// `GetContextModifier(context) -> modifier`
    pub fn context_modifier(&self, context: &str) -> f64 {
        self.context_modifiers
            .get(context)
            .copied()
            .unwrap_or(self.default_context_modifier)
    }

    /// `alpha = clamp(1 / (1 + n / k), min, max)`
    pub fn learning_rate(&self, evidence_count: u64) -> f64 {
        let alpha = 1.0 / (1.0 + evidence_count as f64 / self.learning_rate_k);
        alpha.clamp(self.min_learning_rate, self.max_learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_context_falls_back_to_default() {
        let p = TrustParams::default();
        assert_eq!(p.context_modifier("unrecognized"), 1.00);
        assert_eq!(p.context_modifier("critical_safety"), 1.20);
    }

    #[test]
    fn learning_rate_matches_spec_worked_example() {
        let p = TrustParams::default();
        assert_eq!(p.learning_rate(0), 0.50);
        // raw alpha = 1/(1+0.1) ~= 0.909, clamped down to the 0.50 ceiling
        assert_eq!(p.learning_rate(1), 0.50);
    }
}
