//! Genesis-overridable energy policy: validation windows, recognized
//! energy sources, efficiency constants, and the trust threshold
//! `ValidateEnergyOperation` requires (§4.5).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnergyParams {
    /// Blocks between a discharge and its ADP validation deadline.
    pub validation_window_blocks: u64,
    /// Blocks an ATP token remains valid after being recharged into.
    pub atp_expiration_blocks: u64,
    /// Energy sources `RechargeADP` accepts.
    pub recognized_energy_sources: Vec<String>,
    /// Minimum composite relationship trust `ValidateEnergyOperation`
    /// requires (inclusive).
    pub min_operation_trust: f64,
    /// Base efficiency intercept: `0.50 + (trust - 0.50) * slope`.
    pub efficiency_base: f64,
    pub efficiency_slope: f64,
    pub efficiency_min: f64,
    pub efficiency_max: f64,
    /// Context boost multipliers applied to new-ATP efficiency.
    pub efficiency_context_boosts: HashMap<String, f64>,
    /// Inherent loss factor applied at discharge time.
    pub discharge_loss_factor: f64,
}

impl Default for EnergyParams {
    fn default() -> Self {
        let mut efficiency_context_boosts = HashMap::new();
        efficiency_context_boosts.insert("high_performance".to_string(), 1.10);
        efficiency_context_boosts.insert("efficiency_optimized".to_string(), 1.20);
        efficiency_context_boosts.insert("safety_critical".to_string(), 0.90);

        Self {
            validation_window_blocks: 10,
            atp_expiration_blocks: 100_000,
            recognized_energy_sources: vec![
                "solar".to_string(),
                "wind".to_string(),
                "wave".to_string(),
                "nuclear".to_string(),
                "geothermal".to_string(),
                "grid".to_string(),
                "battery".to_string(),
            ],
            min_operation_trust: 0.60,
            efficiency_base: 0.50,
            efficiency_slope: 0.80,
            efficiency_min: 0.10,
            efficiency_max: 1.00,
            efficiency_context_boosts,
            discharge_loss_factor: 0.95,
        }
    }
}

impl EnergyParams {
    pub fn is_recognized_source(&self, source: &str) -> bool {
        self.recognized_energy_sources.iter().any(|s| s == source)
    }

    /// `clamp(0.50 + (trust - 0.50) * 0.80, 0.10, 1.00)`, optionally scaled
    /// by a context boost.
    pub fn atp_efficiency(&self, trust: f64, context: Option<&str>) -> f64 {
        let base = (self.efficiency_base + (trust - 0.50) * self.efficiency_slope)
            .clamp(self.efficiency_min, self.efficiency_max);
        let boosted = match context.and_then(|c| self.efficiency_context_boosts.get(c)) {
            Some(boost) => base * boost,
            None => base,
        };
        boosted.clamp(self.efficiency_min, self.efficiency_max)
    }

    /// `clamp(atp_efficiency * trust * 0.95, 0.10, 1.00)`
    pub fn discharge_efficiency(&self, atp_efficiency: f64, trust: f64) -> f64 {
        (atp_efficiency * trust * self.discharge_loss_factor)
            .clamp(self.efficiency_min, self.efficiency_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_spec_energy_sources() {
        let p = EnergyParams::default();
        assert!(p.is_recognized_source("solar"));
        assert!(!p.is_recognized_source("fusion"));
    }

    #[test]
    fn efficiency_context_boost_applies() {
        let p = EnergyParams::default();
        let plain = p.atp_efficiency(0.75, None);
        let boosted = p.atp_efficiency(0.75, Some("efficiency_optimized"));
        assert!(boosted > plain);
    }

    #[test]
    fn discharge_efficiency_applies_loss_factor() {
        let p = EnergyParams::default();
        let atp_eff = p.atp_efficiency(1.0, None);
        let discharge_eff = p.discharge_efficiency(atp_eff, 1.0);
        assert!(discharge_eff < atp_eff);
    }
}
