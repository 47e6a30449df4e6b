//! V3 Value Tensor (§3, §4.4)
//!
//! Three dimensions measuring an operation's value contribution, weighted
//! 0.40/0.30/0.30:
//!
//! 1. **Valuation**: economic worth (effort invested + value added)
//! 2. **Veracity**: truthfulness, authenticity, reputation
//! 3. **Validity**: legitimacy, relevance, network standing

use serde::{Deserialize, Serialize};

use crate::params::TrustParams;

/// V3 Value Tensor - three dimensions measuring value contribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct V3Tensor {
    pub valuation: f64,
    pub veracity: f64,
    pub validity: f64,
}

impl Default for V3Tensor {
    fn default() -> Self {
        Self::neutral()
    }
}

impl V3Tensor {
    pub fn new(valuation: f64, veracity: f64, validity: f64) -> Self {
        Self {
            valuation: valuation.clamp(0.0, 1.0),
            veracity: veracity.clamp(0.0, 1.0),
            validity: validity.clamp(0.0, 1.0),
        }
    }

    pub fn neutral() -> Self {
        Self::new(0.5, 0.5, 0.5)
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn max() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// `V3 = w_valuation*valuation + w_veracity*veracity + w_validity*validity`,
    /// clamped to `[0, 1]`.
    pub fn composite(&self, params: &TrustParams) -> f64 {
        let (w_valuation, w_veracity, w_validity) = params.v3_weights;
        (w_valuation * self.valuation + w_veracity * self.veracity + w_validity * self.validity)
            .clamp(0.0, 1.0)
    }

    pub fn get(&self, dimension: &str) -> Option<f64> {
        match dimension {
            "valuation" => Some(self.valuation),
            "veracity" => Some(self.veracity),
            "validity" => Some(self.validity),
            _ => None,
        }
    }

    pub fn set(&mut self, dimension: &str, value: f64) -> bool {
        let value = value.clamp(0.0, 1.0);
        match dimension {
            "valuation" => {
                self.valuation = value;
                true
            }
            "veracity" => {
                self.veracity = value;
                true
            }
            "validity" => {
                self.validity = value;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_composite_is_half() {
        let v3 = V3Tensor::neutral();
        let params = TrustParams::default();
        assert_eq!(v3.composite(&params), 0.5);
    }

    #[test]
    fn composite_applies_spec_weights() {
        let v3 = V3Tensor::new(1.0, 0.0, 0.0);
        let params = TrustParams::default();
        assert!((v3.composite(&params) - 0.40).abs() < 1e-9);
    }

    #[test]
    fn clamping_on_construction() {
        let v3 = V3Tensor::new(1.5, -0.5, 0.5);
        assert_eq!(v3.valuation, 1.0);
        assert_eq!(v3.veracity, 0.0);
    }
}
