//! T3 Trust Tensor (§3, §4.4)
//!
//! Three dimensions measuring relationship trust, weighted 0.30/0.40/0.30:
//!
//! 1. **Talent**: natural/demonstrated ability
//! 2. **Training**: learned skills, track record, reliability
//! 3. **Temperament**: character, consistency, alignment with context

use serde::{Deserialize, Serialize};

use crate::params::TrustParams;

/// T3 Trust Tensor - three dimensions measuring trustworthiness.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct T3Tensor {
    pub talent: f64,
    pub training: f64,
    pub temperament: f64,
}

impl Default for T3Tensor {
    fn default() -> Self {
        Self::neutral()
    }
}

impl T3Tensor {
    pub fn new(talent: f64, training: f64, temperament: f64) -> Self {
        Self {
            talent: talent.clamp(0.0, 1.0),
            training: training.clamp(0.0, 1.0),
            temperament: temperament.clamp(0.0, 1.0),
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

    /// `T3 = w_talent*talent + w_training*training + w_temperament*temperament`,
    /// clamped to `[0, 1]`.
    pub fn composite(&self, params: &TrustParams) -> f64 {
        let (w_talent, w_training, w_temperament) = params.t3_weights;
        (w_talent * self.talent + w_training * self.training + w_temperament * self.temperament)
            .clamp(0.0, 1.0)
    }

    /// Read a dimension by name (`"talent"`, `"training"`, `"temperament"`).
    pub fn get(&self, dimension: &str) -> Option<f64> {
        match dimension {
            "talent" => Some(self.talent),
            "training" => Some(self.training),
            "temperament" => Some(self.temperament),
            _ => None,
        }
    }

    /// Write a dimension by name, clamping to `[0, 1]`.
    pub fn set(&mut self, dimension: &str, value: f64) -> bool {
        let value = value.clamp(0.0, 1.0);
        match dimension {
            "talent" => {
                self.talent = value;
                true
            }
            "training" => {
                self.training = value;
                true
            }
            "temperament" => {
                self.temperament = value;
                true
            }
            _ => false,
        }
    }
}
