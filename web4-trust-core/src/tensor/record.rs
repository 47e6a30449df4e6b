//! Persisted tensor records: a tensor value plus the evidence bookkeeping
//! §3/§4.4 require (evidence counter, context modifier, version,
//! created/updated timestamps, evidence log) and the weighted per-dimension
//! update law.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrustError};
use crate::params::TrustParams;
use crate::tensor::{T3Tensor, V3Tensor};

/// Dimension read/write shared by `T3Tensor` and `V3Tensor` so the record
/// wrapper and weighted-update law are written once.
pub trait TensorDimensions: Copy {
    fn get(&self, dimension: &str) -> Option<f64>;
    fn set(&mut self, dimension: &str, value: f64) -> bool;
    fn composite(&self, params: &TrustParams) -> f64;
    const KIND: &'static str;
}

impl TensorDimensions for T3Tensor {
    fn get(&self, dimension: &str) -> Option<f64> {
        T3Tensor::get(self, dimension)
    }
    fn set(&mut self, dimension: &str, value: f64) -> bool {
        T3Tensor::set(self, dimension, value)
    }
    fn composite(&self, params: &TrustParams) -> f64 {
        T3Tensor::composite(self, params)
    }
    const KIND: &'static str = "T3";
}

impl TensorDimensions for V3Tensor {
    fn get(&self, dimension: &str) -> Option<f64> {
        V3Tensor::get(self, dimension)
    }
    fn set(&mut self, dimension: &str, value: f64) -> bool {
        V3Tensor::set(self, dimension, value)
    }
    fn composite(&self, params: &TrustParams) -> f64 {
        V3Tensor::composite(self, params)
    }
    const KIND: &'static str = "V3";
}

/// A stored tensor plus its evidence bookkeeping. `T3Record` is keyed by
/// LCT identifier; `V3Record` is keyed by operation identifier (per-event
/// snapshot).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TensorRecord<T> {
    pub id: String,
    pub tensor: T,
    pub evidence_count: u64,
    pub context_modifier: Option<f64>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub evidence_log: Vec<String>,
}

impl<T: TensorDimensions> TensorRecord<T> {
    pub fn new(id: impl Into<String>, tensor: T, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            tensor,
            evidence_count: 0,
            context_modifier: None,
            version: 1,
            created_at: now,
            updated_at: now,
            evidence_log: Vec::new(),
        }
    }

    /// `UpdateTensorScore(tensor_id, dimension, new_score, evidence)`.
    ///
    /// `alpha = clamp(1/(1 + n/10), 0.01, 0.50)`; `s' = clamp(s + alpha*(s*
    /// - s), 0, 1)`. Evidence count increments, version increments,
    /// `updated_at` advances, and the evidence reference is appended to the
    /// log. A no-op update (`new_score == current_score`) still advances
    /// version/timestamp per §8's idempotence law.
    pub fn update_dimension(
        &mut self,
        dimension: &str,
        new_score: f64,
        evidence: impl Into<String>,
        params: &TrustParams,
        now: DateTime<Utc>,
    ) -> Result<f64> {
        if !(0.0..=1.0).contains(&new_score) {
            return Err(TrustError::ScoreOutOfRange(new_score));
        }
        let current = self
            .tensor
            .get(dimension)
            .ok_or_else(|| TrustError::InvalidDimension(dimension.to_string(), T::KIND))?;

        let alpha = params.learning_rate(self.evidence_count);
        let updated = (current + alpha * (new_score - current)).clamp(0.0, 1.0);
        self.tensor.set(dimension, updated);

        self.evidence_count += 1;
        self.version += 1;
        self.updated_at = now;
        self.evidence_log.push(evidence.into());

        Ok(updated)
    }

    /// Composite score with the tensor's attached context modifier applied
    /// and re-clamped, per §4.4's T3 composite rule.
    pub fn composite_with_own_modifier(&self, params: &TrustParams) -> f64 {
        let base = self.tensor.composite(params);
        match self.context_modifier {
            Some(modifier) => (base * modifier).clamp(0.0, 1.0),
            None => base,
        }
    }
}

pub type T3Record = TensorRecord<T3Tensor>;
pub type V3Record = TensorRecord<V3Tensor>;
