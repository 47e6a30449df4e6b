//! Trust (T3) and value (V3) tensors, and the persisted records that carry
//! them (evidence count, context modifier, version, timestamps).

mod record;
mod t3;
mod v3;

pub use record::{T3Record, V3Record};
pub use t3::T3Tensor;
pub use v3::V3Tensor;

/// Categorical trust level derived from a T3 composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrustLevel {
    /// composite >= 0.8
    High,
    /// composite >= 0.6
    MediumHigh,
    /// composite >= 0.4
    Medium,
    /// composite >= 0.2
    Low,
    /// composite < 0.2
    Minimal,
}

impl TrustLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            TrustLevel::High
        } else if score >= 0.6 {
            TrustLevel::MediumHigh
        } else if score >= 0.4 {
            TrustLevel::Medium
        } else if score >= 0.2 {
            TrustLevel::Low
        } else {
            TrustLevel::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLevel::High => "high",
            TrustLevel::MediumHigh => "medium-high",
            TrustLevel::Medium => "medium",
            TrustLevel::Low => "low",
            TrustLevel::Minimal => "minimal",
        }
    }
}

impl std::fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl serde::Serialize for TrustLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for TrustLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(TrustLevel::from_score(match s.as_str() {
            "high" => 0.8,
            "medium-high" => 0.6,
            "medium" => 0.4,
            "low" => 0.2,
            _ => 0.1,
        }))
    }
}
