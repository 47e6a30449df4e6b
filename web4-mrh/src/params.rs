//! Genesis-overridable MRH policy constants (§9 open question: "event-type
//! trust boosts ... are hard-coded in the source but undocumented as
//! policy. Treat as defaults configurable at genesis; do not bake in.").

use serde::{Deserialize, Serialize};

/// Tunables for bounded traversal and witnessed-trust scoring.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MrhParams {
    /// Hard cap on `Context(center, radius)` traversal depth.
    pub max_context_depth: u32,
    /// Default `Path(from, to, max_depth)` depth when the caller omits one.
    pub default_path_depth: u32,
    /// Per-hop trust decay factor.
    pub path_decay: f64,
    /// Floor applied to path trust so it never reaches exactly zero.
    pub path_trust_floor: f64,
    /// Minimum `pathTrust(A, W)` for a witness `W` to contribute a boost.
    pub witness_contribution_threshold: f64,
    /// Scaling factor applied to the summed witness boosts.
    pub witness_boost_scale: f64,
}

impl Default for MrhParams {
    fn default() -> Self {
        Self {
            max_context_depth: 10,
            default_path_depth: 6,
            path_decay: 0.8,
            path_trust_floor: 0.01,
            witness_contribution_threshold: 0.5,
            witness_boost_scale: 0.1,
        }
    }
}
