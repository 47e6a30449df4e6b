//! Energy Cycle Engine (C5): ATP/ADP token lifecycle, society resource
//! pools, and the trust-gated energy operations that move value between
//! LCTs.
//!
//! See the crate's `engine` module for the public API
//! (`EnergyCycleEngine`) and `store` for the persistence seam it's built
//! against.

pub mod adp;
pub mod atp;
pub mod engine;
pub mod error;
pub mod operation;
pub mod params;
pub mod pool;
pub mod store;

pub use adp::{AdpToken, TrustValidationStatus};
pub use atp::{AtpStatus, AtpToken};
pub use engine::{BlockClock, EnergyCycleEngine, FixedBlockClock, FixedTrust, TrustQuery};
pub use error::{EnergyError, Result};
pub use operation::{EnergyOperation, OperationStatus, OperationType};
pub use params::EnergyParams;
pub use pool::{MetabolicState, SocietyPool};
pub use store::{EnergyStore, InMemoryEnergyStore};

/// Convenience re-exports for downstream crates wiring the energy engine
/// in alongside identity, MRH, and trust.
pub mod prelude {
    pub use crate::engine::{BlockClock, EnergyCycleEngine, FixedBlockClock, FixedTrust, TrustQuery};
    pub use crate::error::{EnergyError, Result};
    pub use crate::operation::{EnergyOperation, OperationStatus, OperationType};
    pub use crate::params::EnergyParams;
    pub use crate::pool::SocietyPool;
    pub use crate::store::{EnergyStore, InMemoryEnergyStore};
}
