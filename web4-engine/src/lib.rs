//! # Web4 Engine
//!
//! LCT & Relationship Manager (C2), the offline pairing queue (§4.6), and
//! the top-level facade that composes the identity registry, MRH graph
//! store, trust tensor engine, and energy cycle engine into one handle.
//!
//! ## Quick Start
//!
//! ```rust
//! use web4_core::identity::{IdentityRegistry, InMemoryIdentityStore, PermissivePairingPolicy};
//! use web4_energy::{EnergyCycleEngine, InMemoryEnergyStore};
//! use web4_engine::{InMemoryEngineStore, RelationshipManager, Web4Engine};
//! use web4_mrh::{InMemoryMrhStore, MrhGraphStore};
//! use web4_trust_core::{storage::InMemoryTensorStore, TrustTensorEngine};
//!
//! let engine = Web4Engine::new(
//!     IdentityRegistry::new(InMemoryIdentityStore::new()),
//!     MrhGraphStore::new(InMemoryMrhStore::new()),
//!     TrustTensorEngine::new(InMemoryTensorStore::new()),
//!     EnergyCycleEngine::new(InMemoryEnergyStore::new()),
//!     RelationshipManager::new(InMemoryEngineStore::new()),
//! );
//!
//! let (alice, _, _) = engine.identity.register_anonymous("alice", "acme", "human").unwrap();
//! let (bob, _, _) = engine.identity.register_anonymous("bob", "acme", "human").unwrap();
//! let lct_id = engine
//!     .pair_and_activate(&alice, &bob, "energy_transfer", &PermissivePairingPolicy)
//!     .unwrap();
//! assert!(lct_id.starts_with("lct:"));
//! ```

pub mod error;
pub mod facade;
pub mod lct;
pub mod pairing;
pub mod queue;
pub mod relationship;
pub mod split_key;
pub mod store;

pub use error::{EngineError, Result};
pub use facade::Web4Engine;
pub use lct::{EntityType, Lct, LctStatus};
pub use pairing::{AcceptAnyResponse, ChallengeStatus, PairingChallenge, PairingResponseVerifier};
pub use queue::{QueuedRequest, RequestStatus};
pub use relationship::{AccessGrant, RelationshipManager};
pub use split_key::SplitKeyRecord;
pub use store::{EngineStore, InMemoryEngineStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{EngineError, Result};
    pub use crate::facade::Web4Engine;
    pub use crate::lct::{EntityType, Lct, LctStatus};
    pub use crate::relationship::{AccessGrant, RelationshipManager};
    pub use crate::store::{EngineStore, InMemoryEngineStore};
}
