//! # Web4 MRH Graph Store
//!
//! Content-addressed Markov Relevancy Horizon (MRH) graph store (C3).
//!
//! Each LCT owns exactly one *current* graph: an RDF-style set of
//! `(subject, predicate, object, weight)` triples, addressed by the SHA-256
//! hash of its deterministic serialization. Mutating a graph produces a new
//! hash and moves the owning LCT's pointer forward; the previous hash stays
//! retrievable until the surrounding runtime garbage-collects it.
//!
//! Context and path queries are bounded breadth-first traversals (hard cap
//! `max_depth <= 10`); trust-from-path and witnessed-trust compose the path
//! decay with event-type-weighted witness boosts.

pub mod error;
pub mod graph;
pub mod params;
pub mod store;
pub mod trust;

pub use error::{MrhError, Result};
pub use graph::{MrhGraph, Predicate, Triple};
pub use params::MrhParams;
pub use store::{InMemoryMrhStore, MrhGraphStore, MrhStore, PathResult};
pub use trust::{EventType, NoWitnesses, WitnessSource, WitnessedTrust};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{MrhError, Result};
    pub use crate::graph::{MrhGraph, Predicate, Triple};
    pub use crate::params::MrhParams;
    pub use crate::store::{InMemoryMrhStore, MrhStore};
    pub use crate::trust::EventType;
}
