// Copyright (c) 2026 MetaLINXX Inc.
// SPDX-License-Identifier: AGPL-3.0-only
//
// This software is covered by US Patents 11,477,027 and 12,278,913,
// and pending application 19/178,619. A royalty-free license is granted
// under AGPL-3.0 terms for non-commercial and research use.
// For commercial licensing: dp@metalinxx.io
// See PATENTS.md for details.

//! # Web4 Trust Core
//!
//! The Trust Tensor Engine (C4): per-relationship T3 (Talent/Training/
//! Temperament) and per-operation V3 (Valuation/Veracity/Validity) tensors,
//! weighted evidence updates, witness relationships, and birth
//! certificates.
//!
//! ## Example
//!
//! ```rust
//! use web4_trust_core::engine::{AlwaysActive, TrustTensorEngine};
//! use web4_trust_core::storage::InMemoryTensorStore;
//!
//! let engine = TrustTensorEngine::new(InMemoryTensorStore::new());
//! engine.update_t3_score("lct:1", "training", 1.0, "evidence-1").unwrap();
//! let trust = engine
//!     .calculate_relationship_trust("lct:1", "energy_operation", &AlwaysActive)
//!     .unwrap();
//! assert!(trust.score > 0.5);
//! ```

pub mod engine;
pub mod error;
pub mod params;
pub mod storage;
pub mod tensor;
pub mod witnessing;

pub use engine::{LctLookup, RelationshipTrust, TrustTensorEngine};
pub use error::{Result, TrustError};
pub use params::TrustParams;
pub use storage::TensorStore;
pub use tensor::{T3Record, T3Tensor, TrustLevel, V3Record, V3Tensor};
pub use witnessing::{BirthCertificate, WitnessRelationship};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{AlwaysActive, LctLookup, TrustTensorEngine};
    pub use crate::error::{Result, TrustError};
    pub use crate::params::TrustParams;
    pub use crate::storage::{InMemoryTensorStore, TensorStore};
    pub use crate::tensor::{T3Record, T3Tensor, TrustLevel, V3Record, V3Tensor};
}
