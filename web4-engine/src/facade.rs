//! Top-level composition facade (§9's capability-bundle design note): wires
//! the five components together and satisfies each subordinate crate's
//! injected capability trait by delegating to its sibling, so no crate in
//! the cycle depends on another crate's full public surface.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use web4_core::identity::{IdentityRegistry, IdentityStore, PairingPolicy};
use web4_energy::{BlockClock, EnergyCycleEngine, EnergyStore, TrustQuery};
use web4_mrh::{EventType, MrhGraphStore, MrhStore, WitnessSource};
use web4_trust_core::{LctLookup, TensorStore, TrustTensorEngine};

use crate::error::Result;
use crate::relationship::RelationshipManager;
use crate::store::EngineStore;

/// The context label used when the facade asks the trust engine for a
/// relationship-trust composite on behalf of an energy operation.
const ENERGY_TRUST_CONTEXT: &str = "energy_operation";

/// Composes the five components (C1-C5) into one handle. Each field is
/// independently usable for its own component's full operation set; the
/// facade's own value-add is satisfying the capability traits that let the
/// components call into each other without a circular crate dependency.
pub struct Web4Engine<IS, MS, TS, ES, EN>
where
    IS: IdentityStore,
    MS: MrhStore,
    TS: TensorStore,
    ES: EnergyStore,
    EN: EngineStore,
{
    pub identity: IdentityRegistry<IS>,
    pub mrh: MrhGraphStore<MS>,
    pub trust: TrustTensorEngine<TS>,
    pub energy: EnergyCycleEngine<ES>,
    pub relationships: RelationshipManager<EN>,
    block_height: AtomicU64,
}

impl<IS, MS, TS, ES, EN> Web4Engine<IS, MS, TS, ES, EN>
where
    IS: IdentityStore,
    MS: MrhStore,
    TS: TensorStore,
    ES: EnergyStore,
    EN: EngineStore,
{
    pub fn new(
        identity: IdentityRegistry<IS>,
        mrh: MrhGraphStore<MS>,
        trust: TrustTensorEngine<TS>,
        energy: EnergyCycleEngine<ES>,
        relationships: RelationshipManager<EN>,
    ) -> Self {
        Self {
            identity,
            mrh,
            trust,
            energy,
            relationships,
            block_height: AtomicU64::new(0),
        }
    }

    /// Advances the facade's own block counter, for hosts that don't wire
    /// an external replicated-log clock (§6 "Replicated log / block
    /// context"). Returns the new height.
    pub fn advance_block(&self) -> u64 {
        self.block_height.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current_block_height(&self) -> u64 {
        self.block_height.load(Ordering::SeqCst)
    }

    /// Direct (both-online) pairing followed immediately by activation:
    /// the common case where no mediating proxy or offline party is
    /// involved. Returns the resulting active LCT identifier.
    pub fn pair_and_activate(
        &self,
        a: &str,
        b: &str,
        context: &str,
        policy: &dyn PairingPolicy,
    ) -> Result<String> {
        let lct_id = self
            .relationships
            .create_relationship(a, b, context, None, &self.identity, policy)?;
        self.relationships.activate(&lct_id, &self.mrh)?;
        Ok(lct_id)
    }
}

impl<IS, MS, TS, ES, EN> LctLookup for Web4Engine<IS, MS, TS, ES, EN>
where
    IS: IdentityStore,
    MS: MrhStore,
    TS: TensorStore,
    ES: EnergyStore,
    EN: EngineStore,
{
    fn is_active(&self, lct_id: &str) -> Option<bool> {
        self.relationships
            .store()
            .get_lct(lct_id)
            .ok()
            .flatten()
            .map(|lct| lct.is_active())
    }
}

impl<IS, MS, TS, ES, EN> WitnessSource for Web4Engine<IS, MS, TS, ES, EN>
where
    IS: IdentityStore,
    MS: MrhStore,
    TS: TensorStore,
    ES: EnergyStore,
    EN: EngineStore,
{
    fn witnesses_of(&self, subject: &str) -> Vec<(String, EventType)> {
        self.trust
            .witnesses_of(subject)
            .map(|witnesses| {
                witnesses
                    .into_iter()
                    .map(|w| (w.witness_lct, w.event_type))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl<IS, MS, TS, ES, EN> TrustQuery for Web4Engine<IS, MS, TS, ES, EN>
where
    IS: IdentityStore,
    MS: MrhStore,
    TS: TensorStore,
    ES: EnergyStore,
    EN: EngineStore,
{
    fn relationship_trust(&self, lct_id: &str) -> f64 {
        self.trust
            .calculate_relationship_trust(lct_id, ENERGY_TRUST_CONTEXT, self)
            .map(|t| t.score)
            .unwrap_or(0.0)
    }
}

impl<IS, MS, TS, ES, EN> BlockClock for Web4Engine<IS, MS, TS, ES, EN>
where
    IS: IdentityStore,
    MS: MrhStore,
    TS: TensorStore,
    ES: EnergyStore,
    EN: EngineStore,
{
    fn current_block(&self) -> u64 {
        self.current_block_height()
    }

    fn current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web4_core::identity::{InMemoryIdentityStore, PermissivePairingPolicy};
    use web4_energy::InMemoryEnergyStore;
    use web4_mrh::InMemoryMrhStore;
    use web4_trust_core::storage::InMemoryTensorStore;

    fn engine() -> Web4Engine<
        InMemoryIdentityStore,
        InMemoryMrhStore,
        InMemoryTensorStore,
        InMemoryEnergyStore,
        crate::store::InMemoryEngineStore,
    > {
        Web4Engine::new(
            IdentityRegistry::new(InMemoryIdentityStore::new()),
            MrhGraphStore::new(InMemoryMrhStore::new()),
            TrustTensorEngine::new(InMemoryTensorStore::new()),
            EnergyCycleEngine::new(InMemoryEnergyStore::new()),
            RelationshipManager::new(crate::store::InMemoryEngineStore::new()),
        )
    }

    #[test]
    fn pair_and_activate_produces_an_active_lct_visible_to_lct_lookup() {
        let engine = engine();
        let (a, _, _) = engine
            .identity
            .register_anonymous("alice", "acme", "human")
            .unwrap();
        let (b, _, _) = engine
            .identity
            .register_anonymous("bob", "acme", "human")
            .unwrap();

        let lct_id = engine
            .pair_and_activate(&a, &b, "energy_transfer", &PermissivePairingPolicy)
            .unwrap();

        assert_eq!(LctLookup::is_active(&engine, &lct_id), Some(true));
    }

    #[test]
    fn trust_query_degrades_gracefully_for_unknown_lct() {
        let engine = engine();
        let score = TrustQuery::relationship_trust(&engine, "lct:ghost");
        assert_eq!(score, 0.5);
    }

    #[test]
    fn block_clock_advances_monotonically() {
        let engine = engine();
        assert_eq!(engine.current_block_height(), 0);
        assert_eq!(engine.advance_block(), 1);
        assert_eq!(engine.advance_block(), 2);
        assert_eq!(BlockClock::current_block(&engine), 2);
    }
}
