//! Storage backend for the energy cycle engine. Keys follow §6's layout:
//! `society_pool/<society_lct>`, `atp/<token_id>`, `adp/<token_id>`,
//! `operation/<operation_id>`.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::adp::AdpToken;
use crate::atp::AtpToken;
use crate::error::{EnergyError, Result};
use crate::operation::EnergyOperation;
use crate::pool::SocietyPool;

pub trait EnergyStore {
    fn get_pool(&self, society_lct: &str) -> Result<Option<SocietyPool>>;
    /// Compare-and-swap write: fails with `VersionConflict` if the stored
    /// pool's version doesn't match `expected_version`.
    fn cas_put_pool(&self, pool: SocietyPool, expected_version: u64) -> Result<()>;

    fn get_atp(&self, token_id: &str) -> Result<Option<AtpToken>>;
    fn put_atp(&self, token: AtpToken) -> Result<()>;

    fn get_adp(&self, token_id: &str) -> Result<Option<AdpToken>>;
    fn put_adp(&self, token: AdpToken) -> Result<()>;

    fn get_operation(&self, operation_id: &str) -> Result<Option<EnergyOperation>>;
    fn put_operation(&self, operation: EnergyOperation) -> Result<()>;
    fn operations_between(&self, source_lct: &str, target_lct: &str) -> Result<Vec<EnergyOperation>>;
}

/// In-memory energy store backed by `RwLock<HashMap<..>>`.
pub struct InMemoryEnergyStore {
    pools: RwLock<HashMap<String, SocietyPool>>,
    atp: RwLock<HashMap<String, AtpToken>>,
    adp: RwLock<HashMap<String, AdpToken>>,
    operations: RwLock<HashMap<String, EnergyOperation>>,
}

impl InMemoryEnergyStore {
    pub fn new() -> Self {
        Self {
            pools: RwLock::new(HashMap::new()),
            atp: RwLock::new(HashMap::new()),
            adp: RwLock::new(HashMap::new()),
            operations: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryEnergyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyStore for InMemoryEnergyStore {
    fn get_pool(&self, society_lct: &str) -> Result<Option<SocietyPool>> {
        Ok(self
            .pools
            .read()
            .map_err(|e| EnergyError::Storage(e.to_string()))?
            .get(society_lct)
            .cloned())
    }

    fn cas_put_pool(&self, pool: SocietyPool, expected_version: u64) -> Result<()> {
        let mut pools = self.pools.write().map_err(|e| EnergyError::Storage(e.to_string()))?;
        if let Some(existing) = pools.get(&pool.society_lct) {
            if existing.version != expected_version {
                return Err(EnergyError::VersionConflict(pool.society_lct.clone()));
            }
        }
        pools.insert(pool.society_lct.clone(), pool);
        Ok(())
    }

    fn get_atp(&self, token_id: &str) -> Result<Option<AtpToken>> {
        Ok(self
            .atp
            .read()
            .map_err(|e| EnergyError::Storage(e.to_string()))?
            .get(token_id)
            .cloned())
    }

    fn put_atp(&self, token: AtpToken) -> Result<()> {
        self.atp
            .write()
            .map_err(|e| EnergyError::Storage(e.to_string()))?
            .insert(token.id.clone(), token);
        Ok(())
    }

    fn get_adp(&self, token_id: &str) -> Result<Option<AdpToken>> {
        Ok(self
            .adp
            .read()
            .map_err(|e| EnergyError::Storage(e.to_string()))?
            .get(token_id)
            .cloned())
    }

    fn put_adp(&self, token: AdpToken) -> Result<()> {
        self.adp
            .write()
            .map_err(|e| EnergyError::Storage(e.to_string()))?
            .insert(token.id.clone(), token);
        Ok(())
    }

    fn get_operation(&self, operation_id: &str) -> Result<Option<EnergyOperation>> {
        Ok(self
            .operations
            .read()
            .map_err(|e| EnergyError::Storage(e.to_string()))?
            .get(operation_id)
            .cloned())
    }

    fn put_operation(&self, operation: EnergyOperation) -> Result<()> {
        self.operations
            .write()
            .map_err(|e| EnergyError::Storage(e.to_string()))?
            .insert(operation.id.clone(), operation);
        Ok(())
    }

    fn operations_between(&self, source_lct: &str, target_lct: &str) -> Result<Vec<EnergyOperation>> {
        let operations = self
            .operations
            .read()
            .map_err(|e| EnergyError::Storage(e.to_string()))?;
        Ok(operations
            .values()
            .filter(|op| op.source_lct == source_lct && op.target_lct == target_lct)
            .cloned()
            .collect())
    }
}
