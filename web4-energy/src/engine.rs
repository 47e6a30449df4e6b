//! Energy Cycle Engine (C5): §4.5's mint/discharge/recharge state machine,
//! energy operations, and the value-validation hook into the trust tensor
//! engine.
//!
//! Like `web4-trust-core::engine`, this takes the minimal capability it
//! needs from its neighbors (§9 "polymorphic keepers"): `TrustQuery` for
//! the relationship-trust composite `ValidateEnergyOperation` requires, and
//! `BlockClock` for the monotonic block height/time the replicated log
//! provides (§5, §6).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::adp::{AdpToken, TrustValidationStatus};
use crate::atp::{AtpStatus, AtpToken};
use crate::error::{EnergyError, Result};
use crate::operation::{EnergyOperation, OperationStatus, OperationType};
use crate::params::EnergyParams;
use crate::pool::SocietyPool;
use crate::store::EnergyStore;

/// Injected capability: the current replicated-log block height and time
/// (§5's "monotonic block height/time" assumption; §6's "Replicated log /
/// block context" external collaborator).
pub trait BlockClock {
    fn current_block(&self) -> u64;
    fn current_time(&self) -> DateTime<Utc>;
}

/// A clock driven by an explicit block height, for tests and for hosts
/// that already track height themselves.
pub struct FixedBlockClock(pub u64);

impl BlockClock for FixedBlockClock {
    fn current_block(&self) -> u64 {
        self.0
    }
    fn current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Injected capability: relationship trust lookups from the trust tensor
/// engine (C4), without a circular crate dependency.
pub trait TrustQuery {
    fn relationship_trust(&self, lct_id: &str) -> f64;
}

/// A trust source that returns a fixed score for every LCT; useful for
/// tests and hosts bootstrapping without a wired trust engine.
pub struct FixedTrust(pub f64);

impl TrustQuery for FixedTrust {
    fn relationship_trust(&self, _lct_id: &str) -> f64 {
        self.0
    }
}

fn work_id(worker_lct: &str, block_height: u64) -> String {
    format!("work-{worker_lct}-{block_height}")
}

fn non_negative(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(EnergyError::NonPositiveAmount(amount.to_string()));
    }
    Ok(())
}

pub struct EnergyCycleEngine<S: EnergyStore> {
    store: S,
    params: EnergyParams,
}

impl<S: EnergyStore> EnergyCycleEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_params(store, EnergyParams::default())
    }

    pub fn with_params(store: S, params: EnergyParams) -> Self {
        Self { store, params }
    }

    pub fn params(&self) -> &EnergyParams {
        &self.params
    }

    fn pool_or_new(&self, society_lct: &str, treasury_role: &str) -> Result<SocietyPool> {
        Ok(self
            .store
            .get_pool(society_lct)?
            .unwrap_or_else(|| SocietyPool::new(society_lct, treasury_role)))
    }

    /// `Balance(lct_id) -> atp_balance`
    ///
    /// `lct_id` here names a society pool; per-LCT sub-accounting is out of
    /// scope for the core (§1 Non-goals: not a wallet).
    pub fn balance(&self, society_lct: &str) -> Result<Decimal> {
        Ok(self
            .store
            .get_pool(society_lct)?
            .map(|p| p.atp_balance)
            .unwrap_or(Decimal::ZERO))
    }

    /// `MintADP(society_lct, treasury_role, amount, reason) ->
    /// (minted_amount, new_balance, mint_id)`
    ///
    /// Pure addition to ADP; `Delta(ATP) + Delta(ADP) = +amount`.
    pub fn mint_adp(
        &self,
        society_lct: &str,
        treasury_role: &str,
        amount: Decimal,
        reason: &str,
    ) -> Result<(Decimal, Decimal, String)> {
        non_negative(amount)?;
        let mut pool = self.pool_or_new(society_lct, treasury_role)?;
        let expected_version = pool.version;

        pool.adp_balance += amount;
        pool.total_minted += amount;
        pool.version += 1;
        let new_balance = pool.adp_balance;
        self.store.cas_put_pool(pool, expected_version)?;

        let mint_id = format!("mint-{society_lct}-{expected_version}");
        tracing::debug!(
            event = "society_pool_mint",
            society_lct,
            %amount,
            reason,
            "minted ADP"
        );
        Ok((amount, new_balance, mint_id))
    }

    /// `DischargeATP(worker_lct, amount, target_lct, work_description) ->
    /// (energy_released, adp_created, work_id, remaining_atp)`
    ///
    /// Standardized balance check (§9 open question): discharge requires
    /// `ATP >= amount`. The ADP's `energy_efficiency_ratio` is seeded from
    /// the worker's relationship trust via §4.5's discharge-efficiency law;
    /// `ValidateValue` later fills in `value_score` against the V3 outcome.
    pub fn discharge_atp(
        &self,
        society_lct: &str,
        worker_lct: &str,
        amount: Decimal,
        target_lct: Option<&str>,
        work_description: &str,
        trust: &dyn TrustQuery,
        clock: &dyn BlockClock,
    ) -> Result<(Decimal, AdpToken, String, Decimal)> {
        non_negative(amount)?;
        let mut pool = self
            .store
            .get_pool(society_lct)?
            .ok_or_else(|| EnergyError::UnknownPool(society_lct.to_string()))?;
        let expected_version = pool.version;

        if pool.atp_balance < amount {
            return Err(EnergyError::InsufficientBalance {
                needed: amount.to_string(),
                available: pool.atp_balance.to_string(),
            });
        }

        let block = clock.current_block();
        let work = work_id(worker_lct, block);

        pool.atp_balance -= amount;
        pool.adp_balance += amount;
        pool.total_discharged += amount;
        pool.version += 1;
        let remaining_atp = pool.atp_balance;
        self.store.cas_put_pool(pool, expected_version)?;

        let worker_trust = trust.relationship_trust(worker_lct);
        let atp_efficiency = self.params.atp_efficiency(worker_trust, None);
        let energy_efficiency_ratio = self.params.discharge_efficiency(atp_efficiency, worker_trust);

        let adp = AdpToken {
            id: work.clone(),
            original_atp_id: "pool".to_string(),
            owning_lct: worker_lct.to_string(),
            amount,
            discharge_block: block,
            value_score: None,
            confirmation_data: work_description.to_string(),
            energy_efficiency_ratio,
            trust_validation: TrustValidationStatus::Pending,
            validation_deadline_block: block + self.params.validation_window_blocks,
            operation_context: target_lct.unwrap_or_default().to_string(),
        };
        self.store.put_adp(adp.clone())?;

        tracing::debug!(
            event = "atp_discharged_for_work",
            worker_lct,
            work_id = %work,
            %amount,
            validation_window = self.params.validation_window_blocks,
            "discharged ATP for work"
        );

        // Scheduling a trust-tensor update is asynchronous per §4.5; a
        // missing target just means nothing is scheduled, never a failure.
        if let Some(target) = target_lct {
            tracing::debug!(event = "trust_update_scheduled", target_lct = target, work_id = %work);
        }

        Ok((amount, adp, work, remaining_atp))
    }

    /// `RechargeADP(producer_lct, amount, energy_source, validation_proof)
    /// -> (atp_created, energy_consumed, remaining_adp, new_atp_balance)`
    ///
    /// The minted ATP's `validation_proof` field retains the caller-supplied
    /// proof for later audit (§4.5 step 2); `context` separately carries the
    /// `energy_source`.
    pub fn recharge_adp(
        &self,
        society_lct: &str,
        producer_lct: &str,
        amount: Decimal,
        energy_source: &str,
        validation_proof: &str,
        clock: &dyn BlockClock,
    ) -> Result<(AtpToken, Decimal, Decimal, Decimal)> {
        non_negative(amount)?;
        if validation_proof.is_empty() {
            return Err(EnergyError::ProofMissing);
        }
        if !self.params.is_recognized_source(energy_source) {
            return Err(EnergyError::UnrecognizedEnergySource(energy_source.to_string()));
        }

        let mut pool = self
            .store
            .get_pool(society_lct)?
            .ok_or_else(|| EnergyError::UnknownPool(society_lct.to_string()))?;
        let expected_version = pool.version;

        if pool.adp_balance < amount {
            return Err(EnergyError::InsufficientBalance {
                needed: amount.to_string(),
                available: pool.adp_balance.to_string(),
            });
        }

        let block = clock.current_block();
        pool.adp_balance -= amount;
        pool.atp_balance += amount;
        pool.total_recharged += amount;
        pool.version += 1;
        let new_atp_balance = pool.atp_balance;
        let remaining_adp = pool.adp_balance;
        self.store.cas_put_pool(pool, expected_version)?;

        let atp = AtpToken {
            id: format!("atp-{producer_lct}-{block}"),
            owning_lct: producer_lct.to_string(),
            amount,
            operation_id: None,
            creation_block: block,
            status: AtpStatus::Active,
            context: energy_source.to_string(),
            expiration_block: block + self.params.atp_expiration_blocks,
            trust_score: 1.0,
            efficiency_rating: 0.0,
            validation_proof: validation_proof.to_string(),
        };
        self.store.put_atp(atp.clone())?;

        tracing::debug!(
            event = "adp_charged_to_atp",
            producer_lct,
            energy_source,
            %amount,
            "recharged ADP into ATP"
        );

        Ok((atp, amount, remaining_adp, new_atp_balance))
    }

    /// `ValidateEnergyOperation`: for transfer/discharge, checks source
    /// balance and the trust composite, inclusive at 0.60.
    pub fn validate_energy_operation(
        &self,
        society_lct: &str,
        source_lct: &str,
        target_lct: &str,
        amount: Decimal,
        op_type: OperationType,
        trust: &dyn TrustQuery,
    ) -> Result<(bool, String)> {
        if matches!(op_type, OperationType::Transfer | OperationType::Discharge) {
            let pool = self
                .store
                .get_pool(society_lct)?
                .ok_or_else(|| EnergyError::UnknownPool(society_lct.to_string()))?;
            if pool.atp_balance < amount {
                return Err(EnergyError::InsufficientBalance {
                    needed: amount.to_string(),
                    available: pool.atp_balance.to_string(),
                });
            }
        }

        let source_trust = trust.relationship_trust(source_lct);
        let target_trust = trust.relationship_trust(target_lct);
        let composite = (source_trust + target_trust) / 2.0;

        if composite < self.params.min_operation_trust {
            return Err(EnergyError::InsufficientTrust {
                composite,
                threshold: self.params.min_operation_trust,
            });
        }

        Ok((true, format!("composite_trust={composite:.4}")))
    }

    /// `CreateOperation(source_lct, target_lct, amount, type) ->
    /// operation_id`
    ///
    /// `discharge_atp_id` names the existing ATP token a `discharge`
    /// operation will later discharge via `ExecuteTransfer`; the core has no
    /// per-LCT wallet index to resolve this itself (§1 Non-goals: not a
    /// wallet), so the caller — which already knows which of its tokens it
    /// is spending — supplies it. Ignored for every other operation type.
    pub fn create_operation(
        &self,
        society_lct: &str,
        source_lct: &str,
        target_lct: &str,
        amount: Decimal,
        op_type: OperationType,
        discharge_atp_id: Option<&str>,
        trust: &dyn TrustQuery,
        clock: &dyn BlockClock,
    ) -> Result<String> {
        non_negative(amount)?;
        let (_, _) = self.validate_energy_operation(
            society_lct,
            source_lct,
            target_lct,
            amount,
            op_type,
            trust,
        )?;

        let block = clock.current_block();
        let operation_id = format!("op-{source_lct}-{target_lct}-{block}-{op_type_str}", op_type_str = op_type.as_str());

        let mut atp_id = None;
        if matches!(op_type, OperationType::Discharge) {
            let id = discharge_atp_id
                .ok_or_else(|| EnergyError::UnknownAtp(operation_id.clone()))?;
            self.store
                .get_atp(id)?
                .ok_or_else(|| EnergyError::UnknownAtp(id.to_string()))?;
            atp_id = Some(id.to_string());
        }
        if matches!(op_type, OperationType::Charge) {
            let composite_trust = (trust.relationship_trust(source_lct)
                + trust.relationship_trust(target_lct))
                / 2.0;
            let efficiency = self.params.atp_efficiency(composite_trust, None);
            let atp = AtpToken {
                id: format!("atp-charge-{operation_id}"),
                owning_lct: target_lct.to_string(),
                amount,
                operation_id: Some(operation_id.clone()),
                creation_block: block,
                status: AtpStatus::Active,
                context: "charge".to_string(),
                expiration_block: block + self.params.atp_expiration_blocks,
                trust_score: composite_trust,
                efficiency_rating: efficiency,
                validation_proof: String::new(),
            };
            atp_id = Some(atp.id.clone());
            self.store.put_atp(atp)?;
        }

        let operation = EnergyOperation {
            id: operation_id.clone(),
            source_lct: source_lct.to_string(),
            target_lct: target_lct.to_string(),
            amount,
            op_type,
            status: OperationStatus::Created,
            timestamp: clock.current_time(),
            block_height: block,
            trust_score_at_creation: (trust.relationship_trust(source_lct)
                + trust.relationship_trust(target_lct))
                / 2.0,
            atp_id,
            adp_id: None,
            efficiency: 0.0,
            validation_payload: None,
            version: 1,
        };
        self.store.put_operation(operation)?;

        Ok(operation_id)
    }

    /// `ExecuteTransfer(operation_id)`
    pub fn execute_transfer(
        &self,
        society_lct: &str,
        operation_id: &str,
        trust: &dyn TrustQuery,
        clock: &dyn BlockClock,
    ) -> Result<EnergyOperation> {
        let mut operation = self
            .store
            .get_operation(operation_id)?
            .ok_or_else(|| EnergyError::UnknownOperation(operation_id.to_string()))?;

        if operation.status != OperationStatus::Created {
            return Err(EnergyError::InvalidOperationStatus(operation_id.to_string()));
        }

        match operation.op_type {
            OperationType::Discharge => {
                let atp_id = operation
                    .atp_id
                    .clone()
                    .ok_or_else(|| EnergyError::UnknownAtp(operation_id.to_string()))?;
                operation.efficiency =
                    self.discharge_atp_token(society_lct, &atp_id, operation.amount, trust, clock)?;
            }
            OperationType::Transfer => {
                let mut pool = self
                    .store
                    .get_pool(society_lct)?
                    .ok_or_else(|| EnergyError::UnknownPool(society_lct.to_string()))?;
                let expected_version = pool.version;
                if pool.atp_balance < operation.amount {
                    return Err(EnergyError::InsufficientBalance {
                        needed: operation.amount.to_string(),
                        available: pool.atp_balance.to_string(),
                    });
                }
                pool.version += 1;
                self.store.cas_put_pool(pool, expected_version)?;
            }
            OperationType::Charge | OperationType::Balance => {}
        }

        operation.status = OperationStatus::Completed;
        operation.version += 1;
        self.store.put_operation(operation.clone())?;
        Ok(operation)
    }

    /// `DischargeAtpToken`: marks an ATP token discharged if it hasn't
    /// expired, per §4.5's expiration contract. Returns the discharge
    /// efficiency (`clamp(atp_efficiency * trust * 0.95, 0.10, 1.00)`)
    /// computed against the owning LCT's current relationship trust.
    fn discharge_atp_token(
        &self,
        _society_lct: &str,
        atp_id: &str,
        _amount: Decimal,
        trust: &dyn TrustQuery,
        clock: &dyn BlockClock,
    ) -> Result<f64> {
        let mut atp = self
            .store
            .get_atp(atp_id)?
            .ok_or_else(|| EnergyError::UnknownAtp(atp_id.to_string()))?;

        let current_block = clock.current_block();
        if atp.is_expired_at(current_block) {
            let expiration_block = atp.expiration_block;
            atp.status = AtpStatus::Expired;
            self.store.put_atp(atp)?;
            return Err(EnergyError::ExpiredToken {
                expiration_block,
                current_block,
            });
        }

        let owner_trust = trust.relationship_trust(&atp.owning_lct);
        let efficiency = self.params.discharge_efficiency(atp.efficiency_rating, owner_trust);
        atp.status = AtpStatus::Discharged;
        self.store.put_atp(atp)?;
        Ok(efficiency)
    }

    /// `ValidateValue(operation_id) -> v3_score`
    ///
    /// Resolves the ADP's `value_score` against the caller-supplied V3
    /// composite. If the validation deadline has already passed, the ADP's
    /// status is marked `Expired` and a terminal event is emitted exactly
    /// once (§5 deferred-effect idempotence).
    pub fn validate_value(
        &self,
        adp_id: &str,
        v3_score: f64,
        clock: &dyn BlockClock,
    ) -> Result<f64> {
        let mut adp = self
            .store
            .get_adp(adp_id)?
            .ok_or_else(|| EnergyError::UnknownAdp(adp_id.to_string()))?;

        let current_block = clock.current_block();
        if current_block > adp.validation_deadline_block
            && adp.trust_validation == TrustValidationStatus::Pending
        {
            let expiration_block = adp.validation_deadline_block;
            adp.trust_validation = TrustValidationStatus::Expired;
            self.store.put_adp(adp)?;
            tracing::warn!(event = "adp_validation_expired", adp_id, "validation window elapsed");
            return Err(EnergyError::ExpiredToken {
                expiration_block,
                current_block,
            });
        }

        adp.value_score = Some(v3_score);
        adp.trust_validation = TrustValidationStatus::Validated;
        self.store.put_adp(adp)?;
        Ok(v3_score)
    }

    /// `FlowHistory(source_lct, target_lct) -> [operations]`
    pub fn flow_history(&self, source_lct: &str, target_lct: &str) -> Result<Vec<EnergyOperation>> {
        self.store.operations_between(source_lct, target_lct)
    }
}
